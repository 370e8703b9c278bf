/// A track, album or directory listed inline in an index response.
///
/// Mirrors the attributes of a Subsonic `child` element. Everything except
/// `is_dir` is optional since servers differ in what they send.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub id: Option<String>,
    pub parent: Option<String>,
    pub is_dir: bool,
    pub title: Option<String>,
    pub album: Option<String>,
    pub album_id: Option<String>,
    pub artist: Option<String>,
    pub artist_id: Option<String>,
    pub track: Option<i32>,
    pub disc_number: Option<i32>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub content_type: Option<String>,
    pub suffix: Option<String>,
    pub transcoded_content_type: Option<String>,
    pub transcoded_suffix: Option<String>,
    pub cover_art: Option<String>,
    pub size: Option<i64>,
    /// Duration in seconds
    pub duration: Option<i32>,
    /// Bit rate in kbps
    pub bit_rate: Option<i32>,
    pub path: Option<String>,
    /// Media type reported by the server ("music", "podcast", ...)
    pub media_type: Option<String>,
    /// Directory path the entry was decoded under, if any.
    pub context: Option<String>,
}

impl Entry {
    /// Name to show for this entry: the title, falling back to the path.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.path.as_deref())
    }
}
