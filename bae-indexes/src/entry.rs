use crate::events::Attributes;
use bae_common::Entry;

/// Decodes a `child` element into an [`Entry`].
///
/// `context_path` is the directory the element was found under; index
/// responses always pass an empty path.
pub trait EntryDecoder {
    fn decode_entry(&self, context_path: &str, attributes: &Attributes) -> Entry;
}

/// Reads the standard Subsonic `child` attributes.
///
/// Numbers that fail to parse are left unset rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeEntryDecoder;

impl EntryDecoder for AttributeEntryDecoder {
    fn decode_entry(&self, context_path: &str, attributes: &Attributes) -> Entry {
        let get = |name: &str| attributes.get_owned(name);
        let int = |name: &str| attributes.get(name).and_then(|v| v.trim().parse::<i32>().ok());

        Entry {
            id: get("id"),
            parent: get("parent"),
            is_dir: attributes.get("isDir") == Some("true"),
            title: get("title"),
            album: get("album"),
            album_id: get("albumId"),
            artist: get("artist"),
            artist_id: get("artistId"),
            track: int("track"),
            disc_number: int("discNumber"),
            year: int("year"),
            genre: get("genre"),
            content_type: get("contentType"),
            suffix: get("suffix"),
            transcoded_content_type: get("transcodedContentType"),
            transcoded_suffix: get("transcodedSuffix"),
            cover_art: get("coverArt"),
            size: attributes
                .get("size")
                .and_then(|v| v.trim().parse::<i64>().ok()),
            duration: int("duration"),
            bit_rate: int("bitRate"),
            path: get("path"),
            media_type: get("type"),
            context: Some(context_path)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        }
    }
}

impl<F> EntryDecoder for F
where
    F: Fn(&str, &Attributes) -> Entry,
{
    fn decode_entry(&self, context_path: &str, attributes: &Attributes) -> Entry {
        self(context_path, attributes)
    }
}
