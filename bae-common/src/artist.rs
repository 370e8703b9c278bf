/// Index label carried by every shortcut artist.
pub const SHORTCUT_INDEX: &str = "*";

/// An artist as listed by a Subsonic index response.
///
/// Fields are optional because servers occasionally omit attributes and the
/// parser keeps whatever it was given. `id` may be a `;`-joined list when the
/// server reported the same display name under several ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Artist {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Label of the index group this artist was listed under ("A", "#", "*").
    pub index: Option<String>,
}

impl Artist {
    pub fn new(id: Option<String>, name: Option<String>, index: Option<String>) -> Self {
        Self { id, name, index }
    }

    /// Build a shortcut artist, always indexed under `*`.
    pub fn shortcut(id: Option<String>, name: Option<String>) -> Self {
        Self {
            id,
            name,
            index: Some(SHORTCUT_INDEX.to_string()),
        }
    }

    pub fn is_shortcut(&self) -> bool {
        self.index.as_deref() == Some(SHORTCUT_INDEX)
    }

    /// Individual source ids, in the order the server reported them.
    pub fn ids(&self) -> Vec<&str> {
        match &self.id {
            Some(id) => id.split(';').filter(|s| !s.is_empty()).collect(),
            None => Vec::new(),
        }
    }

    /// Append another source id to this artist's composite id.
    pub fn merge_id(&mut self, other: Option<&str>) {
        self.id = match (self.id.take(), other) {
            (Some(existing), Some(other)) => Some(format!("{};{}", existing, other)),
            (Some(existing), None) => Some(existing),
            (None, other) => other.map(str::to_string),
        };
    }
}
