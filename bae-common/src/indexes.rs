use crate::{Artist, Entry};

/// Parsed artist index: shortcuts, indexed artists and loose entries.
///
/// Artists keep the order in which they were first listed and no two share a
/// display name. Shortcuts are kept apart and may repeat names freely.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Indexes {
    pub shortcuts: Vec<Artist>,
    pub artists: Vec<Artist>,
    pub entries: Vec<Entry>,
}

impl Indexes {
    pub fn new(shortcuts: Vec<Artist>, artists: Vec<Artist>, entries: Vec<Entry>) -> Self {
        Self {
            shortcuts,
            artists,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty() && self.artists.is_empty() && self.entries.is_empty()
    }

    /// Index labels in first-seen order, each listed once.
    pub fn index_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for label in self.artists.iter().filter_map(|a| a.index.as_deref()) {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }

    /// Artists listed under the given index label.
    pub fn artists_in(&self, label: &str) -> impl Iterator<Item = &Artist> {
        let label = label.to_string();
        self.artists
            .iter()
            .filter(move |a| a.index.as_deref() == Some(label.as_str()))
    }
}

/// Outcome of fetching an index.
///
/// `Unchanged` means the response carried no index at all (for example an
/// `ifModifiedSince` request with nothing new), so callers should keep what
/// they already have. It is not the same as an empty `Changed` index.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexesUpdate {
    Unchanged,
    Changed(Indexes),
}

impl IndexesUpdate {
    pub fn into_indexes(self) -> Option<Indexes> {
        match self {
            IndexesUpdate::Unchanged => None,
            IndexesUpdate::Changed(indexes) => Some(indexes),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, IndexesUpdate::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: &str, name: &str, index: &str) -> Artist {
        Artist::new(Some(id.into()), Some(name.into()), Some(index.into()))
    }

    #[test]
    fn index_labels_are_unique_and_ordered() {
        let indexes = Indexes::new(
            vec![Artist::shortcut(Some("9".into()), Some("Podcasts".into()))],
            vec![
                artist("1", "Abba", "A"),
                artist("2", "AC/DC", "A"),
                artist("3", "Beatles", "B"),
            ],
            Vec::new(),
        );

        assert_eq!(indexes.index_labels(), vec!["A", "B"]);
        assert_eq!(indexes.artists_in("A").count(), 2);
        assert_eq!(indexes.artists_in("*").count(), 0);
    }

    #[test]
    fn unchanged_has_no_indexes() {
        assert!(IndexesUpdate::Unchanged.is_unchanged());
        assert_eq!(IndexesUpdate::Unchanged.into_indexes(), None);

        let update = IndexesUpdate::Changed(Indexes::default());
        assert!(!update.is_unchanged());
        assert!(update.into_indexes().unwrap().is_empty());
    }
}
