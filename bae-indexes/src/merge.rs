//! Accumulation of decoded records into an [`Indexes`].

use crate::decoder::Record;
use crate::error::IndexesError;
use crate::preferences::PreferencesStore;
use crate::progress::{artist_count_message, ProgressSink, ARTIST_PROGRESS_INTERVAL};
use bae_common::{Artist, Entry, Indexes, IndexesUpdate};
use std::collections::HashMap;
use tracing::debug;

/// Index label used until the first `<index>` element.
pub const DEFAULT_INDEX: &str = "#";

/// Mutable state of one parse.
///
/// Artists are deduplicated by display name: a second artist with a known
/// name appends its id to the first one (`"1;2"`) instead of being listed.
/// Shortcuts and entries are kept exactly as they arrive.
#[derive(Debug)]
pub struct IndexAccumulator {
    artists: Vec<Artist>,
    shortcuts: Vec<Artist>,
    entries: Vec<Entry>,
    /// Display name → position in `artists`
    by_name: HashMap<Option<String>, usize>,
    current_index: Option<String>,
    ignored_articles: Option<String>,
    has_content: bool,
}

impl Default for IndexAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexAccumulator {
    pub fn new() -> Self {
        Self {
            artists: Vec::new(),
            shortcuts: Vec::new(),
            entries: Vec::new(),
            by_name: HashMap::new(),
            current_index: Some(DEFAULT_INDEX.to_string()),
            ignored_articles: None,
            has_content: false,
        }
    }

    /// Apply one record. An embedded server error aborts the parse before
    /// anything else about that record is looked at.
    pub fn apply(&mut self, record: Record, progress: &dyn ProgressSink) -> Result<(), IndexesError> {
        match record {
            Record::Error { code, message } => {
                return Err(IndexesError::Stream { code, message });
            }
            Record::Container { ignored_articles } => {
                self.has_content = true;
                self.ignored_articles = ignored_articles;
            }
            Record::IndexHeader { name } => {
                self.current_index = name;
            }
            Record::Artist { id, name } => {
                if let Some(&pos) = self.by_name.get(&name) {
                    let existing = &mut self.artists[pos];
                    existing.merge_id(id.as_deref());
                    debug!("Merged artist {:?} into id {:?}", name, existing.id);
                } else {
                    self.by_name.insert(name.clone(), self.artists.len());
                    self.artists
                        .push(Artist::new(id, name, self.current_index.clone()));

                    if self.artists.len() % ARTIST_PROGRESS_INTERVAL == 0 {
                        progress.report(&artist_count_message(self.artists.len()));
                    }
                }
            }
            Record::Shortcut { id, name } => {
                self.shortcuts.push(Artist::shortcut(id, name));
            }
            Record::Child(entry) => {
                self.entries.push(entry);
            }
            Record::Ignored => {}
        }
        Ok(())
    }

    /// Whether an index container has been seen.
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    pub fn ignored_articles(&self) -> Option<&str> {
        self.ignored_articles.as_deref()
    }

    /// Finish a successful scan.
    ///
    /// Writes discovered ignored articles to `preferences` whether or not an
    /// index was present, then returns `Unchanged` if no container was seen.
    pub fn finish(
        self,
        preferences: &dyn PreferencesStore,
        progress: &dyn ProgressSink,
    ) -> IndexesUpdate {
        if let Some(articles) = &self.ignored_articles {
            preferences.set_ignored_articles(articles);
        }

        if !self.has_content {
            return IndexesUpdate::Unchanged;
        }

        progress.report(&artist_count_message(self.artists.len()));
        IndexesUpdate::Changed(Indexes::new(self.shortcuts, self.artists, self.entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferences;
    use crate::progress::NoProgress;
    use std::cell::RefCell;

    fn artist(id: &str, name: &str) -> Record {
        Record::Artist {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }

    fn container(articles: Option<&str>) -> Record {
        Record::Container {
            ignored_articles: articles.map(str::to_string),
        }
    }

    fn header(name: &str) -> Record {
        Record::IndexHeader {
            name: Some(name.into()),
        }
    }

    fn changed(update: IndexesUpdate) -> Indexes {
        match update {
            IndexesUpdate::Changed(indexes) => indexes,
            IndexesUpdate::Unchanged => panic!("expected Changed, got Unchanged"),
        }
    }

    #[test]
    fn same_name_artists_merge_at_first_position() {
        let mut acc = IndexAccumulator::new();
        for record in [
            container(None),
            header("A"),
            artist("1", "Abba"),
            artist("5", "AC/DC"),
            header("B"),
            artist("2", "Abba"),
        ] {
            acc.apply(record, &NoProgress).unwrap();
        }

        let indexes = changed(acc.finish(&MemoryPreferences::new(), &NoProgress));
        assert_eq!(indexes.artists.len(), 2);
        assert_eq!(indexes.artists[0].id.as_deref(), Some("1;2"));
        assert_eq!(indexes.artists[0].name.as_deref(), Some("Abba"));
        // Keeps the label it was first listed under
        assert_eq!(indexes.artists[0].index.as_deref(), Some("A"));
        assert_eq!(indexes.artists[1].id.as_deref(), Some("5"));
    }

    #[test]
    fn artists_before_any_header_use_default_label() {
        let mut acc = IndexAccumulator::new();
        acc.apply(container(None), &NoProgress).unwrap();
        acc.apply(artist("1", "10cc"), &NoProgress).unwrap();

        let indexes = changed(acc.finish(&MemoryPreferences::new(), &NoProgress));
        assert_eq!(indexes.artists[0].index.as_deref(), Some("#"));
    }

    #[test]
    fn missing_header_name_propagates() {
        let mut acc = IndexAccumulator::new();
        acc.apply(container(None), &NoProgress).unwrap();
        acc.apply(Record::IndexHeader { name: None }, &NoProgress)
            .unwrap();
        acc.apply(artist("1", "Abba"), &NoProgress).unwrap();

        let indexes = changed(acc.finish(&MemoryPreferences::new(), &NoProgress));
        assert_eq!(indexes.artists[0].index, None);
    }

    #[test]
    fn merging_skips_absent_ids() {
        let without_id = |name: &str| Record::Artist {
            id: None,
            name: Some(name.into()),
        };

        let mut acc = IndexAccumulator::new();
        for record in [
            container(None),
            header("A"),
            artist("1", "Abba"),
            without_id("Abba"),
            without_id("AC/DC"),
            artist("3", "AC/DC"),
            artist("4", "Abba"),
        ] {
            acc.apply(record, &NoProgress).unwrap();
        }

        let indexes = changed(acc.finish(&MemoryPreferences::new(), &NoProgress));
        assert_eq!(indexes.artists.len(), 2);
        assert_eq!(indexes.artists[0].id.as_deref(), Some("1;4"));
        assert_eq!(indexes.artists[1].id.as_deref(), Some("3"));
        assert_eq!(indexes.artists[1].name.as_deref(), Some("AC/DC"));
    }

    #[test]
    fn shortcuts_never_merge() {
        let mut acc = IndexAccumulator::new();
        for record in [
            container(None),
            artist("1", "Abba"),
            Record::Shortcut {
                id: Some("9".into()),
                name: Some("Abba".into()),
            },
            Record::Shortcut {
                id: Some("10".into()),
                name: Some("Abba".into()),
            },
        ] {
            acc.apply(record, &NoProgress).unwrap();
        }

        let indexes = changed(acc.finish(&MemoryPreferences::new(), &NoProgress));
        assert_eq!(indexes.artists.len(), 1);
        assert_eq!(indexes.artists[0].id.as_deref(), Some("1"));
        assert_eq!(indexes.shortcuts.len(), 2);
        assert!(indexes.shortcuts.iter().all(|s| s.is_shortcut()));
        assert_eq!(indexes.shortcuts[1].id.as_deref(), Some("10"));
    }

    #[test]
    fn entries_are_appended_without_dedup() {
        let mut acc = IndexAccumulator::new();
        acc.apply(container(None), &NoProgress).unwrap();
        let entry = Entry {
            id: Some("s1".into()),
            ..Entry::default()
        };
        acc.apply(Record::Child(entry.clone()), &NoProgress).unwrap();
        acc.apply(Record::Child(entry), &NoProgress).unwrap();

        let indexes = changed(acc.finish(&MemoryPreferences::new(), &NoProgress));
        assert_eq!(indexes.entries.len(), 2);
    }

    #[test]
    fn error_record_aborts() {
        let mut acc = IndexAccumulator::new();
        acc.apply(container(Some("The")), &NoProgress).unwrap();

        let err = acc
            .apply(
                Record::Error {
                    code: 70,
                    message: "Not found".into(),
                },
                &NoProgress,
            )
            .unwrap_err();

        match err {
            IndexesError::Stream { code, message } => {
                assert_eq!(code, 70);
                assert_eq!(message, "Not found");
            }
            other => panic!("expected Stream error, got {:?}", other),
        }
    }

    #[test]
    fn progress_counts_first_sightings_only() {
        let reports = RefCell::new(Vec::new());
        let sink = |message: &str| reports.borrow_mut().push(message.to_string());

        let mut acc = IndexAccumulator::new();
        acc.apply(container(None), &sink).unwrap();
        for i in 0..9 {
            acc.apply(artist(&i.to_string(), &format!("Artist {}", i)), &sink)
                .unwrap();
        }
        // Merges while the list holds 9 artists must not report
        acc.apply(artist("x", "Artist 0"), &sink).unwrap();
        acc.apply(artist("y", "Artist 1"), &sink).unwrap();
        assert!(reports.borrow().is_empty());

        acc.apply(artist("9", "Artist 9"), &sink).unwrap();
        assert_eq!(*reports.borrow(), vec!["Got 10 artists."]);

        // A merge while the list holds 10 artists must not report again
        acc.apply(artist("z", "Artist 9"), &sink).unwrap();
        assert_eq!(reports.borrow().len(), 1);

        for i in 10..20 {
            acc.apply(artist(&i.to_string(), &format!("Artist {}", i)), &sink)
                .unwrap();
        }
        assert_eq!(
            *reports.borrow(),
            vec!["Got 10 artists.", "Got 20 artists."]
        );

        acc.finish(&MemoryPreferences::new(), &sink);
        assert_eq!(reports.borrow().last().unwrap(), "Got 20 artists.");
        assert_eq!(reports.borrow().len(), 3);
    }

    #[test]
    fn ignored_articles_last_container_wins() {
        let mut acc = IndexAccumulator::new();
        acc.apply(container(Some("The")), &NoProgress).unwrap();
        acc.apply(container(Some("The El La")), &NoProgress).unwrap();
        assert_eq!(acc.ignored_articles(), Some("The El La"));

        let prefs = MemoryPreferences::new();
        acc.finish(&prefs, &NoProgress);
        assert_eq!(prefs.ignored_articles().as_deref(), Some("The El La"));
        assert_eq!(prefs.writes(), 1);
    }

    #[test]
    fn no_container_is_unchanged_and_skips_final_progress() {
        let reports = RefCell::new(Vec::new());
        let sink = |message: &str| reports.borrow_mut().push(message.to_string());

        let mut acc = IndexAccumulator::new();
        acc.apply(artist("1", "Abba"), &sink).unwrap();
        assert!(!acc.has_content());

        let prefs = MemoryPreferences::new();
        assert_eq!(acc.finish(&prefs, &sink), IndexesUpdate::Unchanged);
        assert!(reports.borrow().is_empty());
        assert_eq!(prefs.writes(), 0);
    }

    #[test]
    fn empty_container_is_changed_but_empty() {
        let mut acc = IndexAccumulator::new();
        acc.apply(container(None), &NoProgress).unwrap();

        let indexes = changed(acc.finish(&MemoryPreferences::new(), &NoProgress));
        assert!(indexes.is_empty());
    }
}
