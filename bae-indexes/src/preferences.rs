//! Persisted preferences written as a side effect of parsing.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Durable store for settings the server hands out with its index.
///
/// Writes are fire-and-forget: a failed write is logged by the
/// implementation, never surfaced to the parse.
pub trait PreferencesStore {
    fn set_ignored_articles(&self, value: &str);
}

impl<T: PreferencesStore + ?Sized> PreferencesStore for &T {
    fn set_ignored_articles(&self, value: &str) {
        (**self).set_ignored_articles(value)
    }
}

impl<T: PreferencesStore + ?Sized> PreferencesStore for std::sync::Arc<T> {
    fn set_ignored_articles(&self, value: &str) {
        (**self).set_ignored_articles(value)
    }
}

/// On-disk layout of the preferences file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencesYaml {
    /// Space-separated articles the server ignores when sorting ("The El La").
    #[serde(default)]
    pub ignored_articles: Option<String>,
}

/// Preferences kept in a YAML file.
#[derive(Debug, Clone)]
pub struct YamlPreferences {
    path: PathBuf,
}

impl YamlPreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, treating a missing file as empty preferences.
    pub fn load(&self) -> Result<PreferencesYaml, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(PreferencesYaml::default()),
            Ok(content) => Ok(serde_yaml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesYaml::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, prefs: &PreferencesYaml) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_yaml::to_string(prefs)?)?;
        Ok(())
    }

    pub fn ignored_articles(&self) -> Option<String> {
        self.load().ok().and_then(|prefs| prefs.ignored_articles)
    }

    fn write_ignored_articles(&self, value: &str) -> Result<(), ConfigError> {
        let mut prefs = self.load()?;
        prefs.ignored_articles = Some(value.to_string());
        self.save(&prefs)
    }
}

impl PreferencesStore for YamlPreferences {
    fn set_ignored_articles(&self, value: &str) {
        match self.write_ignored_articles(value) {
            Ok(()) => debug!(
                "Saved ignored articles '{}' to {}",
                value,
                self.path.display()
            ),
            Err(e) => warn!(
                "Failed to persist ignored articles to {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// In-process preferences. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    ignored_articles: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignored_articles(&self) -> Option<String> {
        self.ignored_articles
            .lock()
            .map(|value| value.clone())
            .unwrap_or_default()
    }

    /// Number of writes so far.
    pub fn writes(&self) -> usize {
        self.writes.lock().map(|n| *n).unwrap_or_default()
    }
}

impl PreferencesStore for MemoryPreferences {
    fn set_ignored_articles(&self, value: &str) {
        if let Ok(mut current) = self.ignored_articles.lock() {
            *current = Some(value.to_string());
        }
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
    }
}
