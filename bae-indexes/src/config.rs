use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// YAML config file structure (`~/.bae/subsonic.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigYaml {
    pub server_url: String,
    pub username: String,
    pub password: String,
    /// Where fetched preferences (ignored articles) are stored.
    /// Defaults to `~/.bae/preferences.yaml`.
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
}

/// Connection settings for the Subsonic server the index is fetched from
#[derive(Clone, Debug)]
pub struct Config {
    pub server_url: String,
    pub username: String,
    pub password: String,
    pub preferences_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let dev_mode = std::env::var("BAE_DEV_MODE").is_ok() || dotenvy::dotenv().is_ok();
        if dev_mode {
            info!("Dev mode activated - loading from .env");
            Self::from_env()
        } else {
            info!("Production mode - loading from subsonic.yaml");
            Self::from_config_file()
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let server_url = required_env("BAE_SUBSONIC_URL")?;
        let username = required_env("BAE_SUBSONIC_USERNAME")?;
        let password = required_env("BAE_SUBSONIC_PASSWORD")?;
        let preferences_path = match std::env::var("BAE_PREFERENCES_PATH")
            .ok()
            .filter(|s| !s.is_empty())
        {
            Some(p) => PathBuf::from(p),
            None => bae_dir()?.join("preferences.yaml"),
        };

        Ok(Self {
            server_url,
            username,
            password,
            preferences_path,
        })
    }

    fn from_config_file() -> Result<Self, ConfigError> {
        Self::load_from_bae_dir(&bae_dir()?)
    }

    fn load_from_bae_dir(bae_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = bae_dir.join("subsonic.yaml");
        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::Config(format!(
                "No subsonic.yaml at {} ({})",
                config_path.display(),
                e
            ))
        })?;
        let yaml: ConfigYaml = serde_yaml::from_str(&content)?;

        Ok(Self {
            server_url: yaml.server_url,
            username: yaml.username,
            password: yaml.password,
            preferences_path: yaml
                .preferences_path
                .unwrap_or_else(|| bae_dir.join("preferences.yaml")),
        })
    }

    pub fn save_to_bae_dir(&self, bae_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(bae_dir)?;
        let yaml = ConfigYaml {
            server_url: self.server_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            preferences_path: Some(self.preferences_path.clone()),
        };
        std::fs::write(bae_dir.join("subsonic.yaml"), serde_yaml::to_string(&yaml)?)?;
        Ok(())
    }
}

/// `~/.bae`
pub fn bae_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".bae"))
        .ok_or_else(|| ConfigError::Config("Failed to get home directory".into()))
}

fn required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::Config(format!("{} is not set", key)))
}
