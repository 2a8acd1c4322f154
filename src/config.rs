//! Application configuration, loaded once at startup and read-only after

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sheets::SourceLocator;

const APP_NAME: &str = "kartei";
const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_STORAGE_KEY: &str = "learned-cards";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://kartei.local/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Data directory not found")]
    DataDirNotFound,
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AppConfig {
    /// Published CSV URLs or local CSV paths, in display order
    pub sources: Vec<String>,
    /// Page URL that exported progress links point at
    pub share_base_url: String,
    /// Key the learned set is persisted under
    pub storage_key: String,
    /// Where persisted state lives (defaults to the platform data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Per-request timeout in seconds; unset waits indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Default config location (e.g., ~/.config/kartei/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from `path`, or from the default location if it exists, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                log::info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join(APP_NAME))
                .ok_or(ConfigError::DataDirNotFound),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn sources_config(&self) -> SourcesConfig {
        SourcesConfig {
            locators: self.sources.iter().map(|s| SourceLocator::parse(s)).collect(),
        }
    }
}

/// The ordered source list handed to the aggregator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcesConfig {
    pub locators: Vec<SourceLocator>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let config = AppConfig::from_toml(
            r#"
            sources = [
                "https://docs.google.com/spreadsheets/d/e/x/pub?gid=0&single=true&output=csv",
                "decks/verbs.csv",
            ]
            share_base_url = "https://example.com/cards/"
            request_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));

        let sources = config.sources_config();
        assert!(matches!(sources.locators[0], SourceLocator::Url(_)));
        assert!(matches!(sources.locators[1], SourceLocator::File(_)));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.sources.is_empty());
        assert_eq!(config.share_base_url, DEFAULT_SHARE_BASE_URL);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let data_dir = temp.path().join("data");
        fs::write(
            &path,
            format!("sources = [\"a.csv\"]\ndata_dir = {:?}\n", data_dir.display().to_string()),
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.sources, vec!["a.csv".to_string()]);
        assert_eq!(config.data_dir().unwrap(), data_dir);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "sources = 3").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }
}
