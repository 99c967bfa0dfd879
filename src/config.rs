use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::app_dirs::AppDirs;
use crate::corpus::{Category, Length};

/// Preferences remembered between runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub category: Category,
    pub length: Length,
    pub sound: bool,
    pub show_romaji: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category: Category::default(),
            length: Length::default(),
            sound: true,
            show_romaji: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait ConfigStore {
    fn try_load(&self) -> Result<Config, ConfigError>;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;

    /// Stored preferences, or the defaults when there are none or they cannot be read.
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(%err, "using default config");
                Config::default()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn try_load(&self) -> Result<Config, ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file yet");
                return Ok(Config::default());
            }
            Err(err) => return Err(self.io_error(err)),
        };
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(|source| ConfigError::Format {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nested/deeper/config.json"));
        let cfg = Config {
            category: Category::Literature,
            length: Length::Long,
            sound: false,
            show_romaji: false,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.try_load().unwrap(), cfg);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.try_load().unwrap(), Config::default());
    }

    #[test]
    fn garbage_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_matches!(store.try_load(), Err(ConfigError::Format { .. }));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"category": "it"}"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.category, Category::It);
        assert_eq!(cfg.length, Length::Short);
        assert!(cfg.sound);
    }
}
