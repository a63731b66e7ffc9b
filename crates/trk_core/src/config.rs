//! Repository configuration stored in `.trk/config.toml`.

use crate::error::{Result, TrkError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the configuration inside the `.trk` directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Comprehensive configuration for a trk repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Persistence-related configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// History display configuration.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from the `.trk` directory, or defaults if absent.
    pub fn load(trk_dir: &Path) -> Result<Self> {
        let path = trk_dir.join(CONFIG_FILE);
        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| TrkError::Config(format!("failed to read config: {}", e)))?;
            toml::from_str(&content)
                .map_err(|e| TrkError::Config(format!("failed to parse config: {}", e)))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration into the `.trk` directory.
    pub fn save(&self, trk_dir: &Path) -> Result<()> {
        let path = trk_dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)
            .map_err(|e| TrkError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&path, content)
            .map_err(|e| TrkError::Config(format!("failed to write config: {}", e)))?;
        Ok(())
    }
}

/// Persistence-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Hold `.trk/LOCK` around stage and commit (default: true).
    pub lock: bool,

    /// fsync the document and its directory on every save (default: true).
    pub fsync: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            lock: true,
            fsync: true,
        }
    }
}

/// History display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default number of commits shown by `trk log`; 0 means all.
    pub max_count: usize,

    /// Hex digits shown for abbreviated ids (default: 7).
    pub abbrev: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_count: 0,
            abbrev: 7,
        }
    }
}

impl LogConfig {
    /// Returns the configured limit, `None` when unlimited.
    pub fn limit(&self) -> Option<usize> {
        (self.max_count > 0).then_some(self.max_count)
    }
}
