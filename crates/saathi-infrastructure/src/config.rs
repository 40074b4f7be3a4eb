//! Application configuration.
//!
//! Read from `<config_dir>/saathi/config.toml`; a missing file means
//! defaults. Only reading is supported here; users edit the file by hand.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use saathi_core::error::{Result, SaathiError};
use saathi_core::language::Language;

use crate::paths::SaathiPaths;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Overrides the platform-default storage directory.
    pub storage_dir: Option<PathBuf>,
    /// Language used when no persisted language slice exists yet.
    pub default_language: Option<Language>,
}

impl AppConfig {
    /// Loads the configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = SaathiPaths::config_file()
            .map_err(|e| SaathiError::config(e.to_string()))?;
        Self::load_from(&path)
    }

    /// Loads the configuration from `path`. A missing or empty file yields
    /// the default configuration; a malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// The storage directory to use, honoring the override.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => SaathiPaths::storage_dir().map_err(|e| SaathiError::config(e.to_string())),
        }
    }
}
