//! Unified path management for saathi files.
//!
//! All configuration and data paths are resolved here so storage, exports,
//! and logs stay consistent across platforms.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/saathi/            # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/saathi/       # Data directory
//! ├── storage/                 # Persisted slices (<key>.json)
//! ├── exports/                 # Generated reports
//! └── logs/                    # Application logs
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for saathi.
pub struct SaathiPaths;

impl SaathiPaths {
    /// Returns the saathi configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("saathi"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the saathi data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("saathi"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory holding the persisted slices.
    pub fn storage_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage"))
    }

    /// Returns the directory generated reports are written to.
    pub fn exports_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("exports"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = SaathiPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("saathi"));
    }

    #[test]
    fn test_config_file_is_under_config_dir() {
        let config_file = SaathiPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        assert!(config_file.starts_with(SaathiPaths::config_dir().unwrap()));
    }

    #[test]
    fn test_storage_dir_is_under_data_dir() {
        let storage_dir = SaathiPaths::storage_dir().unwrap();
        assert!(storage_dir.ends_with("storage"));
        assert!(storage_dir.starts_with(SaathiPaths::data_dir().unwrap()));
    }

    #[test]
    fn test_exports_dir_is_under_data_dir() {
        let exports_dir = SaathiPaths::exports_dir().unwrap();
        assert!(exports_dir.ends_with("exports"));
        assert!(exports_dir.starts_with(SaathiPaths::data_dir().unwrap()));
    }
}
