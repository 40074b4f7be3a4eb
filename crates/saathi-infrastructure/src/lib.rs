//! Saathi infrastructure: file-backed persistence for the core state store.
//!
//! Provides platform path resolution, atomic per-slice JSON files, the
//! [`json_store::JsonFileStore`] implementation of the core
//! `SliceStorage` trait, and the TOML application config.

pub mod config;
pub mod json_store;
pub mod paths;
pub mod storage;

pub use config::AppConfig;
pub use json_store::JsonFileStore;
pub use paths::SaathiPaths;
