//! Slice storage: the persistence-adapter seam.
//!
//! Application state is persisted as independent string-keyed JSON slices
//! (profile, activities, language, downloads). This module defines the
//! [`SliceStorage`] trait the state store writes through, a typed extension
//! for (de)serialization with default fallback, and an in-memory
//! implementation used by tests and as an in-process default.
//!
//! Writes to different keys are independent; there is no cross-key
//! transaction. A crash between two related writes can leave slices
//! partially updated, which is accepted for a local single-user tool.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

/// Storage keys for the persisted slices.
pub mod keys {
    pub const PROFILE: &str = "ngo_profile";
    pub const ACTIVITIES: &str = "ngo_activities";
    pub const LANGUAGE: &str = "ngo_language";
    pub const DOWNLOADED_FILES: &str = "ngo_downloaded_files";

    /// Prefix used by an older key scheme; readable but never written.
    pub const LEGACY_PREFIX: &str = "ngo_saathi_";
}

/// Durable storage of JSON values under string keys.
///
/// Implementations must survive process restarts (file-backed) or may be
/// purely in-memory for tests. Absent keys are `Ok(None)`, never an error.
pub trait SliceStorage: Send + Sync {
    /// Writes `value` under `key`, replacing any previous value.
    fn save_value(&self, key: &str, value: &Value) -> Result<()>;

    /// Reads the value stored under `key`, or `None` if absent.
    fn load_value(&self, key: &str) -> Result<Option<Value>>;

    /// Removes the value stored under `key`. Removing an absent key is fine.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed convenience layer over [`SliceStorage`].
pub trait SliceStorageExt: SliceStorage {
    /// Serializes `value` to JSON and writes it under `key`.
    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_value(value)?;
        self.save_value(key, &json)
    }

    /// Loads and deserializes the value under `key`.
    ///
    /// Returns `default` when the key is absent or the stored data cannot be
    /// parsed into `T`; a parse failure is logged, never raised, so a
    /// corrupt slice degrades to a fresh default instead of wedging startup.
    fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.load_value(key) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(key, %err, "stored slice is unparsable, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(err) => {
                warn!(key, %err, "failed to read slice, using default");
                default
            }
        }
    }
}

impl<S: SliceStorage + ?Sized> SliceStorageExt for S {}

/// In-memory slice storage.
///
/// Backs tests and ephemeral sessions; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySliceStorage {
    slices: Mutex<HashMap<String, Value>>,
}

impl MemorySliceStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, for assertions in tests.
    pub fn len(&self) -> usize {
        self.slices.lock().expect("slice map lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SliceStorage for MemorySliceStorage {
    fn save_value(&self, key: &str, value: &Value) -> Result<()> {
        let mut slices = self.slices.lock().expect("slice map lock poisoned");
        slices.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn load_value(&self, key: &str) -> Result<Option<Value>> {
        let slices = self.slices.lock().expect("slice map lock poisoned");
        Ok(slices.get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slices = self.slices.lock().expect("slice map lock poisoned");
        slices.remove(key);
        Ok(())
    }
}
