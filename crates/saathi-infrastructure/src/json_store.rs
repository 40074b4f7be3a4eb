//! File-backed slice storage.
//!
//! [`JsonFileStore`] persists each slice key as its own JSON file under a
//! storage directory, writing through [`AtomicJsonFile`] so a crash mid-write
//! never corrupts a slice. Writes to different keys remain independent; there
//! is no cross-key transaction.
//!
//! Older installations wrote slices under `ngo_saathi_`-prefixed keys. Loads
//! fall back to that legacy file when the primary is absent, so existing
//! data keeps working; writes always use the current key names.

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use saathi_core::error::{Result, SaathiError};
use saathi_core::storage::{keys, SliceStorage};

use crate::paths::SaathiPaths;
use crate::storage::AtomicJsonFile;

/// Slice storage backed by one JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Opens the store at the platform-default storage directory.
    pub fn open_default() -> Result<Self> {
        let dir = SaathiPaths::storage_dir()
            .map_err(|e| SaathiError::config(e.to_string()))?;
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicJsonFile<Value>> {
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(SaathiError::validation(format!(
                "invalid storage key '{}'",
                key
            )));
        }
        Ok(AtomicJsonFile::new(self.dir.join(format!("{}.json", key))))
    }

    /// Returns the legacy-scheme key for `key`, if one existed.
    ///
    /// The downloads slice was introduced after the legacy scheme was
    /// retired, so it has no alias; probing a nonexistent file is harmless.
    fn legacy_key(key: &str) -> Option<String> {
        key.strip_prefix("ngo_")
            .map(|rest| format!("{}{}", keys::LEGACY_PREFIX, rest))
    }
}

impl SliceStorage for JsonFileStore {
    fn save_value(&self, key: &str, value: &Value) -> Result<()> {
        self.file_for(key)?.save(value)
    }

    fn load_value(&self, key: &str) -> Result<Option<Value>> {
        if let Some(value) = self.file_for(key)?.load()? {
            return Ok(Some(value));
        }

        if let Some(legacy) = Self::legacy_key(key) {
            if let Some(value) = self.file_for(&legacy)?.load()? {
                debug!(key, legacy, "loaded slice from legacy key");
                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file_for(key)?.delete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saathi_core::profile::NgoProfile;
    use saathi_core::storage::SliceStorageExt;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_through_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());

        let profile = NgoProfile {
            ngo_name: "Asha Trust".to_string(),
            ..Default::default()
        };
        store.save(keys::PROFILE, &profile).unwrap();

        let loaded: NgoProfile = store.load_or(keys::PROFILE, NgoProfile::default());
        assert_eq!(loaded, profile);
        assert!(temp_dir.path().join("ngo_profile.json").exists());
    }

    #[test]
    fn test_missing_key_loads_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());
        let loaded: Vec<String> = store.load_or("ngo_activities", vec!["d".to_string()]);
        assert_eq!(loaded, vec!["d".to_string()]);
    }

    #[test]
    fn test_legacy_key_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());

        // Simulate a blob written by an old installation.
        let legacy_file = AtomicJsonFile::<Value>::new(
            temp_dir.path().join("ngo_saathi_profile.json"),
        );
        legacy_file
            .save(&serde_json::json!({ "ngoName": "Old Trust" }))
            .unwrap();

        let loaded: NgoProfile = store.load_or(keys::PROFILE, NgoProfile::default());
        assert_eq!(loaded.ngo_name, "Old Trust");
    }

    #[test]
    fn test_legacy_activities_blob_round_trips() {
        use saathi_core::activity::Activity;

        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());

        // A full activity as written by an old installation: string address,
        // empty-string share code, and a null in-memory file handle.
        let blob = serde_json::json!([{
            "id": "lx9k2abc",
            "name": "Health Camp",
            "location": "Pune",
            "date": "2024-01-10",
            "contactPerson": { "name": "Ram", "contactNo": "9876543210" },
            "description": "",
            "media": [],
            "documents": [{
                "id": "lx9k2doc",
                "file": null,
                "fileName": "bill.jpg",
                "type": "bill",
                "comment": ""
            }],
            "beneficiaries": [{
                "id": "lx9k2ben",
                "firstName": "Sita",
                "middleName": "",
                "lastName": "Devi",
                "gender": "female",
                "caste": "general",
                "age": "30",
                "comment": "",
                "contactNo": "",
                "address": "Ward 4, Shivaji Nagar",
                "documentType": "aadhar",
                "documentNo": "",
                "referenceName": "",
                "referenceContact": "",
                "photo": null
            }],
            "shareCode": ""
        }]);
        AtomicJsonFile::<Value>::new(temp_dir.path().join("ngo_saathi_activities.json"))
            .save(&blob)
            .unwrap();

        let loaded: Vec<Activity> = store.load_or(keys::ACTIVITIES, Vec::new());
        assert_eq!(loaded.len(), 1);
        let activity = &loaded[0];
        assert_eq!(activity.name, "Health Camp");
        assert_eq!(activity.documents[0].file_name, "bill.jpg");
        assert_eq!(
            activity.beneficiaries[0].address.state,
            "Ward 4, Shivaji Nagar"
        );
        assert_eq!(activity.share_code.as_deref(), Some(""));
    }

    #[test]
    fn test_primary_key_wins_over_legacy() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());

        AtomicJsonFile::<Value>::new(temp_dir.path().join("ngo_saathi_profile.json"))
            .save(&serde_json::json!({ "ngoName": "Old Trust" }))
            .unwrap();
        let current = NgoProfile {
            ngo_name: "New Trust".to_string(),
            ..Default::default()
        };
        store.save(keys::PROFILE, &current).unwrap();

        let loaded: NgoProfile = store.load_or(keys::PROFILE, NgoProfile::default());
        assert_eq!(loaded.ngo_name, "New Trust");
    }

    #[test]
    fn test_writes_never_use_legacy_names() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());
        store.save(keys::LANGUAGE, &"hi").unwrap();

        assert!(temp_dir.path().join("ngo_language.json").exists());
        assert!(!temp_dir.path().join("ngo_saathi_language.json").exists());
    }

    #[test]
    fn test_path_like_keys_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());
        let err = store.save_value("../escape", &Value::Null).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_remove_deletes_slice_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());
        store.save(keys::PROFILE, &NgoProfile::default()).unwrap();

        store.remove(keys::PROFILE).unwrap();
        assert!(!temp_dir.path().join("ngo_profile.json").exists());
    }
}
