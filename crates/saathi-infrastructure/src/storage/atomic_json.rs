//! Atomic JSON file operations.
//!
//! Provides a thin layer for safe access to per-slice JSON files:
//!
//! - **Atomicity**: updates are all-or-nothing via tmp file + atomic rename
//! - **Isolation**: an advisory file lock serializes concurrent writers
//! - **Durability**: explicit fsync before rename

use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use saathi_core::error::{Result, SaathiError};

/// A handle to a JSON file written atomically.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new handle for the file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file and deserializes it.
    ///
    /// Returns `None` when the file doesn't exist or is empty.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the file atomically: serialize, write to a tmp file in
    /// the same directory, fsync, rename over the target. The advisory lock
    /// serializes concurrent writers from separate processes.
    pub fn save(&self, data: &T) -> Result<()> {
        let _lock = FileLock::acquire(&self.path)?;
        self.write_atomic(data)
    }

    /// The unlocked write path; callers must hold the file lock.
    fn write_atomic(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Performs a locked read-modify-write cycle.
    ///
    /// The update closure receives the current data (or `default` when the
    /// file is absent) and its result is written back atomically.
    pub fn update<F>(&self, default: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut data = self.load()?.unwrap_or(default);
        f(&mut data)?;
        self.write_atomic(&data)
    }

    /// Removes the file. Removing an absent file is not an error.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self.path.parent().ok_or_else(|| {
            SaathiError::io(format!("path has no parent directory: {:?}", self.path))
        })?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| SaathiError::io(format!("path has no file name: {:?}", self.path)))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// An advisory file lock released on drop.
pub(crate) struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquires an exclusive lock next to `path`.
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| SaathiError::storage(format!("failed to acquire lock: {}", e)))?;
        }

        #[cfg(not(unix))]
        {
            // No advisory locking on non-Unix; acceptable for a single-user
            // desktop tool.
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestSlice {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestSlice>::new(temp_dir.path().join("slice.json"));

        let slice = TestSlice {
            name: "profile".to_string(),
            count: 42,
        };
        file.save(&slice).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, slice);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestSlice>::new(temp_dir.path().join("missing.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_creates_and_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestSlice>::new(temp_dir.path().join("slice.json"));
        let default = TestSlice {
            name: "default".to_string(),
            count: 0,
        };

        file.update(default.clone(), |slice| {
            slice.count += 10;
            Ok(())
        })
        .unwrap();
        file.update(default, |slice| {
            slice.count += 5;
            Ok(())
        })
        .unwrap();

        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slice.json");
        let file = AtomicJsonFile::<TestSlice>::new(path.clone());

        file.save(&TestSlice {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".slice.json.tmp").exists());
    }

    #[test]
    fn test_save_releases_its_lock() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slice.json");
        let file = AtomicJsonFile::<TestSlice>::new(path.clone());

        file.save(&TestSlice {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();

        // Lock file is removed, and a later writer can lock again.
        assert!(!path.with_extension("lock").exists());
        file.save(&TestSlice {
            name: "y".to_string(),
            count: 2,
        })
        .unwrap();
        assert_eq!(file.load().unwrap().unwrap().count, 2);
    }

    #[test]
    fn test_concurrent_saves_leave_a_parsable_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slice.json");

        let handles: Vec<_> = (0..4)
            .map(|writer| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let file = AtomicJsonFile::<TestSlice>::new(path);
                    for round in 0..10 {
                        file.save(&TestSlice {
                            name: format!("writer-{}", writer),
                            count: round,
                        })
                        .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let file = AtomicJsonFile::<TestSlice>::new(path);
        let last = file.load().unwrap().unwrap();
        assert_eq!(last.count, 9);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestSlice>::new(temp_dir.path().join("slice.json"));
        file.save(&TestSlice {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();

        file.delete().unwrap();
        file.delete().unwrap();
        assert!(file.load().unwrap().is_none());
    }
}
