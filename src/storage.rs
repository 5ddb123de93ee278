//! Durable key-value storage for dashboard preferences.
//!
//! Only two keys are persisted: the grid/list view mode and the active team
//! id. Everything else in the state tree is rebuilt from the API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::{fs, io};

/// Store for the handful of preferences that survive a restart.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Best-effort write; persistence failures are logged, never surfaced.
    fn set(&self, key: &str, value: &str);
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
struct StoreData {
    entries: BTreeMap<String, String>,
}

impl StoreData {
    /// Loads store contents from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    fn load_from_file(path: &Path) -> Result<Self, io::Error> {
        let buf = fs::read(path)?;
        let data: StoreData = serde_json::from_slice(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(data)
    }

    /// Saves the store contents to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites
    /// existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    fn save(&self, path: &Path) -> Result<(), io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// JSON-file-backed store, the production implementation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl FileStore {
    /// Opens the store at `path`, reading any previously persisted entries.
    /// A missing file yields an empty store; an unreadable one is an error.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if the file exists but cannot be parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, io::Error> {
        let path = path.into();
        let data = if path.exists() {
            StoreData::load_from_file(&path)?
        } else {
            StoreData::default()
        };
        Ok(FileStore {
            path,
            data: Mutex::new(data),
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = data.save(&self.path) {
            log::warn!("Failed to persist {} to {}: {}", key, self.path.display(), e);
        }
    }
}

/// In-process store for tests and embedders that bring their own persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Reopening a store should recover previously set entries.
    fn test_open_recovers_saved_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let store = FileStore::open(&path).unwrap();
        store.set("view_mode", "list");
        store.set("team_id", "team-1");

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("view_mode"), Some("list".to_string()));
        assert_eq!(reopened.get("team_id"), Some("team-1".to_string()));
    }

    #[test]
    // Setting an entry should create parent directories if they don't exist.
    fn test_set_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("preferences.json");

        let store = FileStore::open(&path).unwrap();
        store.set("view_mode", "grid");

        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
        assert!(path.exists(), "Store file does not exist");
    }

    #[test]
    // Later writes to the same key should overwrite earlier ones.
    fn test_set_overwrites_existing_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let store = FileStore::open(&path).unwrap();
        store.set("team_id", "team-1");
        store.set("team_id", "team-2");

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("team_id"), Some("team-2".to_string()));
    }

    #[test]
    // Opening an invalid JSON file should return an error.
    fn test_open_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = FileStore::open(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);
        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));
    }
}
