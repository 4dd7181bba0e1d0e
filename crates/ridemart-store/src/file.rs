//! JSON-file backed store
//!
//! All keys live in a single `storage.json` under the store directory,
//! rewritten in full after every mutation.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ridemart_types::StorageError;
use tracing::{debug, warn};

use crate::KeyValueStore;

const STORE_FILE: &str = "storage.json";

pub struct FileKeyValueStore {
    store_path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Create or load a store. An unreadable or corrupt file starts empty.
    pub fn open(store_dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(STORE_FILE);

        let entries = if store_path.exists() {
            load_entries(&store_path)
        } else {
            BTreeMap::new()
        };
        debug!(path = %store_path.display(), keys = entries.len(), "opened storage");

        Ok(Self {
            store_path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Save store to disk
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, entries).map_err(|e| StorageError::Serialize {
            key: STORE_FILE.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "storage unreadable, starting empty");
            return BTreeMap::new();
        }
    };
    match serde_json::from_reader(BufReader::new(file)) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "storage corrupt, starting empty");
            BTreeMap::new()
        }
    }
}

fn poisoned() -> StorageError {
    StorageError::Io(std::io::Error::other("storage lock poisoned"))
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = FileKeyValueStore::open(dir.path().to_path_buf()).unwrap();
            store.set("myVehicleIds", "[9,10]").unwrap();
        }
        let store = FileKeyValueStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("myVehicleIds").unwrap().as_deref(), Some("[9,10]"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), "{not json").unwrap();

        let store = FileKeyValueStore::open(dir.path().to_path_buf()).unwrap();
        assert!(store.get("userAddedVehicles").unwrap().is_none());

        store.set("userAddedVehicles", "[]").unwrap();
        let reopened = FileKeyValueStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get("userAddedVehicles").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path().to_path_buf()).unwrap();
        store.set("favorites_Alice", "[1]").unwrap();
        store.remove("favorites_Alice").unwrap();

        let reopened = FileKeyValueStore::open(dir.path().to_path_buf()).unwrap();
        assert!(reopened.get("favorites_Alice").unwrap().is_none());
    }
}
