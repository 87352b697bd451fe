//! Key-value backends for the long-lived and session slots
//!
//! Both backends store plain strings. The quote collection is stored as a
//! JSON document under a single key, so every save replaces the whole value.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse store JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// String key-value slot storage
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Long-lived store backed by a single JSON object file
///
/// The file is re-read on every access so that several handles on the same
/// path always observe each other's writes. Writes go through a temporary
/// file and a rename, so readers see either the old or the new document.
#[derive(Debug, Clone)]
pub struct FileStore {
    file_path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.file_path.exists() {
            debug!("Store file {:?} not found, treating as empty", self.file_path);
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Entries to build the next write on; a corrupt file is replaced
    fn entries_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.read_entries() {
            Ok(entries) => Ok(entries),
            Err(StorageError::Parse(e)) => {
                warn!("Store file {:?} is corrupt, overwriting: {}", self.file_path, e);
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;

        let mut tmp_name = self.file_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.file_path)?;

        debug!("Wrote {} keys to {:?}", entries.len(), self.file_path);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// Session-scoped store held in process memory
///
/// Clones share the same slots; everything is gone once the last clone is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        assert_eq!(store.get("quotes").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_and_get() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("store.json"));

        store.set("quotes", "[]").unwrap();
        store.set("lastSelectedCategory", "Life").unwrap();

        assert_eq!(store.get("quotes").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("lastSelectedCategory").unwrap().as_deref(), Some("Life"));
        assert!(!dir.path().join("nested").join("store.json.tmp").exists());
    }

    #[test]
    fn test_file_store_handles_share_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let first = FileStore::new(&path);
        let second = FileStore::new(&path);

        first.set("quotes", "[1]").unwrap();
        assert_eq!(second.get("quotes").unwrap().as_deref(), Some("[1]"));

        second.set("quotes", "[2]").unwrap();
        assert_eq!(first.get("quotes").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(&path);

        assert!(matches!(store.get("quotes"), Err(StorageError::Parse(_))));

        // A write replaces the corrupt document
        store.set("quotes", "[]").unwrap();
        assert_eq!(store.get("quotes").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_store_clones_share_slots() {
        let session = MemoryStore::new();
        let other = session.clone();

        session.set("lastQuote", "Carpe diem").unwrap();
        assert_eq!(other.get("lastQuote").unwrap().as_deref(), Some("Carpe diem"));
        assert_eq!(other.len(), 1);
        assert!(!session.is_empty());
    }
}
