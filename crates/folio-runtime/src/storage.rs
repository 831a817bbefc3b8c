#![forbid(unsafe_code)]

//! Key/value persistence for small pieces of UI state.
//!
//! Values are opaque strings; callers own their encoding. Two backends exist:
//! [`MemoryStorage`] for tests and ephemeral sessions, and [`FileStorage`],
//! which keeps every key in a single JSON object on disk and writes through
//! on each mutation.
//!
//! Persisted state is a convenience, never a requirement: a missing or
//! unreadable file opens as an empty store and the problem is logged.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode storage file: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string key/value store.
pub trait StorageBackend {
    /// Human readable backend name for logs.
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> StorageResult<()>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    fn keys(&self) -> Vec<String>;
}

/// Single-threaded handle shared by every store of one program.
pub type SharedStorage = Rc<RefCell<dyn StorageBackend>>;

/// Wrap a backend into a [`SharedStorage`] handle.
pub fn shared(backend: impl StorageBackend + 'static) -> SharedStorage {
    Rc::new(RefCell::new(backend))
}

/// In-memory backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, handy for seeding tests.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> StorageResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// JSON file backend: `{ "key": "value", ... }`.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// File name used inside a data directory.
    pub const FILE_NAME: &'static str = "state.json";

    /// Open `dir/state.json`, creating `dir` when needed.
    pub fn open_dir(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self::open(dir.join(Self::FILE_NAME)))
    }

    /// Open a storage file. Missing or corrupt files yield an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable storage file");
                BTreeMap::new()
            }
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened storage");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> StorageResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|err| StorageError::Corrupt {
            path: path.to_owned(),
            reason: err.to_string(),
        })
    }

    fn flush(&self) -> StorageResult<()> {
        let encoded = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> StorageResult<()> {
        self.entries.insert(key.to_owned(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn memory_roundtrip_and_remove() {
        let mut store = MemoryStorage::new();
        store.set("theme", "dark".into()).unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn file_storage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStorage::open_dir(dir.path()).unwrap();
            store.set("theme", "ocean".into()).unwrap();
            store.set("contactForm", "{}".into()).unwrap();
            store.remove("contactForm").unwrap();
        }
        let store = FileStorage::open_dir(dir.path()).unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("ocean"));
        assert_eq!(store.keys(), vec!["theme".to_string()]);
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::open(dir.path().join("nope.json"));
        assert!(store.keys().is_empty());
    }

    #[traced_test]
    #[test]
    fn corrupt_file_opens_empty_and_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FileStorage::FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileStorage::open(&path);
        assert!(store.keys().is_empty());
        assert!(logs_contain("ignoring unreadable storage file"));

        store.set("theme", "light".into()).unwrap();
        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn shared_handle_sees_writes() {
        let storage = shared(MemoryStorage::new());
        let other = Rc::clone(&storage);
        storage.borrow_mut().set("k", "v".into()).unwrap();
        assert_eq!(other.borrow().get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(storage.borrow().name(), "memory");
    }
}
