//! Key-Value Storage Port
//!
//! Durable state is kept in named slots holding serialized text, the same
//! model as browser local storage. The `KeyValueStore` trait is the port;
//! two adapters are provided:
//!
//! - **InMemoryStore**: a shared map, used by tests and throwaway sessions
//! - **FileStore**: one `<key>.json` file per slot inside a directory
//!
//! # Usage
//!
//! ```rust
//! use core_kernel::{KeyValueStore, InMemoryStore};
//!
//! let mut store = InMemoryStore::new();
//! store.write("partes_interessadas", "[]").unwrap();
//! assert_eq!(store.read("partes_interessadas").unwrap().as_deref(), Some("[]"));
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Errors raised by storage adapters
#[derive(Debug, Error)]
pub enum StorageError {
    /// The slot key cannot be used by this adapter
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// An I/O operation on the backing medium failed
    #[error("I/O error on slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The store cannot be used at all (poisoned lock, detached medium, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn io(key: impl Into<String>, source: io::Error) -> Self {
        StorageError::Io {
            key: key.into(),
            source,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        StorageError::Unavailable(message.into())
    }
}

/// Port for durable named slots of serialized text
pub trait KeyValueStore: Send {
    /// Reads a slot; a slot that was never written yields `Ok(None)`
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the content of a slot
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect (or corrupt) what a registry persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one slot pre-populated
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self {
            slots: Arc::new(RwLock::new(slots)),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| StorageError::unavailable("in-memory store lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::unavailable("in-memory store lock poisoned"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store, one JSON file per slot
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing `key`
    ///
    /// Keys are restricted to ASCII alphanumerics, `_` and `-` so a key can
    /// never escape the root directory.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(key, e))?;

        // Write beside the target and rename so readers never see a torn file
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).map_err(|e| StorageError::io(key, e))?;
        fs::rename(&staging, &path).map_err(|e| StorageError::io(key, e))?;

        tracing::trace!(key, path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }
}
