//! Storage Test Helpers
//!
//! Adapters for exercising the registry's persistence edge cases: a store
//! that fails on demand, and file stores rooted in a temporary directory.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use core_kernel::{FileStore, InMemoryStore, KeyValueStore, StorageError};
use tempfile::TempDir;

/// Store wrapper whose reads and writes can be made to fail
///
/// Clones share the failure switches and the wrapped store, so a test can
/// keep a handle after moving the store into a registry.
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    inner: InMemoryStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing in-memory store
    pub fn wrapping(inner: InMemoryStore) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of write attempts, failed ones included
    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The wrapped store, for inspecting what actually got persisted
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }
}

impl KeyValueStore for FailingStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable(format!("read of {key} refused")));
        }
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable(format!("quota exceeded for {key}")));
        }
        self.inner.write(key, value)
    }
}

/// A file store in a fresh temporary directory
///
/// The directory is deleted when the returned guard is dropped.
pub fn temp_file_store() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
    let store = FileStore::new(dir.path());
    (dir, store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switches_are_shared_between_clones() {
        let store = FailingStore::new();
        let mut handle = store.clone();

        store.fail_writes(true);
        assert!(handle.write("slot", "[]").is_err());

        store.fail_writes(false);
        handle.write("slot", "[]").unwrap();
        assert_eq!(store.inner().read("slot").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.write_attempts(), 2);
    }
}
