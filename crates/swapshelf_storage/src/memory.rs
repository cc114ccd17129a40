//! In-memory map backend for testing.

use crate::backend::MapBackend;
use crate::error::StorageResult;
use std::collections::BTreeMap;

/// An in-memory map backend.
///
/// This backend stores all entries in a `BTreeMap` and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral registries that don't need persistence
///
/// Iteration order is the map's key order (lexicographic over the
/// identifier strings), not insertion order.
///
/// # Example
///
/// ```rust
/// use swapshelf_storage::{MapBackend, MemoryBackend};
///
/// let mut backend = MemoryBackend::new();
/// backend.insert("book-1", b"data".to_vec()).unwrap();
/// assert_eq!(backend.len().unwrap(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory backend with pre-existing entries.
    ///
    /// Useful for testing populated scenarios.
    #[must_use]
    pub fn with_entries(entries: BTreeMap<String, Vec<u8>>) -> Self {
        Self { entries }
    }

    /// Returns all keys currently stored, in map order.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Clears all entries from the backend.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl MapBackend for MemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn insert(&mut self, key: &str, value: Vec<u8>) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn values(&self) -> StorageResult<Vec<Vec<u8>>> {
        Ok(self.entries.values().cloned().collect())
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self.entries.len())
    }
}
