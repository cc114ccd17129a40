//! Typed collections over map backends.

mod codec;

pub use codec::Record;

use crate::entity::RecordId;
use crate::error::ServiceResult;
use std::marker::PhantomData;
use swapshelf_storage::MapBackend;

/// A typed collection of records.
///
/// `Collection<T>` provides type-safe access to records of type `T`
/// stored in an opaque [`MapBackend`], handling CBOR encoding and
/// decoding automatically.
///
/// Every read returns a decoded value copy; records are never shared by
/// reference with callers.
///
/// # Querying
///
/// There is no query language. Filtering is done with host-language
/// iterators over [`Collection::values`]:
///
/// ```rust,ignore
/// let fantasy: Vec<Book> = books
///     .values()?
///     .into_iter()
///     .filter(|b| b.genre.eq_ignore_ascii_case("fantasy"))
///     .collect();
/// ```
pub struct Collection<T: Record> {
    /// Collection name for display and logging.
    name: &'static str,
    /// The backing map.
    backend: Box<dyn MapBackend>,
    /// Type marker.
    _marker: PhantomData<T>,
}

impl<T: Record> Collection<T> {
    /// Creates a new typed collection over `backend`.
    pub fn new(name: &'static str, backend: Box<dyn MapBackend>) -> Self {
        Self {
            name,
            backend,
            _marker: PhantomData,
        }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Gets a record by ID.
    ///
    /// Returns `None` if the record doesn't exist.
    pub fn get(&self, id: RecordId) -> ServiceResult<Option<T>> {
        match self.backend.get(&id.key())? {
            Some(bytes) => Ok(Some(codec::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Inserts a record, overwriting any previous record with the same ID.
    pub fn insert(&mut self, record: &T) -> ServiceResult<()> {
        let bytes = codec::encode(record)?;
        self.backend.insert(&record.record_id().key(), bytes)?;
        Ok(())
    }

    /// Removes a record by ID.
    ///
    /// Removing an absent ID is a no-op; callers that need to surface a
    /// missing record check existence first.
    pub fn remove(&mut self, id: RecordId) -> ServiceResult<()> {
        self.backend.remove(&id.key())?;
        Ok(())
    }

    /// Checks if a record exists.
    pub fn contains(&self, id: RecordId) -> ServiceResult<bool> {
        Ok(self.backend.get(&id.key())?.is_some())
    }

    /// Returns all records in backend key order.
    ///
    /// **Warning**: This is a full scan. The order is the backing map's
    /// key order, not insertion order; callers sort explicitly when order
    /// matters.
    pub fn values(&self) -> ServiceResult<Vec<T>> {
        let raw = self.backend.values()?;
        let mut records = Vec::with_capacity(raw.len());
        for bytes in raw {
            records.push(codec::decode(&bytes)?);
        }
        Ok(records)
    }

    /// Returns the number of records in the collection.
    pub fn len(&self) -> ServiceResult<usize> {
        Ok(self.backend.len()?)
    }

    /// Returns `true` if the collection holds no records.
    pub fn is_empty(&self) -> ServiceResult<bool> {
        Ok(self.backend.is_empty()?)
    }
}

impl<T: Record> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use swapshelf_storage::MemoryBackend;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        id: RecordId,
        label: String,
    }

    impl Record for TestRecord {
        fn record_id(&self) -> RecordId {
            self.id
        }
    }

    fn test_collection() -> Collection<TestRecord> {
        Collection::new("test", Box::new(MemoryBackend::new()))
    }

    fn record(label: &str) -> TestRecord {
        TestRecord {
            id: RecordId::new(),
            label: label.to_string(),
        }
    }

    #[test]
    fn insert_and_get() {
        let mut collection = test_collection();
        let rec = record("alice");

        collection.insert(&rec).unwrap();

        let found = collection.get(rec.id).unwrap();
        assert_eq!(found, Some(rec));
    }

    #[test]
    fn get_nonexistent() {
        let collection = test_collection();
        assert!(collection.get(RecordId::new()).unwrap().is_none());
    }

    #[test]
    fn insert_overwrites() {
        let mut collection = test_collection();
        let mut rec = record("before");
        collection.insert(&rec).unwrap();

        rec.label = "after".to_string();
        collection.insert(&rec).unwrap();

        assert_eq!(collection.len().unwrap(), 1);
        assert_eq!(collection.get(rec.id).unwrap().unwrap().label, "after");
    }

    #[test]
    fn remove_record() {
        let mut collection = test_collection();
        let rec = record("bob");
        collection.insert(&rec).unwrap();
        assert!(collection.contains(rec.id).unwrap());

        collection.remove(rec.id).unwrap();
        assert!(!collection.contains(rec.id).unwrap());
    }

    #[test]
    fn values_returns_copies_of_all() {
        let mut collection = test_collection();
        let records = vec![record("a"), record("b"), record("c")];
        for rec in &records {
            collection.insert(rec).unwrap();
        }

        let scanned = collection.values().unwrap();
        assert_eq!(scanned.len(), 3);
        for rec in &records {
            assert!(scanned.contains(rec));
        }
    }

    #[test]
    fn len_and_is_empty() {
        let mut collection = test_collection();
        assert!(collection.is_empty().unwrap());

        collection.insert(&record("x")).unwrap();
        assert_eq!(collection.len().unwrap(), 1);
        assert!(!collection.is_empty().unwrap());
    }

    #[test]
    fn collection_metadata() {
        let collection = test_collection();
        assert_eq!(collection.name(), "test");
    }
}
