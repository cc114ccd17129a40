//! Record identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a record.
///
/// Record IDs are UUID-backed opaque strings that are:
/// - Generated by the registry on creation
/// - Globally unique within a registry
/// - Immutable once assigned
/// - Never reused
///
/// The string form (`Display`) is the key under which the record is
/// stored in its map backend.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random record ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record ID from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Converts to the underlying UUID.
    #[must_use]
    pub const fn to_uuid(self) -> Uuid {
        self.0
    }

    /// Returns the storage key for this ID.
    #[must_use]
    pub fn key(&self) -> String {
        self.0.to_string()
    }

    /// Parses a record ID from its string form.
    ///
    /// Returns `None` if the string is not a valid identifier.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::from_str(value).ok().map(Self)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RecordId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<RecordId> for Uuid {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_unique() {
        let id1 = RecordId::new();
        let id2 = RecordId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn key_matches_display() {
        let id = RecordId::new();
        assert_eq!(id.key(), id.to_string());
    }

    #[test]
    fn parse_roundtrip() {
        let id = RecordId::new();
        let parsed = RecordId::parse(&id.key()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(RecordId::parse("not-an-id").is_none());
        assert!(RecordId::parse("").is_none());
    }

    #[test]
    fn uuid_conversion() {
        let uuid = Uuid::new_v4();
        let id = RecordId::from_uuid(uuid);
        assert_eq!(id.to_uuid(), uuid);
    }
}
