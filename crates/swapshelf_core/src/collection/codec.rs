//! Record trait and CBOR codec for typed collections.

use crate::entity::RecordId;
use crate::error::{ServiceError, ServiceResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for types stored in a registry collection.
///
/// Implementors provide their stable identifier; serialization is
/// derived, and the collection layer encodes records as CBOR.
pub trait Record: Serialize + DeserializeOwned {
    /// Returns the record's stable, immutable identifier.
    ///
    /// This ID must not change over the record's lifetime; its string
    /// form is the storage key.
    fn record_id(&self) -> RecordId;
}

/// Encodes a record to CBOR bytes.
pub(crate) fn encode<T: Record>(record: &T) -> ServiceResult<Vec<u8>> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(record, &mut bytes)
        .map_err(|err| ServiceError::codec(err.to_string()))?;
    Ok(bytes)
}

/// Decodes a record from CBOR bytes.
pub(crate) fn decode<T: Record>(bytes: &[u8]) -> ServiceResult<T> {
    ciborium::de::from_reader(bytes).map_err(|err| ServiceError::codec(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        id: RecordId,
        label: String,
        value: i64,
    }

    impl Record for TestRecord {
        fn record_id(&self) -> RecordId {
            self.id
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let record = TestRecord {
            id: RecordId::new(),
            label: "test".to_string(),
            value: 42,
        };

        let bytes = encode(&record).unwrap();
        let decoded: TestRecord = decode(&bytes).unwrap();

        assert_eq!(record, decoded);
    }

    #[test]
    fn decode_garbage_is_codec_error() {
        let result: ServiceResult<TestRecord> = decode(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(ServiceError::Codec { .. })));
    }

    #[test]
    fn deterministic_encoding() {
        let record = TestRecord {
            id: RecordId::new(),
            label: "test".to_string(),
            value: 7,
        };

        assert_eq!(encode(&record).unwrap(), encode(&record).unwrap());
    }
}
