//! Pure functions for encoding item collections to and from cache bytes.
//!
//! Snapshots are written as a versioned JSON envelope:
//!
//! ```json
//! {"version":1,"items":[{"id":"…","listId":"…","name":"Milk",…}]}
//! ```
//!
//! A bare JSON array of items (the unversioned layout) is still accepted on
//! read. An envelope carrying any other version decodes to
//! [`Snapshot::Unsupported`] so the caller can treat it as a miss and
//! overwrite it.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::todo::TodoItem;

/// Schema version written by [`encode_snapshot`].
pub const SNAPSHOT_VERSION: u64 = 1;

/// Errors that can occur during snapshot serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// A decoded cache value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// Envelope at [`SNAPSHOT_VERSION`].
    Current(Vec<TodoItem>),
    /// Bare array without an envelope.
    Legacy(Vec<TodoItem>),
    /// Envelope with a version this build does not understand.
    Unsupported(u64),
}

impl Snapshot {
    /// Returns the items when the snapshot is readable.
    pub fn into_items(self) -> Option<Vec<TodoItem>> {
        match self {
            Snapshot::Current(items) | Snapshot::Legacy(items) => Some(items),
            Snapshot::Unsupported(_) => None,
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    items: &'a [TodoItem],
}

/// Serializes an item collection into a versioned snapshot.
pub fn encode_snapshot(items: &[TodoItem]) -> Result<Vec<u8>> {
    serde_json::to_vec(&Envelope {
        version: SNAPSHOT_VERSION,
        items,
    })
    .map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes cache bytes into a [`Snapshot`].
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))?;

    match value {
        Value::Array(_) => items_from_value(value).map(Snapshot::Legacy),
        Value::Object(mut map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    SerializationError::DeserializeFailed(
                        "snapshot envelope without a numeric version".to_string(),
                    )
                })?;

            if version != SNAPSHOT_VERSION {
                return Ok(Snapshot::Unsupported(version));
            }

            let items = map.remove("items").ok_or_else(|| {
                SerializationError::DeserializeFailed("snapshot envelope without items".to_string())
            })?;
            items_from_value(items).map(Snapshot::Current)
        }
        other => Err(SerializationError::DeserializeFailed(format!(
            "unexpected snapshot value: {other}"
        ))),
    }
}

fn items_from_value(value: Value) -> Result<Vec<TodoItem>> {
    serde_json::from_value(value).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::ItemState;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn fixed_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    fn test_list_id() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()
    }

    fn milk() -> TodoItem {
        TodoItem::new(test_list_id(), "Milk")
            .with_id(Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap())
            .with_created_date(fixed_timestamp())
    }

    #[test]
    fn test_encode_writes_current_version() {
        let bytes = encode_snapshot(&[milk()]).expect("encode should succeed");
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["version"], SNAPSHOT_VERSION);
        assert_eq!(json["items"][0]["name"], "Milk");
        assert_eq!(json["items"][0]["listId"], test_list_id().to_string());
        assert_eq!(json["items"][0]["state"], "not-started");
    }

    #[test]
    fn test_decode_preserves_order() {
        let second = TodoItem::new(test_list_id(), "Eggs")
            .with_state(ItemState::Completed)
            .with_created_date(fixed_timestamp());
        let items = vec![milk(), second];

        let bytes = encode_snapshot(&items).unwrap();
        let snapshot = decode_snapshot(&bytes).expect("decode should succeed");

        assert_eq!(snapshot, Snapshot::Current(items));
    }

    #[test]
    fn test_empty_collection_is_not_empty_bytes() {
        let bytes = encode_snapshot(&[]).unwrap();

        assert!(!bytes.is_empty());
        assert_eq!(
            decode_snapshot(&bytes).unwrap().into_items(),
            Some(Vec::new())
        );
    }

    #[test]
    fn test_decode_accepts_bare_array() {
        let bytes = serde_json::to_vec(&vec![milk()]).unwrap();

        let snapshot = decode_snapshot(&bytes).unwrap();

        assert_eq!(snapshot, Snapshot::Legacy(vec![milk()]));
    }

    #[test]
    fn test_decode_unknown_version_is_unsupported() {
        let bytes = br#"{"version":2,"items":[{"shape":"changed"}]}"#;

        let snapshot = decode_snapshot(bytes).unwrap();

        assert_eq!(snapshot, Snapshot::Unsupported(2));
        assert_eq!(snapshot.into_items(), None);
    }

    #[test]
    fn test_decode_malformed_bytes() {
        let result = decode_snapshot(b"not valid json");

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_decode_envelope_without_version() {
        let result = decode_snapshot(br#"{"items":[]}"#);

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_decode_scalar_is_rejected() {
        assert!(decode_snapshot(b"42").is_err());
    }
}
