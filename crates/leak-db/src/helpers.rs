//! JSON decoding helpers for stored values.
//!
//! Values are written by this crate but may also come from older tooling that
//! shared the same store, so decode failures are reported per key rather than
//! failing a whole partition.

use leak_core::entities::Snapshot;
use leak_core::namespace::Namespace;

use crate::error::DatabaseError;

/// Decode a stored snapshot.
///
/// # Errors
///
/// Returns `DatabaseError::MalformedSnapshot` if `raw` is not a JSON array of posts.
pub fn decode_snapshot(entity: &str, raw: &str) -> Result<Snapshot, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::MalformedSnapshot {
        entity: entity.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a stored directory index.
///
/// # Errors
///
/// Returns `DatabaseError::MalformedDirectory` if `raw` is not a JSON array of strings.
pub fn decode_directory(namespace: Namespace, raw: &str) -> Result<Vec<String>, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::MalformedDirectory {
        namespace: namespace.to_string(),
        reason: e.to_string(),
    })
}

/// Encode any serializable value as compact JSON.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::Other(e.into()))
}
