//! Database error types for leak-db.

use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A stored snapshot could not be decoded.
    #[error("Malformed snapshot for '{entity}': {reason}")]
    MalformedSnapshot { entity: String, reason: String },

    /// A stored directory index could not be decoded.
    #[error("Malformed directory index '{namespace}': {reason}")]
    MalformedDirectory { namespace: String, reason: String },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
