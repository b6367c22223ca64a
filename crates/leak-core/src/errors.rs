//! Cross-cutting error types for leakwatch.
//!
//! Domain-specific errors (`DatabaseError`, `ScraperError`, `NotifyError`) are
//! defined in their respective crates and converge into `anyhow` in `leak-cli`.

use thiserror::Error;

/// Errors that can be raised by any leakwatch crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {namespace} {name}")]
    NotFound { namespace: String, name: String },

    /// A namespace string did not match any known namespace.
    #[error("Unknown namespace: {0} (expected 'groups' or 'leaks')")]
    UnknownNamespace(String),
}
