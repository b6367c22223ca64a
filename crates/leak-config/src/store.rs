//! Key-value store configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "leakwatch.db".to_string()
}

/// Location of the libSQL database backing the entity registry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Database file path, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl StoreConfig {
    /// Whether the store lives only in memory (nothing to lock on disk).
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
