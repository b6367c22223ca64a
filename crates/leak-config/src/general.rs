//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_concurrency() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Maximum number of entities refreshed at the same time. `1` refreshes
    /// strictly one after another.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}
