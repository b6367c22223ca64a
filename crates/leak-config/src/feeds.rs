//! Statically configured JSON feed scrapers.
//!
//! Each `[[feeds]]` entry binds one entity to a URL serving a JSON array of
//! posts. Feed names are also the entity list used by the collection step of
//! `leakwatch cycle`.

use std::time::Duration;

use leak_core::namespace::Namespace;
use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_namespace() -> Namespace {
    Namespace::Groups
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FeedConfig {
    /// Entity display name, e.g. `"LockBit 3.0"`.
    pub name: String,

    #[serde(default = "default_namespace")]
    pub namespace: Namespace,

    /// URL returning a JSON array of posts.
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl FeedConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
