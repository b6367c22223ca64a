//! Store namespaces.
//!
//! Groups and leak sites are tracked in independent namespaces. Each namespace
//! owns a directory index (which entities exist) and a snapshot partition
//! (their posts). Nothing done in one namespace touches the other.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// An independent partition of tracked entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Ransomware groups.
    Groups,
    /// Standalone leak sites.
    Leaks,
}

impl Namespace {
    /// Every namespace, in processing order.
    pub const ALL: [Self; 2] = [Self::Groups, Self::Leaks];

    /// Return the string representation used for storage keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groups => "groups",
            Self::Leaks => "leaks",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groups" | "group" => Ok(Self::Groups),
            "leaks" | "leak" => Ok(Self::Leaks),
            other => Err(CoreError::UnknownNamespace(other.to_string())),
        }
    }
}
