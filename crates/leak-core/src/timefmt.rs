//! Serde adapters for post discovery timestamps.
//!
//! Timestamps are naive local time written as `YYYY-MM-DD HH:MM:SS`. Scrapers
//! sometimes emit fractional seconds or an ISO `T` separator; both are
//! accepted on read. Fractional seconds are written back only when non-zero.

use chrono::NaiveDateTime;

/// Canonical write format.
pub const DISCOVERED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// ISO-style variant accepted on read.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a discovery timestamp in the canonical or ISO format.
///
/// # Errors
///
/// Returns the canonical format's parse error if neither format matches.
pub fn parse_discovered(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DISCOVERED_FORMAT)
        .or_else(|e| NaiveDateTime::parse_from_str(s, ISO_FORMAT).map_err(|_| e))
}

/// Format a discovery timestamp in the canonical format.
#[must_use]
pub fn format_discovered(dt: &NaiveDateTime) -> String {
    dt.format(DISCOVERED_FORMAT).to_string()
}

/// `#[serde(with = "...")]` adapter for `Option<NaiveDateTime>`.
pub mod option {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as the canonical string, or `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&super::format_discovered(dt)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from a string (any accepted format) or `null`.
    ///
    /// An empty string is treated as absent.
    ///
    /// # Errors
    ///
    /// Fails when a non-empty string matches none of the accepted formats.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.trim().is_empty() => super::parse_discovered(&s)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid discovered '{s}': {e}"))),
            _ => Ok(None),
        }
    }
}
