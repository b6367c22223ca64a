//! Display-name normalization.
//!
//! Scrapers are registered under a normalized identifier derived from the
//! entity's public display name: spaces, hyphens, parentheses, and periods are
//! removed and the remainder is lowercased. `"LockBit 3.0"` becomes
//! `"lockbit30"`.
//!
//! Distinct display names may collapse to the same identifier (`"Play"` and
//! `"P.lay"` both become `"play"`); such entities share one scraper binding.

/// Characters stripped from a display name before lowercasing.
const STRIPPED: [char; 5] = [' ', '-', '(', ')', '.'];

/// Normalize an entity display name into a scraper identifier.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(display_name: &str) -> String {
    display_name
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}
