//! # leak-scrapers
//!
//! Scraper abstraction and lookup for leakwatch.
//!
//! Every tracked entity is refreshed by a scraper: a stateless unit that
//! fetches the entity's site and returns its current posts. Scrapers are
//! registered at start-up in a [`ScraperRegistry`] under the normalized form
//! of the entity's display name (see [`leak_core::naming::normalize`]), and
//! resolved the same way at refresh time.
//!
//! Bespoke per-site scrapers live outside this crate; [`FeedScraper`] is the
//! built-in generic implementation for sites exposing a JSON post feed.

mod error;
pub mod feed;
pub mod http;
mod registry;

pub use error::ScraperError;
pub use feed::FeedScraper;
pub use registry::ScraperRegistry;

use async_trait::async_trait;
use leak_core::entities::Snapshot;

/// A per-entity refresh capability.
///
/// Implementations perform their own network access, parsing, and timeouts.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Fetch the entity's current posts.
    ///
    /// Returns `Ok(Some(posts))` with a non-empty snapshot that replaces the
    /// stored one, or `Ok(None)` when there is nothing to store.
    ///
    /// # Errors
    ///
    /// Transport and parse failures must be reported as [`ScraperError`],
    /// never as a partial or malformed snapshot.
    async fn refresh(&self) -> Result<Option<Snapshot>, ScraperError>;
}
