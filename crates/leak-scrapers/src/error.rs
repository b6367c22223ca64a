//! Scraper error types.

use thiserror::Error;

/// Errors raised while resolving or running a scraper.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// No scraper is registered under the entity's normalized identifier.
    #[error("no scraper registered for '{identifier}'")]
    NotFound {
        /// Normalized identifier that was looked up.
        identifier: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The site returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the site.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The site answered with a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a scraped page or feed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The scraper panicked or was cancelled before producing a result.
    #[error("scraper aborted: {0}")]
    Aborted(String),

    /// Scraper-specific failure.
    #[error("{0}")]
    Failed(String),
}
