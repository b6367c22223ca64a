//! Generic JSON feed scraper.
//!
//! Fetches a URL that serves the entity's posts as JSON, either a bare array
//! or an object with a `posts` array. Used for sites (or intermediate
//! collectors) that already expose structured data.

use std::time::Duration;

use async_trait::async_trait;
use leak_core::entities::Snapshot;
use serde::Deserialize;

use crate::Scraper;
use crate::error::ScraperError;
use crate::http::check_response;

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedBody {
    Posts(Snapshot),
    Envelope { posts: Snapshot },
}

impl FeedBody {
    fn into_posts(self) -> Snapshot {
        match self {
            Self::Posts(posts) | Self::Envelope { posts } => posts,
        }
    }
}

/// Decode a feed body into a snapshot; an empty feed yields `None`.
///
/// # Errors
///
/// Returns [`ScraperError::Parse`] if the body is neither shape.
pub fn parse_feed(body: &str) -> Result<Option<Snapshot>, ScraperError> {
    let posts = serde_json::from_str::<FeedBody>(body)
        .map_err(|e| ScraperError::Parse(format!("feed body: {e}")))?
        .into_posts();
    Ok(if posts.is_empty() { None } else { Some(posts) })
}

/// Scraper that reads posts from a JSON endpoint.
#[derive(Debug, Clone)]
pub struct FeedScraper {
    http: reqwest::Client,
    url: String,
}

impl FeedScraper {
    /// Create a feed scraper with its own request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("leakwatch/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Scraper for FeedScraper {
    async fn refresh(&self) -> Result<Option<Snapshot>, ScraperError> {
        let resp = check_response(self.http.get(&self.url).send().await?).await?;
        let body = resp.text().await?;
        parse_feed(&body)
    }
}
