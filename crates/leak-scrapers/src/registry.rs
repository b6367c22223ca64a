//! Name-keyed scraper registry.
//!
//! Replaces runtime module lookup with an explicit map from normalized
//! identifier to scraper, populated once at start-up.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use leak_core::naming::normalize;

use crate::Scraper;
use crate::error::ScraperError;

/// Scrapers keyed by normalized entity identifier.
#[derive(Clone, Default)]
pub struct ScraperRegistry {
    scrapers: BTreeMap<String, Arc<dyn Scraper>>,
}

impl fmt::Debug for ScraperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScraperRegistry")
            .field("identifiers", &self.scrapers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ScraperRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `scraper` for the entity called `display_name`.
    ///
    /// The name is normalized before insertion. Registering a second scraper
    /// under an identifier that is already bound replaces the first one and
    /// logs a warning; entities whose names collide share whichever scraper
    /// was registered last.
    pub fn register(&mut self, display_name: &str, scraper: Arc<dyn Scraper>) -> &mut Self {
        let identifier = normalize(display_name);
        if self.scrapers.insert(identifier.clone(), scraper).is_some() {
            tracing::warn!(
                entity = display_name,
                identifier,
                "scraper identifier already registered; replacing previous binding"
            );
        }
        self
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, display_name: &str, scraper: impl Scraper + 'static) -> Self {
        self.register(display_name, Arc::new(scraper));
        self
    }

    /// Resolve the scraper bound to `display_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::NotFound`] carrying the normalized identifier
    /// when nothing is registered for it.
    pub fn resolve(&self, display_name: &str) -> Result<Arc<dyn Scraper>, ScraperError> {
        let identifier = normalize(display_name);
        self.scrapers
            .get(&identifier)
            .cloned()
            .ok_or(ScraperError::NotFound { identifier })
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.scrapers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scrapers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scrapers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use leak_core::entities::{Post, Snapshot};
    use pretty_assertions::assert_eq;

    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl Scraper for Fixed {
        async fn refresh(&self) -> Result<Option<Snapshot>, ScraperError> {
            Ok(Some(vec![Post::new(self.0)]))
        }
    }

    #[tokio::test]
    async fn resolves_through_normalization() {
        let registry = ScraperRegistry::new().with("LockBit 3.0", Fixed("lb"));
        let scraper = registry.resolve("lockbit-3.0").unwrap();
        let posts = scraper.refresh().await.unwrap().unwrap();
        assert_eq!(posts[0].title, "lb");
    }

    #[test]
    fn unknown_entity_reports_identifier() {
        let registry = ScraperRegistry::new();
        match registry.resolve("Black Basta") {
            Err(ScraperError::NotFound { identifier }) => assert_eq!(identifier, "blackbasta"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("nothing should resolve"),
        }
    }

    #[tokio::test]
    async fn colliding_names_share_last_binding() {
        let registry = ScraperRegistry::new()
            .with("Play", Fixed("first"))
            .with("P.lay", Fixed("second"));
        assert_eq!(registry.len(), 1);
        let posts = registry.resolve("Play").unwrap().refresh().await.unwrap().unwrap();
        assert_eq!(posts[0].title, "second");
    }

    #[test]
    fn identifiers_are_sorted() {
        let registry = ScraperRegistry::new()
            .with("Cl0p", Fixed("c"))
            .with("Akira", Fixed("a"));
        assert_eq!(registry.identifiers().collect::<Vec<_>>(), vec!["akira", "cl0p"]);
    }
}
