use std::sync::Arc;

use anyhow::Context;
use leak_config::LeakConfig;
use leak_db::LeakDb;
use leak_notify::Notifier;
use leak_scrapers::{FeedScraper, ScraperRegistry};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: LeakConfig,
    pub db: LeakDb,
    pub registry: ScraperRegistry,
    pub notifier: Notifier,
}

impl AppContext {
    /// Open the store and register every configured scraper.
    pub async fn init(config: LeakConfig) -> anyhow::Result<Self> {
        let db = LeakDb::open_local(&config.store.path)
            .await
            .with_context(|| format!("failed to open store at {}", config.store.path))?;
        let registry = build_registry(&config);
        let notifier = Notifier::from_config(&config.notify);

        tracing::debug!(
            scrapers = registry.len(),
            notify = notifier.is_enabled(),
            "application context ready"
        );

        Ok(Self {
            config,
            db,
            registry,
            notifier,
        })
    }
}

/// Populate the scraper registry from `[[feeds]]`.
fn build_registry(config: &LeakConfig) -> ScraperRegistry {
    let mut registry = ScraperRegistry::new();
    for feed in &config.feeds {
        registry.register(
            &feed.name,
            Arc::new(FeedScraper::new(feed.url.clone(), feed.timeout())),
        );
    }
    registry
}
