//! Fixtures shared by command tests.

use async_trait::async_trait;
use leak_config::{FeedConfig, LeakConfig};
use leak_core::entities::{Post, Snapshot};
use leak_core::namespace::Namespace;
use leak_db::LeakDb;
use leak_notify::Notifier;
use leak_scrapers::{Scraper, ScraperError, ScraperRegistry};

use crate::context::AppContext;

/// Scraper returning a single post with a fixed title.
pub struct Fixed(pub &'static str);

#[async_trait]
impl Scraper for Fixed {
    async fn refresh(&self) -> Result<Option<Snapshot>, ScraperError> {
        Ok(Some(vec![Post::new(self.0)]))
    }
}

fn feed(name: &str, namespace: Namespace) -> FeedConfig {
    FeedConfig {
        name: name.to_string(),
        namespace,
        url: "https://feeds.example/posts.json".to_string(),
        timeout_secs: 5,
    }
}

/// Config with one feed per namespace: `Akira` (groups), `BreachForums` (leaks).
pub fn config() -> LeakConfig {
    LeakConfig {
        feeds: vec![
            feed("Akira", Namespace::Groups),
            feed("BreachForums", Namespace::Leaks),
        ],
        ..LeakConfig::default()
    }
}

pub async fn context(config: LeakConfig, registry: ScraperRegistry) -> AppContext {
    AppContext {
        db: LeakDb::open_local(":memory:").await.unwrap(),
        notifier: Notifier::from_config(&config.notify),
        registry,
        config,
    }
}

/// Overwrite a raw store value, bypassing encoding.
pub async fn write_raw(db: &LeakDb, partition: &str, key: &str, value: &str) {
    db.conn()
        .execute(
            "INSERT INTO kv_entries (partition, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT (partition, key) DO UPDATE SET value = excluded.value",
            [partition, key, value],
        )
        .await
        .unwrap();
}
