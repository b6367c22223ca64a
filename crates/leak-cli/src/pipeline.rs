//! Refresh pipeline: directory → resolve → scrape → store.
//!
//! For one namespace the orchestrator:
//! 1. Reads the directory index (the only source of which entities exist)
//! 2. Resolves each name to a scraper through the [`ScraperRegistry`]
//! 3. Runs the scraper on its own task so a panic stays contained
//! 4. Replaces the stored snapshot when the scraper returned posts
//!
//! Every listed entity is attempted exactly once per run. A missing scraper,
//! a scraper error, or a failed write is recorded against that entity and the
//! run moves on. Only an unreadable directory index ends the pass.

use std::sync::Arc;

use futures::StreamExt;
use leak_core::entities::{Post, Snapshot};
use leak_core::namespace::Namespace;
use leak_core::responses::{EntityOutcome, EntityReport, RefreshReport};
use leak_db::LeakDb;
use leak_db::error::DatabaseError;
use leak_scrapers::{Scraper, ScraperError, ScraperRegistry};

/// Drives scrapers over a namespace's directory and persists their results.
pub struct RefreshOrchestrator<'a> {
    db: &'a LeakDb,
    registry: &'a ScraperRegistry,
    concurrency: usize,
}

impl<'a> RefreshOrchestrator<'a> {
    pub const fn new(db: &'a LeakDb, registry: &'a ScraperRegistry) -> Self {
        Self {
            db,
            registry,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` entities in flight at once. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Refresh every entity listed in `namespace`'s directory.
    ///
    /// Entity reports come back in directory order regardless of concurrency.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only if the directory index cannot be read.
    pub async fn refresh_namespace(
        &self,
        namespace: Namespace,
    ) -> Result<RefreshReport, DatabaseError> {
        let entities = self.db.directory(namespace).await?;
        tracing::info!(%namespace, entities = entities.len(), "refresh pass starting");

        let reports = futures::stream::iter(entities)
            .map(|entity| self.refresh_entity(namespace, entity))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        let report = RefreshReport::from_entities(namespace, reports);
        tracing::info!(
            %namespace,
            attempted = report.attempted,
            updated = report.updated,
            unchanged = report.unchanged,
            not_found = report.not_found,
            failed = report.failed,
            "refresh pass complete"
        );
        Ok(report)
    }

    async fn refresh_entity(&self, namespace: Namespace, entity: String) -> EntityReport {
        let outcome = match self.registry.resolve(&entity) {
            Ok(scraper) => self.run_scraper(namespace, &entity, scraper).await,
            Err(ScraperError::NotFound { identifier }) => {
                tracing::info!(%namespace, %entity, %identifier, "no scraper registered; skipping");
                EntityOutcome::NotFound { identifier }
            }
            Err(error) => EntityOutcome::Failed {
                error: error.to_string(),
            },
        };
        EntityReport { entity, outcome }
    }

    async fn run_scraper(
        &self,
        namespace: Namespace,
        entity: &str,
        scraper: Arc<dyn Scraper>,
    ) -> EntityOutcome {
        match invoke(scraper).await {
            Ok(Some(posts)) if !posts.is_empty() => self.store(namespace, entity, &posts).await,
            Ok(_) => {
                tracing::debug!(%namespace, %entity, "scraper returned no posts; snapshot kept");
                EntityOutcome::Unchanged
            }
            Err(error) => {
                tracing::warn!(%namespace, %entity, %error, "scraper failed; skipping");
                EntityOutcome::Failed {
                    error: error.to_string(),
                }
            }
        }
    }

    async fn store(&self, namespace: Namespace, entity: &str, posts: &[Post]) -> EntityOutcome {
        match self.db.replace_snapshot(namespace, entity, posts).await {
            Ok(()) => {
                tracing::debug!(%namespace, %entity, posts = posts.len(), "snapshot replaced");
                EntityOutcome::Updated { posts: posts.len() }
            }
            Err(error) => {
                tracing::warn!(%namespace, %entity, %error, "snapshot write failed");
                EntityOutcome::Failed {
                    error: error.to_string(),
                }
            }
        }
    }
}

/// Run one scraper on its own task, turning a panic into [`ScraperError::Aborted`].
async fn invoke(scraper: Arc<dyn Scraper>) -> Result<Option<Snapshot>, ScraperError> {
    tokio::spawn(async move { scraper.refresh().await })
        .await
        .unwrap_or_else(|join_error| Err(ScraperError::Aborted(join_error.to_string())))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    struct Returns(Option<Snapshot>);

    #[async_trait]
    impl Scraper for Returns {
        async fn refresh(&self) -> Result<Option<Snapshot>, ScraperError> {
            Ok(self.0.clone())
        }
    }

    struct Fails;

    #[async_trait]
    impl Scraper for Fails {
        async fn refresh(&self) -> Result<Option<Snapshot>, ScraperError> {
            Err(ScraperError::Failed("site unreachable".into()))
        }
    }

    struct Panics;

    #[async_trait]
    impl Scraper for Panics {
        async fn refresh(&self) -> Result<Option<Snapshot>, ScraperError> {
            panic!("selector not found")
        }
    }

    struct Counts(Arc<AtomicUsize>);

    #[async_trait]
    impl Scraper for Counts {
        async fn refresh(&self) -> Result<Option<Snapshot>, ScraperError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    fn posts(titles: &[&str]) -> Snapshot {
        let at = NaiveDate::from_ymd_opt(2024, 1, 9)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        titles
            .iter()
            .map(|t| Post::new(*t).discovered_at(at))
            .collect()
    }

    async fn db_listing(namespace: Namespace, names: &[&str]) -> LeakDb {
        let db = LeakDb::open_local(":memory:").await.unwrap();
        db.reset_directories().await.unwrap();
        db.add_to_directory(namespace, names).await.unwrap();
        db
    }

    async fn raw_snapshot(db: &LeakDb, partition: &str, key: &str) -> Option<String> {
        let mut rows = db
            .conn()
            .query(
                "SELECT value FROM kv_entries WHERE partition = ?1 AND key = ?2",
                [partition, key],
            )
            .await
            .unwrap();
        rows.next()
            .await
            .unwrap()
            .map(|row| row.get::<String>(0).unwrap())
    }

    #[tokio::test]
    async fn failure_on_first_entity_does_not_stop_later_ones() {
        let db = db_listing(Namespace::Groups, &["Alpha", "Bravo"]).await;
        let registry = ScraperRegistry::new()
            .with("Alpha", Fails)
            .with("Bravo", Returns(Some(posts(&["bravo-victim.com"]))));

        let report = RefreshOrchestrator::new(&db, &registry)
            .refresh_namespace(Namespace::Groups)
            .await
            .unwrap();

        assert_eq!(report.attempted, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(
            db.snapshot(Namespace::Groups, "Bravo").await.unwrap(),
            Some(posts(&["bravo-victim.com"]))
        );
        assert_eq!(db.snapshot(Namespace::Groups, "Alpha").await.unwrap(), None);
    }

    #[tokio::test]
    async fn panicking_scraper_is_contained() {
        let db = db_listing(Namespace::Leaks, &["Broken", "Healthy"]).await;
        let registry = ScraperRegistry::new()
            .with("Broken", Panics)
            .with("Healthy", Returns(Some(posts(&["ok"]))));

        let report = RefreshOrchestrator::new(&db, &registry)
            .refresh_namespace(Namespace::Leaks)
            .await
            .unwrap();

        assert!(matches!(
            report.outcome_of("Broken"),
            Some(EntityOutcome::Failed { .. })
        ));
        assert_eq!(
            report.outcome_of("Healthy"),
            Some(&EntityOutcome::Updated { posts: 1 })
        );
    }

    #[tokio::test]
    async fn empty_result_leaves_snapshot_byte_identical() {
        let db = db_listing(Namespace::Groups, &["Akira"]).await;
        db.replace_snapshot(Namespace::Groups, "Akira", &posts(&["old-a", "old-b"]))
            .await
            .unwrap();
        let before = raw_snapshot(&db, "groups_posts", "Akira").await;

        for scraper in [Returns(None), Returns(Some(Vec::new()))] {
            let registry = ScraperRegistry::new().with("Akira", scraper);
            let report = RefreshOrchestrator::new(&db, &registry)
                .refresh_namespace(Namespace::Groups)
                .await
                .unwrap();
            assert_eq!(report.outcome_of("Akira"), Some(&EntityOutcome::Unchanged));
        }

        assert_eq!(raw_snapshot(&db, "groups_posts", "Akira").await, before);
    }

    #[tokio::test]
    async fn non_empty_result_replaces_snapshot_entirely() {
        let db = db_listing(Namespace::Groups, &["Akira"]).await;
        db.replace_snapshot(Namespace::Groups, "Akira", &posts(&["old-a", "old-b", "old-c"]))
            .await
            .unwrap();
        let registry = ScraperRegistry::new().with("Akira", Returns(Some(posts(&["new"]))));

        RefreshOrchestrator::new(&db, &registry)
            .refresh_namespace(Namespace::Groups)
            .await
            .unwrap();

        assert_eq!(
            db.snapshot(Namespace::Groups, "Akira").await.unwrap(),
            Some(posts(&["new"]))
        );
    }

    #[tokio::test]
    async fn repeated_runs_with_same_upstream_are_idempotent() {
        let db = db_listing(Namespace::Groups, &["Play"]).await;
        let registry = ScraperRegistry::new().with("Play", Returns(Some(posts(&["a", "b"]))));
        let orchestrator = RefreshOrchestrator::new(&db, &registry);

        orchestrator.refresh_namespace(Namespace::Groups).await.unwrap();
        let first = raw_snapshot(&db, "groups_posts", "Play").await;
        orchestrator.refresh_namespace(Namespace::Groups).await.unwrap();
        let second = raw_snapshot(&db, "groups_posts", "Play").await;

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unregistered_entity_is_reported_without_store_write() {
        let db = db_listing(Namespace::Groups, &["Black Basta"]).await;
        let registry = ScraperRegistry::new();

        let report = RefreshOrchestrator::new(&db, &registry)
            .refresh_namespace(Namespace::Groups)
            .await
            .unwrap();

        assert_eq!(
            report.outcome_of("Black Basta"),
            Some(&EntityOutcome::NotFound {
                identifier: "blackbasta".into()
            })
        );
        assert_eq!(raw_snapshot(&db, "groups_posts", "Black Basta").await, None);
    }

    #[tokio::test]
    async fn unlisted_entity_is_never_refreshed() {
        let db = db_listing(Namespace::Groups, &["Listed"]).await;
        db.replace_snapshot(Namespace::Groups, "Retired", &posts(&["stale"]))
            .await
            .unwrap();
        let retired_calls = Arc::new(AtomicUsize::new(0));
        let registry = ScraperRegistry::new()
            .with("Listed", Returns(None))
            .with("Retired", Counts(Arc::clone(&retired_calls)));

        let report = RefreshOrchestrator::new(&db, &registry)
            .refresh_namespace(Namespace::Groups)
            .await
            .unwrap();

        assert_eq!(report.attempted, 1);
        assert_eq!(retired_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            db.snapshot(Namespace::Groups, "Retired").await.unwrap(),
            Some(posts(&["stale"]))
        );
    }

    #[tokio::test]
    async fn namespaces_are_independent() {
        let db = db_listing(Namespace::Groups, &["Akira"]).await;
        db.add_to_directory(Namespace::Leaks, &["Akira"]).await.unwrap();
        let registry = ScraperRegistry::new().with("Akira", Returns(Some(posts(&["g"]))));

        RefreshOrchestrator::new(&db, &registry)
            .refresh_namespace(Namespace::Groups)
            .await
            .unwrap();

        assert!(db.snapshot(Namespace::Groups, "Akira").await.unwrap().is_some());
        assert_eq!(db.snapshot(Namespace::Leaks, "Akira").await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_run_attempts_each_entity_once_in_directory_order() {
        let names = ["E1", "E2", "E3", "E4", "E5"];
        let db = db_listing(Namespace::Groups, &names).await;
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ScraperRegistry::new();
        for name in names {
            registry.register(name, Arc::new(Counts(Arc::clone(&calls))));
        }

        let report = RefreshOrchestrator::new(&db, &registry)
            .with_concurrency(3)
            .refresh_namespace(Namespace::Groups)
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), names.len());
        assert_eq!(
            report.entities.iter().map(|e| e.entity.as_str()).collect::<Vec<_>>(),
            names.to_vec()
        );
    }
}
