//! Run report types returned as JSON by `leakwatch` commands.
//!
//! A refresh run produces one [`EntityReport`] per directory entry; the
//! counters on [`RefreshReport`] are derived from those entries so the two
//! can never disagree.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::namespace::Namespace;

/// What happened to one entity during a refresh pass.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntityOutcome {
    /// The scraper returned posts and the snapshot was replaced.
    Updated { posts: usize },
    /// The scraper returned nothing; the stored snapshot was left untouched.
    Unchanged,
    /// No scraper is registered under the entity's normalized identifier.
    NotFound { identifier: String },
    /// The scraper failed, or the snapshot write failed.
    Failed { error: String },
}

/// Outcome for a single named entity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntityReport {
    pub entity: String,
    #[serde(flatten)]
    pub outcome: EntityOutcome,
}

/// Response from `leakwatch refresh` for one namespace.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RefreshReport {
    pub namespace: Namespace,
    pub attempted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub failed: usize,
    pub entities: Vec<EntityReport>,
}

impl RefreshReport {
    /// Build a report, deriving counters from the per-entity outcomes.
    #[must_use]
    pub fn from_entities(namespace: Namespace, entities: Vec<EntityReport>) -> Self {
        let count = |pred: fn(&EntityOutcome) -> bool| {
            entities.iter().filter(|e| pred(&e.outcome)).count()
        };
        Self {
            namespace,
            attempted: entities.len(),
            updated: count(|o| matches!(o, EntityOutcome::Updated { .. })),
            unchanged: count(|o| matches!(o, EntityOutcome::Unchanged)),
            not_found: count(|o| matches!(o, EntityOutcome::NotFound { .. })),
            failed: count(|o| matches!(o, EntityOutcome::Failed { .. })),
            entities,
        }
    }

    /// Look up the outcome recorded for `entity`.
    #[must_use]
    pub fn outcome_of(&self, entity: &str) -> Option<&EntityOutcome> {
        self.entities
            .iter()
            .find(|e| e.entity == entity)
            .map(|e| &e.outcome)
    }
}

/// Response from `leakwatch notify` for one namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NotifyReport {
    pub namespace: Option<Namespace>,
    /// False when notifications are switched off; no network activity happened.
    pub enabled: bool,
    pub scanned_entities: usize,
    pub eligible_posts: usize,
    pub delivered: usize,
    pub failed: usize,
    /// Entities whose stored snapshot could not be decoded.
    pub malformed: Vec<String>,
}

/// Response from `leakwatch directory` and the collection step of `cycle`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DirectoryReport {
    pub namespace: Namespace,
    /// Names newly appended by this command; empty for a plain listing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    pub entities: Vec<String>,
}

/// Response from `leakwatch cycle`, one section per stage in run order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CycleReport {
    pub reset: Vec<Namespace>,
    pub collected: Vec<DirectoryReport>,
    pub refreshed: Vec<RefreshReport>,
    pub notified: Vec<NotifyReport>,
}
