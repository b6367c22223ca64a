//! # leak-notify
//!
//! Change detection over stored snapshots and delivery to a chat webhook.
//!
//! The [`Notifier`] reads every stored snapshot in a namespace, selects posts
//! discovered within the trailing window, and posts one message per post.
//! Delivery is fire-and-forget: a failed send is logged and counted, and the
//! scan carries on. Nothing is remembered between runs, so a post is sent
//! again on every run until it ages out of the window.

mod error;
pub mod message;
mod webhook;

pub use error::NotifyError;
pub use webhook::WebhookClient;

use chrono::{NaiveDateTime, TimeDelta};
use leak_config::NotifyConfig;
use leak_core::namespace::Namespace;
use leak_core::responses::NotifyReport;
use leak_db::LeakDb;

/// Recent-post detector bound to an optional webhook.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: Option<WebhookClient>,
    window: TimeDelta,
}

impl Notifier {
    /// Build a notifier from config. When notifications are disabled or no
    /// URL is set, no client is created and runs make no network calls.
    #[must_use]
    pub fn from_config(config: &NotifyConfig) -> Self {
        let client = config
            .is_configured()
            .then(|| WebhookClient::new(config.webhook_url.clone(), config.timeout()));
        Self {
            client,
            window: TimeDelta::hours(i64::from(config.window_hours)),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Scan `namespace` and deliver a message for every recent post.
    ///
    /// `now` is naive local time, the same clock posts are stamped with.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Database`] only if the namespace's snapshots
    /// cannot be listed. Undecodable snapshots and failed deliveries are
    /// reported in the returned [`NotifyReport`].
    pub async fn notify_namespace(
        &self,
        db: &LeakDb,
        namespace: Namespace,
        now: NaiveDateTime,
    ) -> Result<NotifyReport, NotifyError> {
        let mut report = NotifyReport {
            namespace: Some(namespace),
            enabled: self.is_enabled(),
            ..NotifyReport::default()
        };
        let Some(client) = &self.client else {
            tracing::debug!(%namespace, "notifications disabled; skipping");
            return Ok(report);
        };

        for stored in db.snapshots(namespace).await? {
            report.scanned_entities += 1;
            let posts = match stored.posts {
                Ok(posts) => posts,
                Err(error) => {
                    tracing::warn!(%namespace, entity = %stored.entity, %error, "skipping malformed snapshot");
                    report.malformed.push(stored.entity);
                    continue;
                }
            };

            for post in posts.iter().filter(|p| p.discovered_within(now, self.window)) {
                report.eligible_posts += 1;
                let text = message::render(&stored.entity, post);
                match client.send(&text).await {
                    Ok(()) => {
                        report.delivered += 1;
                        tracing::debug!(%namespace, entity = %stored.entity, title = %post.title, "notification sent");
                    }
                    Err(error) => {
                        report.failed += 1;
                        tracing::warn!(%namespace, entity = %stored.entity, title = %post.title, %error, "notification failed");
                    }
                }
            }
        }

        tracing::info!(
            %namespace,
            eligible = report.eligible_posts,
            delivered = report.delivered,
            failed = report.failed,
            "notification pass complete"
        );
        Ok(report)
    }
}
