//! Webhook notification configuration.

use std::time::Duration;

use leak_core::namespace::Namespace;
use serde::{Deserialize, Serialize};

const fn default_window_hours() -> u32 {
    24
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_namespaces() -> Vec<Namespace> {
    vec![Namespace::Groups]
}

/// Outbound chat webhook that receives one message per recent post.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifyConfig {
    /// Master switch. When off, no webhook traffic is ever produced.
    #[serde(default)]
    pub enabled: bool,

    /// Incoming-webhook URL (Rocket.Chat, Mattermost, Slack-compatible).
    #[serde(default)]
    pub webhook_url: String,

    /// Posts discovered less than this many hours ago are announced.
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,

    /// Per-request timeout for webhook delivery.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Namespaces scanned by `leakwatch notify` when none is given.
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<Namespace>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: String::new(),
            window_hours: default_window_hours(),
            timeout_secs: default_timeout_secs(),
            namespaces: default_namespaces(),
        }
    }
}

impl NotifyConfig {
    /// Returns `true` if notifications are switched on and have a destination.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.webhook_url.is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
