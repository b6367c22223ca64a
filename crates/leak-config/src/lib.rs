//! # leak-config
//!
//! Layered configuration loading for leakwatch using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LEAKWATCH_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Working-directory `leakwatch.toml`
//! 4. User-level `~/.config/leakwatch/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LEAKWATCH_NOTIFY__WEBHOOK_URL` -> `notify.webhook_url`,
//! `LEAKWATCH_STORE__PATH` -> `store.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use leak_config::LeakConfig;
//!
//! let config = LeakConfig::load().expect("config");
//! if config.notify.is_configured() {
//!     println!("webhook: {}", config.notify.webhook_url);
//! }
//! ```

mod error;
mod feeds;
mod general;
mod notify;
mod store;

pub use error::ConfigError;
pub use feeds::FeedConfig;
pub use general::GeneralConfig;
pub use notify::NotifyConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use leak_core::namespace::Namespace;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Working-directory config file name.
pub const LOCAL_CONFIG_FILE: &str = "leakwatch.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeakConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,
}

impl LeakConfig {
    /// Load configuration from the default sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering `explicit` above the discovered TOML files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or add providers on top.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("LEAKWATCH_").split("__"))
    }

    /// Reject values that would make a run meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.concurrency == 0 {
            return Err(invalid("general.concurrency", "must be at least 1"));
        }
        if self.notify.window_hours == 0 {
            return Err(invalid("notify.window_hours", "must be at least 1"));
        }
        if self.store.path.trim().is_empty() {
            return Err(invalid("store.path", "must not be empty"));
        }
        for (idx, feed) in self.feeds.iter().enumerate() {
            if feed.name.trim().is_empty() {
                return Err(invalid(&format!("feeds[{idx}].name"), "must not be empty"));
            }
            if !(feed.url.starts_with("http://") || feed.url.starts_with("https://")) {
                return Err(invalid(
                    &format!("feeds[{idx}].url"),
                    "must be an http(s) URL",
                ));
            }
        }
        Ok(())
    }

    /// Configured feeds belonging to `namespace`, in declaration order.
    pub fn feeds_in(&self, namespace: Namespace) -> impl Iterator<Item = &FeedConfig> {
        self.feeds.iter().filter(move |f| f.namespace == namespace)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("leakwatch").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
