use leak_config::LeakConfig;

/// Emit warnings for configuration that is present but cannot take effect.
pub fn warn_unconfigured(config: &LeakConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &LeakConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if config.notify.enabled && config.notify.webhook_url.is_empty() {
        warnings.push(
            "notify.enabled is true but notify.webhook_url is empty; notifications are off."
                .to_string(),
        );
    }

    if !config.notify.is_configured()
        && has_env_prefix(&env_keys, "LEAKWATCH_NOTIFY")
        && !has_env_prefix(&env_keys, "LEAKWATCH_NOTIFY__")
    {
        warnings.push(
            "Notify config appears default while LEAKWATCH_NOTIFY* env vars exist. Use double underscores (example: LEAKWATCH_NOTIFY__WEBHOOK_URL)."
                .to_string(),
        );
    }

    if has_env_prefix(&env_keys, "LEAKWATCH_STORE_PATH") {
        warnings.push(
            "LEAKWATCH_STORE_PATH is ignored. Use double underscores (example: LEAKWATCH_STORE__PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use leak_config::{LeakConfig, NotifyConfig};

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_enabled_notify_without_url() {
        let config = LeakConfig {
            notify: NotifyConfig {
                enabled: true,
                ..NotifyConfig::default()
            },
            ..LeakConfig::default()
        };
        let warnings = collect_unconfigured_warnings(&config, Vec::new());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("webhook_url"));
    }

    #[test]
    fn warns_for_single_underscore_env_keys() {
        let warnings = collect_unconfigured_warnings(
            &LeakConfig::default(),
            vec![
                (
                    "LEAKWATCH_NOTIFY_WEBHOOK_URL".to_string(),
                    "https://hooks.example".to_string(),
                ),
                ("LEAKWATCH_STORE_PATH".to_string(), "/tmp/x.db".to_string()),
            ],
        );
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn does_not_warn_when_notify_is_configured() {
        let config = LeakConfig {
            notify: NotifyConfig {
                enabled: true,
                webhook_url: "https://hooks.example/T000".to_string(),
                ..NotifyConfig::default()
            },
            ..LeakConfig::default()
        };
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![(
                "LEAKWATCH_NOTIFY__WEBHOOK_URL".to_string(),
                "https://hooks.example/T000".to_string(),
            )],
        );
        assert!(warnings.is_empty());
    }
}
