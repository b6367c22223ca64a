use anyhow::Context;
use leak_config::LeakConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LeakConfig> {
    load_dotenv()?;

    if let Some(path) = flags.config.as_deref()
        && !path.is_file()
    {
        anyhow::bail!("config file not found: {}", path.display());
    }

    LeakConfig::load_from(flags.config.as_deref()).context("failed to load leakwatch config")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
