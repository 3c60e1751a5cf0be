use anyhow::Context;
use figment::providers::Serialized;
use scout_config::ScoutConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, with `--base-url` on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ScoutConfig> {
    load_dotenv()?;

    let mut figment = ScoutConfig::figment();
    if let Some(base_url) = &flags.base_url {
        figment = figment.merge(Serialized::default("api.base_url", base_url));
    }

    let config = ScoutConfig::from_figment(&figment).context("failed to load scout configuration")?;
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(error).context("failed to load .env"),
    }
}
