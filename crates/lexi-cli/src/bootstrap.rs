use anyhow::Context;

use lexi_config::LexiConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LexiConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env file"),
    }

    let mut config = LexiConfig::load().context("failed to load lexi configuration")?;
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
        config.validate()?;
    }
    Ok(config)
}
