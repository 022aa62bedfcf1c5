use std::sync::Arc;

use anyhow::Context;

use lexi_config::LexiConfig;
use lexi_core::clock::SystemClock;
use lexi_db::LexiDb;
use lexi_engine::{Engine, EngineSettings};

use crate::gateway::ConsoleGateway;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: LexiConfig,
    pub db: Arc<LexiDb>,
    pub engine: Engine,
}

impl AppContext {
    pub async fn init(config: LexiConfig) -> anyhow::Result<Self> {
        let db = LexiDb::open_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;
        let db = Arc::new(db);
        let settings =
            EngineSettings::from_config(&config).context("invalid engine settings")?;
        let engine = Engine::new(
            Arc::clone(&db),
            Arc::new(SystemClock),
            Arc::new(ConsoleGateway),
            settings,
        );
        Ok(Self { config, db, engine })
    }

    /// Mastery threshold in effect, for stats and word views.
    pub const fn mastery_threshold(&self) -> u32 {
        self.config.batch.mastery_threshold
    }
}

#[cfg(test)]
mod tests {
    use lexi_core::entities::NewWord;
    use lexi_core::ids::TenantId;

    use super::*;

    fn memory_config() -> LexiConfig {
        let mut config = LexiConfig::default();
        config.database.path = ":memory:".into();
        config
    }

    #[tokio::test]
    async fn engine_and_context_share_one_database() {
        let ctx = AppContext::init(memory_config()).await.unwrap();
        let tenant = TenantId(11);
        let word = NewWord::new("Apfel", "apple", None).unwrap();
        ctx.db
            .add_or_update_word(tenant, &word, chrono::Utc::now())
            .await
            .unwrap();

        let results = ctx.engine.maintainer().tick().await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(ctx.db.is_batched(tenant, "apfel").await.unwrap());
        assert_eq!(ctx.mastery_threshold(), 15);
    }
}
