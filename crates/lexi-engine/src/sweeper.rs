//! Expired-callback sweeper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use lexi_core::clock::Clock;
use lexi_db::LexiDb;

use crate::error::EngineError;
use crate::settings::EngineSettings;
use crate::supervisor::Periodic;

#[derive(Clone)]
pub struct Sweeper {
    db: Arc<LexiDb>,
    clock: Arc<dyn Clock>,
    settings: Arc<EngineSettings>,
}

impl Sweeper {
    #[must_use]
    pub fn new(db: Arc<LexiDb>, clock: Arc<dyn Clock>, settings: Arc<EngineSettings>) -> Self {
        Self {
            db,
            clock,
            settings,
        }
    }

    /// Delete every callback that expired before now. Returns how many.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the delete fails.
    pub async fn tick(&self) -> Result<u64, EngineError> {
        let swept = self.db.sweep_expired(self.clock.now()).await?;
        if swept > 0 {
            tracing::info!(swept, "expired callbacks removed");
        }
        Ok(swept)
    }
}

#[async_trait]
impl Periodic for Sweeper {
    fn name(&self) -> &'static str {
        "sweeper"
    }

    fn period(&self) -> Duration {
        self.settings.sweep_interval
    }

    async fn run_once(&self) {
        if let Err(e) = self.tick().await {
            tracing::error!(error = %e, "callback sweep failed, retrying next cycle");
        }
    }
}
