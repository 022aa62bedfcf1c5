//! Learning-batch maintenance.
//!
//! Per tenant, inside one transaction: evict mastered members, count what is
//! left, then draw random unmastered non-members until the batch reaches its
//! target size or the pool runs dry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use lexi_core::clock::Clock;
use lexi_core::enums::WordFilter;
use lexi_core::ids::TenantId;
use lexi_db::LexiDb;

use crate::error::EngineError;
use crate::fanout::{TenantResult, TickReport, for_each_tenant};
use crate::settings::EngineSettings;
use crate::supervisor::Periodic;

/// What one tenant's pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub tenant: TenantId,
    pub evicted: u64,
    pub added: u64,
    pub size: u64,
}

#[derive(Clone)]
pub struct BatchMaintainer {
    db: Arc<LexiDb>,
    clock: Arc<dyn Clock>,
    settings: Arc<EngineSettings>,
}

impl BatchMaintainer {
    #[must_use]
    pub fn new(db: Arc<LexiDb>, clock: Arc<dyn Clock>, settings: Arc<EngineSettings>) -> Self {
        Self {
            db,
            clock,
            settings,
        }
    }

    /// One maintenance pass for one tenant, without a timeout.
    ///
    /// Nothing is visible to other readers until the pass commits; an
    /// abandoned pass rolls back.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if any step fails.
    pub async fn maintain_tenant(&self, tenant: TenantId) -> Result<BatchReport, EngineError> {
        let target = u64::from(self.settings.batch_size);
        let threshold = self.settings.mastery_threshold;
        let now = self.clock.now();

        let tx = self.db.begin_batch().await?;
        let evicted = tx.evict_mastered(tenant, threshold).await?;
        let mut size = tx.count_batched(tenant).await?;
        let mut added = 0;

        while size < target {
            let Some(word) = tx
                .find_random_word(tenant, WordFilter::replenish_pool(threshold))
                .await?
            else {
                tracing::debug!(tenant = %tenant, size, target, "replenish pool exhausted");
                break;
            };
            if !tx.add_to_batch(tenant, &word.word, now).await? {
                break;
            }
            size += 1;
            added += 1;
        }
        tx.commit().await?;

        if evicted > 0 || added > 0 {
            tracing::info!(tenant = %tenant, evicted, added, size, "learning batch updated");
        }
        Ok(BatchReport {
            tenant,
            evicted,
            added,
            size,
        })
    }

    /// One cycle across all tenants, each under the batch timeout.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` only if the tenant list cannot be read;
    /// per-tenant failures are reported in the results.
    pub async fn tick(&self) -> Result<Vec<TenantResult<BatchReport>>, EngineError> {
        let tenants = self.settings.tenants.resolve(&self.db).await?;
        let results = for_each_tenant("maintain", tenants, self.settings.batch_timeout, |tenant| {
            let this = self.clone();
            async move { this.maintain_tenant(tenant).await }
        })
        .await;
        Ok(results)
    }
}

#[async_trait]
impl Periodic for BatchMaintainer {
    fn name(&self) -> &'static str {
        "batch-maintainer"
    }

    fn period(&self) -> Duration {
        self.settings.batch_interval
    }

    async fn run_once(&self) {
        match self.tick().await {
            Ok(results) => {
                let report = TickReport::from_results(&results);
                tracing::debug!(?report, "batch maintenance cycle done");
            }
            Err(e) => tracing::error!(error = %e, "batch maintenance cycle failed"),
        }
    }
}
