//! Periodic quiz dispatch.
//!
//! Each tick checks the daily window, then for every tenant picks a word,
//! mints a callback token for it, and hands the prompt to the gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use lexi_core::clock::Clock;
use lexi_core::enums::WordFilter;
use lexi_core::ids::TenantId;
use lexi_core::responses::{QuizPrompt, Reply};
use lexi_db::LexiDb;

use crate::error::EngineError;
use crate::fanout::{TenantResult, TickReport, for_each_tenant};
use crate::gateway::MessagingGateway;
use crate::settings::EngineSettings;
use crate::supervisor::Periodic;

/// Result of dispatching to one tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A prompt went out.
    Sent(QuizPrompt),
    /// No eligible word; not an error.
    NoWords,
}

impl DispatchOutcome {
    /// What an on-demand requester sees when nothing could be sent.
    #[must_use]
    pub const fn reply(&self) -> Option<Reply> {
        match self {
            Self::Sent(_) => None,
            Self::NoWords => Some(Reply::NoWordsToCheck),
        }
    }
}

/// Result of one scheduler tick.
#[derive(Debug)]
pub enum DispatchTick {
    /// The local hour was outside the window; nothing ran.
    OutsideWindow { hour: u32 },
    Ran(Vec<TenantResult<DispatchOutcome>>),
}

#[derive(Clone)]
pub struct DispatchScheduler {
    db: Arc<LexiDb>,
    clock: Arc<dyn Clock>,
    gateway: Arc<dyn MessagingGateway>,
    settings: Arc<EngineSettings>,
}

impl DispatchScheduler {
    #[must_use]
    pub fn new(
        db: Arc<LexiDb>,
        clock: Arc<dyn Clock>,
        gateway: Arc<dyn MessagingGateway>,
        settings: Arc<EngineSettings>,
    ) -> Self {
        Self {
            db,
            clock,
            gateway,
            settings,
        }
    }

    /// Quiz one tenant now, regardless of the daily window.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if selection or token minting fails, and `Delivery`
    /// if the gateway refuses the prompt. A refused prompt's token is
    /// withdrawn since nobody can answer it.
    pub async fn dispatch_tenant(&self, tenant: TenantId) -> Result<DispatchOutcome, EngineError> {
        let threshold = self.settings.mastery_threshold;
        let surprise = roll_surprise(self.settings.surprise_probability);
        let filter = if surprise {
            WordFilter::any_unmastered(threshold)
        } else {
            WordFilter::batched_unmastered(threshold)
        };

        let Some(word) = self.db.find_random_word(tenant, filter).await? else {
            tracing::debug!(tenant = %tenant, surprise, "no words to check");
            return Ok(DispatchOutcome::NoWords);
        };

        let now = self.clock.now();
        let record = self
            .db
            .insert_callback(tenant, &word.word, self.settings.callback_ttl, now)
            .await?;
        let prompt = QuizPrompt {
            tenant_id: tenant,
            word: word.word,
            description: word.description,
            token: record.token,
            surprise,
        };

        if let Err(e) = self.gateway.send_prompt(&prompt).await {
            if let Err(withdraw) = self.db.consume_callback(tenant, &prompt.token).await {
                tracing::error!(
                    tenant = %tenant,
                    word = %prompt.word,
                    error = %withdraw,
                    "failed to withdraw undeliverable callback; the sweeper will expire it"
                );
            }
            return Err(e.into());
        }

        tracing::info!(tenant = %tenant, word = %prompt.word, surprise, "quiz sent");
        Ok(DispatchOutcome::Sent(prompt))
    }

    /// One scheduler cycle.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` only if the tenant list cannot be read.
    pub async fn tick(&self) -> Result<DispatchTick, EngineError> {
        let now = self.clock.now();
        let window = &self.settings.window;
        if !window.contains(now) {
            let hour = window.local_hour(now);
            tracing::debug!(
                hour,
                from = window.hour_from(),
                to = window.hour_to(),
                "outside dispatch window"
            );
            return Ok(DispatchTick::OutsideWindow { hour });
        }

        let tenants = self.settings.tenants.resolve(&self.db).await?;
        let results = for_each_tenant(
            "dispatch",
            tenants,
            self.settings.dispatch_timeout,
            |tenant| {
                let this = self.clone();
                async move { this.dispatch_tenant(tenant).await }
            },
        )
        .await;
        Ok(DispatchTick::Ran(results))
    }
}

/// Decide whether this prompt ignores the batch.
///
/// Kept synchronous so the thread-local RNG never lives across an await.
fn roll_surprise(probability: f64) -> bool {
    if probability.is_nan() || probability <= 0.0 {
        false
    } else if probability >= 1.0 {
        true
    } else {
        rand::thread_rng().gen_bool(probability)
    }
}

#[async_trait]
impl Periodic for DispatchScheduler {
    fn name(&self) -> &'static str {
        "dispatch-scheduler"
    }

    fn period(&self) -> Duration {
        self.settings.dispatch_interval
    }

    async fn run_once(&self) {
        match self.tick().await {
            Ok(DispatchTick::OutsideWindow { .. }) => {}
            Ok(DispatchTick::Ran(results)) => {
                let report = TickReport::from_results(&results);
                tracing::debug!(?report, "dispatch cycle done");
            }
            Err(e) => tracing::error!(error = %e, "dispatch cycle failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_config::LexiConfig;
    use lexi_core::clock::ManualClock;
    use lexi_core::entities::NewWord;
    use rstest::rstest;

    use crate::gateway::DeliveryError;

    #[rstest]
    #[case(0.0, false)]
    #[case(-1.0, false)]
    #[case(f64::NAN, false)]
    #[case(1.0, true)]
    #[case(7.0, true)]
    fn surprise_roll_edges(#[case] probability: f64, #[case] expected: bool) {
        for _ in 0..50 {
            assert_eq!(roll_surprise(probability), expected);
        }
    }

    /// Refuses every prompt after breaking the callback table underneath.
    struct BrokenStoreGateway {
        db: Arc<LexiDb>,
    }

    #[async_trait]
    impl MessagingGateway for BrokenStoreGateway {
        async fn send_prompt(&self, prompt: &QuizPrompt) -> Result<(), DeliveryError> {
            self.db
                .conn()
                .execute("DROP TABLE callbacks", ())
                .await
                .map_err(|e| DeliveryError::Transport(e.to_string()))?;
            Err(DeliveryError::RecipientUnreachable(prompt.tenant_id))
        }
    }

    #[tokio::test]
    async fn delivery_error_survives_failed_withdrawal() {
        let tenant = TenantId(4);
        let db = Arc::new(LexiDb::open_local(":memory:").await.unwrap());
        let now = chrono::Utc::now();
        db.add_or_update_word(tenant, &NewWord::new("apfel", "apple", None).unwrap(), now)
            .await
            .unwrap();

        let mut settings = EngineSettings::from_config(&LexiConfig::default()).unwrap();
        settings.surprise_probability = 1.0;
        let scheduler = DispatchScheduler::new(
            Arc::clone(&db),
            Arc::new(ManualClock::new(now)),
            Arc::new(BrokenStoreGateway { db: Arc::clone(&db) }),
            Arc::new(settings),
        );

        let result = scheduler.dispatch_tenant(tenant).await;
        assert!(
            matches!(
                result,
                Err(EngineError::Delivery(DeliveryError::RecipientUnreachable(t))) if t == tenant
            ),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn no_words_maps_to_reply() {
        assert_eq!(DispatchOutcome::NoWords.reply(), Some(Reply::NoWordsToCheck));
    }
}
