//! Inbound outcome handling.
//!
//! Decodes a learner's button press, resolves and consumes its callback
//! token, applies the mastery transition, and answers with a [`Reply`].

use std::sync::Arc;

use lexi_core::action::InboundAction;
use lexi_core::clock::Clock;
use lexi_core::ids::TenantId;
use lexi_core::mastery::Transition;
use lexi_core::responses::Reply;
use lexi_db::LexiDb;

use crate::error::EngineError;
use crate::settings::EngineSettings;

#[derive(Clone)]
pub struct OutcomeHandler {
    db: Arc<LexiDb>,
    clock: Arc<dyn Clock>,
    settings: Arc<EngineSettings>,
}

impl OutcomeHandler {
    #[must_use]
    pub fn new(db: Arc<LexiDb>, clock: Arc<dyn Clock>, settings: Arc<EngineSettings>) -> Self {
        Self {
            db,
            clock,
            settings,
        }
    }

    /// Handle a raw payload and always produce something to show the learner.
    pub async fn handle(&self, tenant: TenantId, payload: &str) -> Reply {
        match self.try_handle(tenant, payload).await {
            Ok(reply) => reply,
            Err(e) => {
                e.log("outcome", tenant);
                e.reply()
            }
        }
    }

    /// Handle a raw payload within the outcome timeout.
    ///
    /// # Errors
    ///
    /// - `MalformedAction` if the payload does not decode.
    /// - `NotFound` if the token is unknown, expired, already consumed, or
    ///   its word was deleted meanwhile.
    /// - `Storage` / `Timeout` for infrastructure failures.
    pub async fn try_handle(&self, tenant: TenantId, payload: &str) -> Result<Reply, EngineError> {
        let action: InboundAction = payload
            .parse()
            .map_err(|e: lexi_core::errors::CoreError| EngineError::MalformedAction(e.to_string()))?;

        let limit = self.settings.outcome_timeout;
        tokio::time::timeout(limit, self.apply(tenant, &action))
            .await
            .map_err(|_| EngineError::Timeout {
                operation: "outcome",
                after: limit,
            })?
    }

    async fn apply(&self, tenant: TenantId, action: &InboundAction) -> Result<Reply, EngineError> {
        let now = self.clock.now();
        let record = self
            .db
            .resolve_callback(tenant, &action.token, now)
            .await?
            .ok_or(EngineError::NotFound("callback"))?;

        // A concurrent duplicate of this action may have consumed it first.
        if !self.db.consume_callback(tenant, &action.token).await? {
            return Err(EngineError::NotFound("callback"));
        }

        let entry = self
            .db
            .find_word(tenant, &record.word)
            .await?
            .ok_or(EngineError::NotFound("word"))?;

        let threshold = self.settings.mastery_threshold;
        let transition = Transition::new(entry.mastery(), action.outcome);
        if transition.streak_changed() {
            self.db
                .update_streak(tenant, &entry.word, transition.to.streak, now)
                .await?;
        }
        if transition.review_changed() {
            self.db
                .set_review_flag(tenant, &entry.word, transition.to.to_review, now)
                .await?;
        }

        tracing::info!(
            tenant = %tenant,
            word = %entry.word,
            outcome = %action.outcome,
            streak = transition.to.streak,
            learned = transition.became_learned(threshold),
            "outcome recorded"
        );

        Ok(Reply::Acknowledged {
            word: entry.word,
            translation: entry.translation,
            streak: transition.to.streak,
            to_review: transition.to.to_review,
            learned: transition.to.is_learned(threshold),
        })
    }
}
