//! Outbound messaging seam.
//!
//! The engine only knows how to hand a [`QuizPrompt`] to something that can
//! deliver it. Chat transports, the console printer, and test doubles all
//! implement [`MessagingGateway`].

use async_trait::async_trait;
use thiserror::Error;

use lexi_core::ids::TenantId;
use lexi_core::responses::QuizPrompt;

#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The recipient blocked the sender or no longer exists. Non-fatal.
    #[error("recipient {0} unreachable")]
    RecipientUnreachable(TenantId),

    #[error("transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Deliver one prompt with its answer buttons.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the prompt could not be delivered.
    async fn send_prompt(&self, prompt: &QuizPrompt) -> Result<(), DeliveryError>;
}
