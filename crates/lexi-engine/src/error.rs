//! Engine error types.
//!
//! Every variant maps onto a user-visible [`Reply`] via [`EngineError::reply`]
//! and onto a log level via [`EngineError::log`]; internal details only ever
//! reach the logs.

use std::time::Duration;

use thiserror::Error;

use lexi_config::ConfigError;
use lexi_core::ids::TenantId;
use lexi_core::responses::Reply;
use lexi_db::error::DatabaseError;

use crate::gateway::DeliveryError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Token or word absent, expired, or already consumed. Benign.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The underlying store failed; the next scheduled cycle retries.
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),

    /// The messaging gateway rejected or could not reach the recipient.
    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    /// A bounded operation ran past its budget.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// A task panicked and was recovered at its boundary.
    #[error("Task panicked: {0}")]
    Panicked(String),

    /// An inbound action payload could not be decoded.
    #[error("Malformed action: {0}")]
    MalformedAction(String),

    /// Settings could not be derived from configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// The neutral message shown to the learner for this failure.
    #[must_use]
    pub const fn reply(&self) -> Reply {
        match self {
            Self::NotFound(_) => Reply::TooMuchTimePassed,
            _ => Reply::SomethingWentWrong,
        }
    }

    /// Log at the level the failure kind warrants.
    pub fn log(&self, operation: &str, tenant: TenantId) {
        match self {
            Self::NotFound(what) => {
                tracing::debug!(operation, tenant = %tenant, what, "nothing to act on");
            }
            Self::Delivery(_) | Self::MalformedAction(_) => {
                tracing::warn!(operation, tenant = %tenant, error = %self, "skipped");
            }
            _ => tracing::error!(operation, tenant = %tenant, error = %self, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_not_found_is_benign() {
        assert_eq!(
            EngineError::NotFound("callback").reply(),
            Reply::TooMuchTimePassed
        );
        assert_eq!(
            EngineError::MalformedAction("x".into()).reply(),
            Reply::SomethingWentWrong
        );
        assert_eq!(
            EngineError::Timeout {
                operation: "outcome",
                after: Duration::from_secs(10),
            }
            .reply(),
            Reply::SomethingWentWrong
        );
    }

    #[test]
    fn storage_error_text_stays_out_of_reply() {
        let err = EngineError::Storage(DatabaseError::Query("disk I/O error".into()));
        assert!(err.to_string().contains("disk I/O"));
        assert!(!err.reply().text().contains("disk"));
    }
}
