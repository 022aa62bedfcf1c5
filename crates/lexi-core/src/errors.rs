//! Cross-cutting error types for Lexi.
//!
//! Storage and engine failures have their own enums in `lexi-db` and
//! `lexi-engine`; everything that converges at the binary becomes `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Lexi crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// An inbound action payload could not be decoded.
    #[error("Malformed action payload: {0}")]
    MalformedAction(String),

    /// A word-list line could not be parsed.
    #[error("Invalid word list line {line}: {reason}")]
    InvalidImportLine { line: usize, reason: String },

    /// Data failed validation (empty word, bad bounds, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
