//! Storage errors for the word, batch, and callback stores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A statement failed or a row did not decode into its entity.
    #[error("Query failed: {0}")]
    Query(String),

    /// Opening the schema or setting a connection pragma failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("No result returned")]
    NoResult,

    /// A stored value violates an entity invariant (negative streak, bad count).
    #[error("Invalid stored value: {0}")]
    InvalidState(String),

    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
