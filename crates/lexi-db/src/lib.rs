//! # lexi-db
//!
//! libSQL storage for Lexi.
//!
//! Holds every piece of durable state the quiz engine reads or mutates:
//! words with their streak and review flag, per-tenant learning-batch
//! membership, and pending quiz callbacks with their expiry.
//!
//! Uses the `libsql` crate (C `SQLite` fork); all tables live in one local
//! database file.

pub mod batch_tx;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
mod transaction;

use std::sync::Arc;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::Mutex;

pub use batch_tx::BatchTransaction;
pub use transaction::{ScopedTransaction, Session};

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Central database handle for all Lexi state operations.
///
/// Cheap to share behind an `Arc`; every repo method takes `&self`.
pub struct LexiDb {
    db: libsql::Database,
    conn: libsql::Connection,
    /// Present only for `:memory:` databases, where a second connection would
    /// see a different, empty database. Transactions then share `conn` and
    /// are serialized through this gate.
    tx_gate: Option<Arc<Mutex<()>>>,
}

impl LexiDb {
    /// Open a local database at the given path (or `":memory:"`).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let in_memory = path == ":memory:";
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        configure_connection(&conn).await?;

        if !in_memory {
            // WAL lets readers proceed while a batch transaction holds the write lock.
            conn.query("PRAGMA journal_mode = WAL", ())
                .await
                .map_err(|e| DatabaseError::Migration(format!("PRAGMA journal_mode: {e}")))?;
        }

        let lexi_db = Self {
            db,
            conn,
            tx_gate: in_memory.then(|| Arc::new(Mutex::new(()))),
        };
        lexi_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(lexi_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    ///
    /// Bypasses the `:memory:` gate; repo methods go through [`Self::session`].
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Shared connection for plain statements.
    ///
    /// For `:memory:` databases this waits until no transaction is open, so a
    /// write never lands inside (and rolls back with) another task's pass.
    pub async fn session(&self) -> Session<'_> {
        let gate = match &self.tx_gate {
            Some(gate) => Some(Arc::clone(gate).lock_owned().await),
            None => None,
        };
        Session::new(&self.conn, gate)
    }

    /// Generate an unguessable callback token: 16 random bytes as lowercase hex.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_token(&self) -> Result<String, DatabaseError> {
        let conn = self.session().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT lower(hex(randomblob({})))",
                    lexi_core::ids::TOKEN_BYTES
                ),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Begin an IMMEDIATE transaction on a dedicated connection.
    ///
    /// Dropping the returned handle without committing rolls back.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a connection cannot be opened or the
    /// write lock is not acquired within the busy timeout.
    pub async fn begin(&self) -> Result<ScopedTransaction, DatabaseError> {
        let behavior = libsql::TransactionBehavior::Immediate;
        if let Some(gate) = &self.tx_gate {
            let guard = Arc::clone(gate).lock_owned().await;
            let tx = self.conn.transaction_with_behavior(behavior).await?;
            return Ok(ScopedTransaction::new(tx, Some(guard)));
        }

        let conn = self.db.connect()?;
        configure_connection(&conn).await?;
        let tx = conn.transaction_with_behavior(behavior).await?;
        Ok(ScopedTransaction::new(tx, None))
    }

    /// Begin a learning-batch maintenance transaction.
    ///
    /// # Errors
    ///
    /// See [`Self::begin`].
    pub async fn begin_batch(&self) -> Result<BatchTransaction, DatabaseError> {
        Ok(BatchTransaction::new(self.begin().await?))
    }
}

/// Per-connection settings (`SQLite` does not persist these).
async fn configure_connection(conn: &libsql::Connection) -> Result<(), DatabaseError> {
    conn.execute("PRAGMA foreign_keys = ON", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
    conn.query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"), ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;
    Ok(())
}
