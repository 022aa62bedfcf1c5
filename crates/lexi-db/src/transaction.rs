//! Connection handles that keep the in-memory serialization gate alive.
//!
//! A `:memory:` database has exactly one connection, so an open transaction
//! would swallow every statement issued on it. Both handles here hold the gate
//! for their lifetime: a [`ScopedTransaction`] until commit or drop, a
//! [`Session`] for the statements of one repo call.

use std::ops::Deref;

use tokio::sync::OwnedMutexGuard;

use crate::error::DatabaseError;

pub struct ScopedTransaction {
    // Field order matters: the transaction rolls back before the gate opens.
    tx: libsql::Transaction,
    _gate: Option<OwnedMutexGuard<()>>,
}

impl ScopedTransaction {
    pub(crate) fn new(tx: libsql::Transaction, gate: Option<OwnedMutexGuard<()>>) -> Self {
        Self { tx, _gate: gate }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails; the transaction is then rolled back.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        let Self { tx, _gate } = self;
        tx.commit().await?;
        Ok(())
    }
}

impl Deref for ScopedTransaction {
    type Target = libsql::Connection;

    fn deref(&self) -> &libsql::Connection {
        &self.tx
    }
}

/// Shared connection for plain (non-transactional) statements.
pub struct Session<'a> {
    conn: &'a libsql::Connection,
    _gate: Option<OwnedMutexGuard<()>>,
}

impl<'a> Session<'a> {
    pub(crate) const fn new(
        conn: &'a libsql::Connection,
        gate: Option<OwnedMutexGuard<()>>,
    ) -> Self {
        Self { conn, _gate: gate }
    }
}

impl Deref for Session<'_> {
    type Target = libsql::Connection;

    fn deref(&self) -> &libsql::Connection {
        self.conn
    }
}
