//! Learning-batch membership: the per-tenant working set dispatch draws from.

use chrono::{DateTime, Utc};

use lexi_core::entities::{WordEntry, normalize_word};
use lexi_core::ids::TenantId;

use crate::LexiDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_count};
use crate::repos::words::{SELECT_COLS, row_to_word};

pub(crate) async fn count_members(
    conn: &libsql::Connection,
    tenant: TenantId,
) -> Result<u64, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*) FROM learning_batch WHERE tenant_id = ?1",
            [tenant.get()],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    get_count(&row, 0)
}

/// Insert a membership row. Returns `false` if the word was already a member.
pub(crate) async fn insert_member(
    conn: &libsql::Connection,
    tenant: TenantId,
    word: &str,
    now: DateTime<Utc>,
) -> Result<bool, DatabaseError> {
    let affected = conn
        .execute(
            "INSERT OR IGNORE INTO learning_batch (tenant_id, word, added_at) VALUES (?1, ?2, ?3)",
            libsql::params![tenant.get(), normalize_word(word), format_datetime(now)],
        )
        .await?;
    Ok(affected > 0)
}

/// Drop every member whose streak reached `threshold`.
pub(crate) async fn evict_mastered(
    conn: &libsql::Connection,
    tenant: TenantId,
    threshold: u32,
) -> Result<u64, DatabaseError> {
    let affected = conn
        .execute(
            "DELETE FROM learning_batch
             WHERE tenant_id = ?1
               AND word IN (SELECT word FROM words WHERE tenant_id = ?1 AND streak >= ?2)",
            libsql::params![tenant.get(), i64::from(threshold)],
        )
        .await?;
    Ok(affected)
}

impl LexiDb {
    /// Number of current batch members, mastered or not.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_batched(&self, tenant: TenantId) -> Result<u64, DatabaseError> {
        count_members(&*self.session().await, tenant).await
    }

    /// Batch members in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_batch(&self, tenant: TenantId) -> Result<Vec<WordEntry>, DatabaseError> {
        let conn = self.session().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM words w
                     JOIN learning_batch b ON b.tenant_id = w.tenant_id AND b.word = w.word
                     WHERE w.tenant_id = ?1
                     ORDER BY b.added_at, w.word"
                ),
                [tenant.get()],
            )
            .await?;
        let mut words = Vec::new();
        while let Some(row) = rows.next().await? {
            words.push(row_to_word(&row)?);
        }
        Ok(words)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails, including when the word
    /// does not exist.
    pub async fn add_to_batch(
        &self,
        tenant: TenantId,
        word: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        insert_member(&*self.session().await, tenant, word, now).await
    }

    /// Outside a maintenance transaction; prefer [`crate::BatchTransaction`]
    /// when eviction must be followed by replenishment.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn evict_from_batch(
        &self,
        tenant: TenantId,
        threshold: u32,
    ) -> Result<u64, DatabaseError> {
        evict_mastered(&*self.session().await, tenant, threshold).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn is_batched(&self, tenant: TenantId, word: &str) -> Result<bool, DatabaseError> {
        let conn = self.session().await;
        let mut rows = conn
            .query(
                "SELECT 1 FROM learning_batch WHERE tenant_id = ?1 AND word = ?2",
                libsql::params![tenant.get(), normalize_word(word)],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}
