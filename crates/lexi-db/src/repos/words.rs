//! Word repository: CRUD, bulk import, random selection, streak and review flags.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use lexi_core::entities::{NewWord, WordEntry, WordStats, normalize_word};
use lexi_core::enums::{StreakBound, WordFilter, WordPool};
use lexi_core::ids::TenantId;

use crate::LexiDb;
use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_count, get_flag, get_opt_string, get_u32, parse_datetime,
};

pub(crate) const SELECT_COLS: &str = "w.tenant_id, w.word, w.translation, w.description, \
     w.streak, w.to_review, w.created_at, w.updated_at";

const BATCH_MEMBER: &str =
    "SELECT 1 FROM learning_batch b WHERE b.tenant_id = w.tenant_id AND b.word = w.word";

pub(crate) fn row_to_word(row: &libsql::Row) -> Result<WordEntry, DatabaseError> {
    Ok(WordEntry {
        tenant_id: TenantId(row.get::<i64>(0)?),
        word: row.get(1)?,
        translation: row.get(2)?,
        description: get_opt_string(row, 3)?,
        streak: get_u32(row, 4)?,
        to_review: get_flag(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

async fn collect_words(mut rows: libsql::Rows) -> Result<Vec<WordEntry>, DatabaseError> {
    let mut words = Vec::new();
    while let Some(row) = rows.next().await? {
        words.push(row_to_word(&row)?);
    }
    Ok(words)
}

/// Insert a word or overwrite its translation and description.
///
/// Streak, review flag, and `created_at` of an existing word are preserved.
pub(crate) async fn upsert_word(
    conn: &libsql::Connection,
    tenant: TenantId,
    word: &NewWord,
    now: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    let ts = format_datetime(now);
    conn.execute(
        "INSERT INTO words (tenant_id, word, translation, description, streak, to_review, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, 0, 0, ?5, ?5)
         ON CONFLICT (tenant_id, word) DO UPDATE SET
             translation = excluded.translation,
             description = excluded.description,
             updated_at = excluded.updated_at",
        libsql::params![
            tenant.get(),
            normalize_word(&word.word),
            word.translation.as_str(),
            word.description.as_deref(),
            ts.as_str()
        ],
    )
    .await?;
    Ok(())
}

/// Uniform random pick among a tenant's words matching `filter`.
pub(crate) async fn find_random(
    conn: &libsql::Connection,
    tenant: TenantId,
    filter: WordFilter,
) -> Result<Option<WordEntry>, DatabaseError> {
    let mut sql = format!("SELECT {SELECT_COLS} FROM words w WHERE w.tenant_id = ?1");
    let mut params: Vec<libsql::Value> = vec![tenant.get().into()];

    match filter.pool {
        WordPool::Batched => sql.push_str(&format!(" AND EXISTS ({BATCH_MEMBER})")),
        WordPool::NotBatched => sql.push_str(&format!(" AND NOT EXISTS ({BATCH_MEMBER})")),
        WordPool::Any => {}
    }
    match filter.streak {
        StreakBound::Below(n) => {
            sql.push_str(" AND w.streak < ?2");
            params.push(i64::from(n).into());
        }
        StreakBound::AtLeast(n) => {
            sql.push_str(" AND w.streak >= ?2");
            params.push(i64::from(n).into());
        }
        StreakBound::Unbounded => {}
    }
    sql.push_str(" ORDER BY RANDOM() LIMIT 1");

    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_word(&row)?)),
        None => Ok(None),
    }
}

impl LexiDb {
    /// Create a word or update the translation of an existing one.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the write or the read-back fails.
    pub async fn add_or_update_word(
        &self,
        tenant: TenantId,
        word: &NewWord,
        now: DateTime<Utc>,
    ) -> Result<WordEntry, DatabaseError> {
        upsert_word(&*self.session().await, tenant, word, now).await?;
        self.find_word(tenant, &word.word)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Upsert many words atomically. Returns the number of distinct words
    /// written; a word repeated in the list counts once and its last entry wins.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on the first failing row; nothing is kept.
    pub async fn import_words(
        &self,
        tenant: TenantId,
        words: &[NewWord],
        now: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let tx = self.begin().await?;
        let mut written = HashSet::new();
        for word in words {
            upsert_word(&tx, tenant, word, now).await?;
            written.insert(normalize_word(&word.word));
        }
        tx.commit().await?;
        tracing::info!(tenant = %tenant, count = written.len(), "words imported");
        Ok(written.len() as u64)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_word(
        &self,
        tenant: TenantId,
        word: &str,
    ) -> Result<Option<WordEntry>, DatabaseError> {
        let conn = self.session().await;
        let mut rows = conn
            .query(
                &format!("SELECT {SELECT_COLS} FROM words w WHERE w.tenant_id = ?1 AND w.word = ?2"),
                libsql::params![tenant.get(), normalize_word(word)],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_word(&row)?)),
            None => Ok(None),
        }
    }

    /// Alphabetical page of a tenant's words.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_words(
        &self,
        tenant: TenantId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<WordEntry>, DatabaseError> {
        let conn = self.session().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM words w WHERE w.tenant_id = ?1
                     ORDER BY w.word LIMIT ?2 OFFSET ?3"
                ),
                libsql::params![tenant.get(), limit, offset],
            )
            .await?;
        collect_words(rows).await
    }

    /// Delete a word; its batch membership goes with it. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_word(&self, tenant: TenantId, word: &str) -> Result<bool, DatabaseError> {
        let conn = self.session().await;
        let affected = conn
            .execute(
                "DELETE FROM words WHERE tenant_id = ?1 AND word = ?2",
                libsql::params![tenant.get(), normalize_word(word)],
            )
            .await?;
        Ok(affected > 0)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_random_word(
        &self,
        tenant: TenantId,
        filter: WordFilter,
    ) -> Result<Option<WordEntry>, DatabaseError> {
        find_random(&*self.session().await, tenant, filter).await
    }

    /// The standing review list.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_words_to_review(
        &self,
        tenant: TenantId,
    ) -> Result<Vec<WordEntry>, DatabaseError> {
        let conn = self.session().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM words w
                     WHERE w.tenant_id = ?1 AND w.to_review = 1 ORDER BY w.word"
                ),
                [tenant.get()],
            )
            .await?;
        collect_words(rows).await
    }

    /// Overwrite a word's streak. Returns whether the word exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn update_streak(
        &self,
        tenant: TenantId,
        word: &str,
        streak: u32,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let conn = self.session().await;
        let affected = conn
            .execute(
                "UPDATE words SET streak = ?1, updated_at = ?2 WHERE tenant_id = ?3 AND word = ?4",
                libsql::params![
                    i64::from(streak),
                    format_datetime(now),
                    tenant.get(),
                    normalize_word(word)
                ],
            )
            .await?;
        Ok(affected > 0)
    }

    /// Set or clear a word's review flag. Returns whether the word exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn set_review_flag(
        &self,
        tenant: TenantId,
        word: &str,
        to_review: bool,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let conn = self.session().await;
        let affected = conn
            .execute(
                "UPDATE words SET to_review = ?1, updated_at = ?2 WHERE tenant_id = ?3 AND word = ?4",
                libsql::params![
                    i64::from(to_review),
                    format_datetime(now),
                    tenant.get(),
                    normalize_word(word)
                ],
            )
            .await?;
        Ok(affected > 0)
    }

    /// Clear every review flag of a tenant. Returns how many were cleared.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn reset_review_flags(
        &self,
        tenant: TenantId,
        now: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let conn = self.session().await;
        let affected = conn
            .execute(
                "UPDATE words SET to_review = 0, updated_at = ?1 WHERE tenant_id = ?2 AND to_review = 1",
                libsql::params![format_datetime(now), tenant.get()],
            )
            .await?;
        tracing::info!(tenant = %tenant, cleared = affected, "review flags reset");
        Ok(affected)
    }

    /// Vocabulary counters for one tenant.
    ///
    /// `batched` counts only unmastered members, matching what dispatch can draw.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn word_stats(
        &self,
        tenant: TenantId,
        mastery_threshold: u32,
    ) -> Result<WordStats, DatabaseError> {
        let conn = self.session().await;
        let mut rows = conn
            .query(
                "SELECT COUNT(*),
                        COALESCE(SUM(CASE WHEN b.word IS NOT NULL AND w.streak < ?2 THEN 1 ELSE 0 END), 0),
                        COALESCE(SUM(CASE WHEN w.streak >= ?2 THEN 1 ELSE 0 END), 0),
                        COALESCE(SUM(w.to_review), 0)
                 FROM words w
                 LEFT JOIN learning_batch b ON b.tenant_id = w.tenant_id AND b.word = w.word
                 WHERE w.tenant_id = ?1",
                libsql::params![tenant.get(), i64::from(mastery_threshold)],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(WordStats {
            tenant_id: tenant,
            total: get_count(&row, 0)?,
            batched: get_count(&row, 1)?,
            learned: get_count(&row, 2)?,
            to_review: get_count(&row, 3)?,
        })
    }

    /// Every tenant that owns at least one word.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_tenants(&self) -> Result<Vec<TenantId>, DatabaseError> {
        let conn = self.session().await;
        let mut rows = conn
            .query(
                "SELECT DISTINCT tenant_id FROM words ORDER BY tenant_id",
                (),
            )
            .await?;
        let mut tenants = Vec::new();
        while let Some(row) = rows.next().await? {
            tenants.push(TenantId(row.get::<i64>(0)?));
        }
        Ok(tenants)
    }
}
