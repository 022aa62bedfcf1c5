//! Callback store: binds opaque tokens carried by quiz buttons to words.
//!
//! A token resolves only for the tenant it was minted for, only until it
//! expires, and only once: consumption is a single conditional DELETE, so two
//! concurrent answers to the same prompt cannot both win.

use chrono::{DateTime, Duration, Utc};

use lexi_core::entities::{CallbackRecord, normalize_word};
use lexi_core::ids::TenantId;

use crate::LexiDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime};

const SELECT_COLS: &str = "token, tenant_id, word, created_at, expires_at";

fn row_to_callback(row: &libsql::Row) -> Result<CallbackRecord, DatabaseError> {
    Ok(CallbackRecord {
        token: row.get(0)?,
        tenant_id: TenantId(row.get::<i64>(1)?),
        word: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        expires_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl LexiDb {
    /// Mint a fresh token for `word`, valid for `ttl` from `now`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if token generation or the insert fails.
    pub async fn insert_callback(
        &self,
        tenant: TenantId,
        word: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<CallbackRecord, DatabaseError> {
        let record = CallbackRecord {
            token: self.generate_token().await?,
            tenant_id: tenant,
            word: normalize_word(word),
            created_at: now,
            expires_at: now + ttl,
        };
        let conn = self.session().await;
        conn.execute(
            &format!("INSERT INTO callbacks ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            libsql::params![
                record.token.as_str(),
                tenant.get(),
                record.word.as_str(),
                format_datetime(record.created_at),
                format_datetime(record.expires_at)
            ],
        )
        .await?;
        tracing::debug!(tenant = %tenant, word = %record.word, "callback issued");
        Ok(record)
    }

    /// Look up a live token. Expired and foreign tokens resolve to `None`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn resolve_callback(
        &self,
        tenant: TenantId,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<CallbackRecord>, DatabaseError> {
        let conn = self.session().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM callbacks
                     WHERE token = ?1 AND tenant_id = ?2 AND expires_at >= ?3"
                ),
                libsql::params![token, tenant.get(), format_datetime(now)],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_callback(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete a token. Returns `true` only for the caller that removed it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn consume_callback(
        &self,
        tenant: TenantId,
        token: &str,
    ) -> Result<bool, DatabaseError> {
        let conn = self.session().await;
        let affected = conn
            .execute(
                "DELETE FROM callbacks WHERE token = ?1 AND tenant_id = ?2",
                libsql::params![token, tenant.get()],
            )
            .await?;
        Ok(affected == 1)
    }

    /// Remove every record that expired before `now`. Returns how many went.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<u64, DatabaseError> {
        let conn = self.session().await;
        let affected = conn
            .execute(
                "DELETE FROM callbacks WHERE expires_at < ?1",
                [format_datetime(now)],
            )
            .await?;
        Ok(affected)
    }

    /// Pending callbacks, optionally for one tenant only.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_callbacks(&self, tenant: Option<TenantId>) -> Result<u64, DatabaseError> {
        let conn = self.session().await;
        let mut rows = match tenant {
            Some(t) => {
                conn.query(
                    "SELECT COUNT(*) FROM callbacks WHERE tenant_id = ?1",
                    [t.get()],
                )
                .await?
            }
            None => conn.query("SELECT COUNT(*) FROM callbacks", ()).await?,
        };
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        crate::helpers::get_count(&row, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const T: TenantId = TenantId(5);

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap()
    }

    async fn test_db() -> LexiDb {
        LexiDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn issue_then_resolve() {
        let db = test_db().await;
        let record = db
            .insert_callback(T, "Apfel", Duration::days(7), t0())
            .await
            .unwrap();
        assert_eq!(record.word, "apfel");
        assert_eq!(record.expires_at, t0() + Duration::days(7));

        let resolved = db
            .resolve_callback(T, &record.token, t0() + Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(resolved, Some(record));
    }

    #[tokio::test]
    async fn foreign_tenant_cannot_resolve_or_consume() {
        let db = test_db().await;
        let record = db
            .insert_callback(T, "apfel", Duration::days(7), t0())
            .await
            .unwrap();
        let other = TenantId(6);
        assert!(db.resolve_callback(other, &record.token, t0()).await.unwrap().is_none());
        assert!(!db.consume_callback(other, &record.token).await.unwrap());
        assert!(db.resolve_callback(T, &record.token, t0()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn expired_token_does_not_resolve_before_sweep() {
        let db = test_db().await;
        let record = db
            .insert_callback(T, "apfel", Duration::days(7), t0())
            .await
            .unwrap();
        let at_expiry = record.expires_at;
        assert!(db.resolve_callback(T, &record.token, at_expiry).await.unwrap().is_some());
        let later = at_expiry + Duration::microseconds(1);
        assert!(db.resolve_callback(T, &record.token, later).await.unwrap().is_none());
        assert_eq!(db.count_callbacks(Some(T)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn consume_succeeds_once() {
        let db = test_db().await;
        let record = db
            .insert_callback(T, "apfel", Duration::days(7), t0())
            .await
            .unwrap();
        assert!(db.consume_callback(T, &record.token).await.unwrap());
        assert!(!db.consume_callback(T, &record.token).await.unwrap());
        assert!(db.resolve_callback(T, &record.token, t0()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sweep_removes_only_expired() {
        let db = test_db().await;
        let old = db
            .insert_callback(T, "alt", Duration::days(7), t0())
            .await
            .unwrap();
        let fresh = db
            .insert_callback(T, "neu", Duration::days(7), t0() + Duration::days(3))
            .await
            .unwrap();

        let now = t0() + Duration::days(8);
        assert_eq!(db.sweep_expired(now).await.unwrap(), 1);
        assert!(db.resolve_callback(T, &old.token, t0()).await.unwrap().is_none());
        assert!(db.resolve_callback(T, &fresh.token, now).await.unwrap().is_some());
        // nothing left to sweep
        assert_eq!(db.sweep_expired(now).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn distinct_prompts_get_distinct_tokens() {
        let db = test_db().await;
        let a = db.insert_callback(T, "apfel", Duration::days(7), t0()).await.unwrap();
        let b = db.insert_callback(T, "apfel", Duration::days(7), t0()).await.unwrap();
        assert_ne!(a.token, b.token);
        assert_eq!(db.count_callbacks(None).await.unwrap(), 2);
    }
}
