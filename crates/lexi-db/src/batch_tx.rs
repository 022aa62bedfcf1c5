//! Learning-batch maintenance inside one IMMEDIATE transaction.
//!
//! Eviction, counting, and replenishment for a tenant must observe a single
//! consistent snapshot, otherwise two overlapping passes could both decide
//! the batch is short and overfill it.

use chrono::{DateTime, Utc};

use lexi_core::entities::WordEntry;
use lexi_core::enums::WordFilter;
use lexi_core::ids::TenantId;

use crate::ScopedTransaction;
use crate::error::DatabaseError;
use crate::repos::{batch, words};

pub struct BatchTransaction {
    tx: ScopedTransaction,
}

impl BatchTransaction {
    pub(crate) const fn new(tx: ScopedTransaction) -> Self {
        Self { tx }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn evict_mastered(
        &self,
        tenant: TenantId,
        threshold: u32,
    ) -> Result<u64, DatabaseError> {
        batch::evict_mastered(&self.tx, tenant, threshold).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_batched(&self, tenant: TenantId) -> Result<u64, DatabaseError> {
        batch::count_members(&self.tx, tenant).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_random_word(
        &self,
        tenant: TenantId,
        filter: WordFilter,
    ) -> Result<Option<WordEntry>, DatabaseError> {
        words::find_random(&self.tx, tenant, filter).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn add_to_batch(
        &self,
        tenant: TenantId,
        word: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        batch::insert_member(&self.tx, tenant, word, now).await
    }

    /// Make every change of this pass visible at once.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LexiDb;
    use lexi_core::entities::NewWord;

    const T: TenantId = TenantId(1);

    #[tokio::test]
    async fn dropped_pass_leaves_batch_untouched() {
        let db = LexiDb::open_local(":memory:").await.unwrap();
        let now = Utc::now();
        db.add_or_update_word(T, &NewWord::new("a", "x", None).unwrap(), now)
            .await
            .unwrap();

        {
            let tx = db.begin_batch().await.unwrap();
            assert!(tx.add_to_batch(T, "a", now).await.unwrap());
            assert_eq!(tx.count_batched(T).await.unwrap(), 1);
        }
        assert_eq!(db.count_batched(T).await.unwrap(), 0);

        let tx = db.begin_batch().await.unwrap();
        tx.add_to_batch(T, "a", now).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(db.count_batched(T).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn plain_writes_wait_out_an_abandoned_pass() {
        let db = LexiDb::open_local(":memory:").await.unwrap();
        let now = Utc::now();
        db.add_or_update_word(T, &NewWord::new("a", "x", None).unwrap(), now)
            .await
            .unwrap();

        let tx = db.begin_batch().await.unwrap();
        tx.add_to_batch(T, "a", now).await.unwrap();

        let writes = async {
            db.insert_callback(T, "a", chrono::Duration::days(1), now)
                .await
                .unwrap();
            db.update_streak(T, "a", 5, now).await.unwrap();
        };
        let abandon = async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            drop(tx);
        };
        tokio::join!(writes, abandon);

        assert_eq!(db.count_batched(T).await.unwrap(), 0);
        assert_eq!(db.count_callbacks(Some(T)).await.unwrap(), 1);
        assert_eq!(db.find_word(T, "a").await.unwrap().unwrap().streak, 5);
    }
}
