use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::TenantId;

/// Server-side binding of an outbound quiz prompt to the word it asks about.
///
/// Only the token travels through the messaging channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallbackRecord {
    pub token: String,
    pub tenant_id: TenantId,
    pub word: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CallbackRecord {
    /// Expired records are never served, even before the sweeper removes them.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
