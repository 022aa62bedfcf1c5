use serde::{Deserialize, Serialize};

use crate::ids::TenantId;

/// Per-tenant vocabulary counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WordStats {
    pub tenant_id: TenantId,
    pub total: u64,
    pub batched: u64,
    pub learned: u64,
    pub to_review: u64,
}

impl WordStats {
    /// Words neither learned nor currently batched.
    #[must_use]
    pub const fn waiting(&self) -> u64 {
        self.total.saturating_sub(self.learned).saturating_sub(self.batched)
    }
}
