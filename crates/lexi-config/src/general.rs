//! General application configuration.

use serde::{Deserialize, Serialize};

use lexi_core::ids::TenantId;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Chat identities served by the background loops.
    ///
    /// Empty means every tenant that owns at least one word.
    #[serde(default)]
    pub tenants: Vec<i64>,
}

impl GeneralConfig {
    #[must_use]
    pub fn tenant_ids(&self) -> Vec<TenantId> {
        self.tenants.iter().copied().map(TenantId).collect()
    }

    #[must_use]
    pub fn discovers_tenants(&self) -> bool {
        self.tenants.is_empty()
    }
}
