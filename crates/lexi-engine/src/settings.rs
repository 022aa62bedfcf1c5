//! Runtime settings derived once from [`LexiConfig`].

use std::time::Duration;

use lexi_config::{ConfigError, LexiConfig};
use lexi_core::ids::TenantId;
use lexi_core::schedule::ScheduleWindow;
use lexi_db::LexiDb;
use lexi_db::error::DatabaseError;

/// Which tenants the background loops visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantSource {
    /// An explicit list from configuration.
    Fixed(Vec<TenantId>),
    /// Every tenant that owns at least one word, looked up each cycle.
    Discover,
}

impl TenantSource {
    /// # Errors
    ///
    /// Returns `DatabaseError` if discovery queries the store and fails.
    pub async fn resolve(&self, db: &LexiDb) -> Result<Vec<TenantId>, DatabaseError> {
        match self {
            Self::Fixed(tenants) => Ok(tenants.clone()),
            Self::Discover => db.list_tenants().await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub tenants: TenantSource,

    // Dispatch
    pub window: ScheduleWindow,
    pub dispatch_interval: Duration,
    pub dispatch_timeout: Duration,
    pub surprise_probability: f64,

    // Learning batch
    pub batch_size: u32,
    pub mastery_threshold: u32,
    pub batch_interval: Duration,
    pub batch_timeout: Duration,

    // Callbacks
    pub callback_ttl: chrono::Duration,
    pub sweep_interval: Duration,
    pub outcome_timeout: Duration,
}

impl EngineSettings {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the configuration does not
    /// validate or the callback TTL does not fit a timestamp offset.
    pub fn from_config(config: &LexiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let callback_ttl = chrono::Duration::from_std(config.callbacks.ttl()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "callbacks.ttl_secs".into(),
                reason: e.to_string(),
            }
        })?;
        let tenants = if config.general.discovers_tenants() {
            TenantSource::Discover
        } else {
            TenantSource::Fixed(config.general.tenant_ids())
        };

        Ok(Self {
            tenants,
            window: config.schedule.window()?,
            dispatch_interval: config.schedule.dispatch_interval(),
            dispatch_timeout: config.schedule.dispatch_timeout(),
            surprise_probability: config.schedule.surprise_probability,
            batch_size: config.batch.target_size,
            mastery_threshold: config.batch.mastery_threshold,
            batch_interval: config.batch.interval(),
            batch_timeout: config.batch.timeout(),
            callback_ttl,
            sweep_interval: config.callbacks.sweep_interval(),
            outcome_timeout: config.callbacks.outcome_timeout(),
        })
    }
}
