//! Learning batch maintenance.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use lexi_core::mastery::{DEFAULT_BATCH_SIZE, DEFAULT_MASTERY_THRESHOLD};

use crate::ConfigError;

const fn default_target_size() -> u32 {
    DEFAULT_BATCH_SIZE
}

const fn default_mastery_threshold() -> u32 {
    DEFAULT_MASTERY_THRESHOLD
}

const fn default_interval_secs() -> u64 {
    60 * 60
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Number of words kept under active review per tenant.
    #[serde(default = "default_target_size")]
    pub target_size: u32,

    /// Streak at which a word is learned and leaves the batch.
    #[serde(default = "default_mastery_threshold")]
    pub mastery_threshold: u32,

    /// Seconds between maintenance passes.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Upper bound for one tenant's maintenance transaction.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            mastery_threshold: default_mastery_threshold(),
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BatchConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.mastery_threshold == 0 {
            return Err(ConfigError::invalid(
                "batch.mastery_threshold",
                "must be greater than zero",
            ));
        }
        if self.interval_secs == 0 {
            return Err(ConfigError::invalid(
                "batch.interval_secs",
                "must be greater than zero",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "batch.timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
