//! Pending quiz callbacks: lifetime, sweeping, and inbound handling budget.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Longest accepted callback lifetime (one year).
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

const fn default_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

const fn default_sweep_interval_secs() -> u64 {
    60 * 60
}

const fn default_outcome_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackConfig {
    /// How long a prompt's answer buttons stay valid.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Seconds between expired-callback sweeps.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Upper bound for handling one inbound answer.
    #[serde(default = "default_outcome_timeout_secs")]
    pub outcome_timeout_secs: u64,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            outcome_timeout_secs: default_outcome_timeout_secs(),
        }
    }
}

impl CallbackConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    #[must_use]
    pub const fn outcome_timeout(&self) -> Duration {
        Duration::from_secs(self.outcome_timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("callbacks.ttl_secs", self.ttl_secs),
            ("callbacks.sweep_interval_secs", self.sweep_interval_secs),
            ("callbacks.outcome_timeout_secs", self.outcome_timeout_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be greater than zero"));
            }
        }
        if self.ttl_secs > MAX_TTL_SECS {
            return Err(ConfigError::invalid(
                "callbacks.ttl_secs",
                format!("must be at most {MAX_TTL_SECS}, got {}", self.ttl_secs),
            ));
        }
        Ok(())
    }
}
