//! # lexi-config
//!
//! Layered configuration loading for Lexi using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LEXI_*` prefix, `__` as separator)
//! 2. Project-level `.lexi/config.toml`
//! 3. User-level `~/.config/lexi/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LEXI_SCHEDULE__HOUR_FROM` -> `schedule.hour_from`,
//! `LEXI_GENERAL__TENANTS=[1,2]` -> `general.tenants`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lexi_config::LexiConfig;
//!
//! let config = LexiConfig::load().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod batch;
mod callbacks;
mod database;
mod error;
mod general;
mod schedule;

pub use batch::BatchConfig;
pub use callbacks::{CallbackConfig, MAX_TTL_SECS};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use schedule::ScheduleConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LexiConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub callbacks: CallbackConfig,
}

impl LexiConfig {
    /// Load and validate configuration from all sources (TOML files + environment variables).
    ///
    /// `.env` files are the binary's concern and must be loaded before this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".lexi/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LEXI_").split("__"))
    }

    /// Check cross-field constraints that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        self.schedule.validate()?;
        self.batch.validate()?;
        self.callbacks.validate()?;
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lexi").join("config.toml"))
    }
}
