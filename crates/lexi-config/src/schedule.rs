//! Quiz dispatch schedule.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use lexi_core::schedule::ScheduleWindow;

use crate::ConfigError;

const fn default_dispatch_interval_secs() -> u64 {
    15 * 60
}

const fn default_hour_from() -> u32 {
    9
}

const fn default_hour_to() -> u32 {
    22
}

const fn default_dispatch_timeout_secs() -> u64 {
    60
}

const fn default_surprise_probability() -> f64 {
    0.01
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// Seconds between dispatch ticks.
    #[serde(default = "default_dispatch_interval_secs")]
    pub dispatch_interval_secs: u64,

    /// First local hour (inclusive) in which prompts may be sent.
    #[serde(default = "default_hour_from")]
    pub hour_from: u32,

    /// Local hour (exclusive) at which sending stops.
    #[serde(default = "default_hour_to")]
    pub hour_to: u32,

    /// Fixed time zone of the window, as minutes east of UTC.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Upper bound for one tenant's dispatch (selection, token, send).
    #[serde(default = "default_dispatch_timeout_secs")]
    pub dispatch_timeout_secs: u64,

    /// Chance of asking a random unmastered word instead of a batch member.
    #[serde(default = "default_surprise_probability")]
    pub surprise_probability: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            dispatch_interval_secs: default_dispatch_interval_secs(),
            hour_from: default_hour_from(),
            hour_to: default_hour_to(),
            utc_offset_minutes: 0,
            dispatch_timeout_secs: default_dispatch_timeout_secs(),
            surprise_probability: default_surprise_probability(),
        }
    }
}

impl ScheduleConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for out-of-range hours or offset.
    pub fn window(&self) -> Result<ScheduleWindow, ConfigError> {
        ScheduleWindow::new(self.hour_from, self.hour_to, self.utc_offset_minutes)
            .map_err(|e| ConfigError::invalid("schedule", e.to_string()))
    }

    #[must_use]
    pub const fn dispatch_interval(&self) -> Duration {
        Duration::from_secs(self.dispatch_interval_secs)
    }

    #[must_use]
    pub const fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.window()?;
        if self.dispatch_interval_secs == 0 {
            return Err(ConfigError::invalid(
                "schedule.dispatch_interval_secs",
                "must be greater than zero",
            ));
        }
        if self.dispatch_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "schedule.dispatch_timeout_secs",
                "must be greater than zero",
            ));
        }
        if !(0.0..=1.0).contains(&self.surprise_probability) {
            return Err(ConfigError::invalid(
                "schedule.surprise_probability",
                format!("must be within [0, 1], got {}", self.surprise_probability),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ScheduleConfig::default();
        assert_eq!(config.dispatch_interval(), Duration::from_secs(900));
        assert_eq!(config.dispatch_timeout(), Duration::from_secs(60));
        assert_eq!((config.hour_from, config.hour_to), (9, 22));
        assert!((config.surprise_probability - 0.01).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let config = ScheduleConfig {
            surprise_probability: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_hours() {
        let config = ScheduleConfig {
            hour_from: 30,
            ..Default::default()
        };
        assert!(config.window().is_err());
    }
}
