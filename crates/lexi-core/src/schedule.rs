//! Daily dispatch window.
//!
//! Dispatch may fire only while the local hour, in a fixed UTC offset, lies in
//! `[hour_from, hour_to)`. A window with `hour_from > hour_to` wraps past
//! midnight; `hour_from == hour_to` never opens.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use serde::Serialize;

use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleWindow {
    hour_from: u32,
    hour_to: u32,
    utc_offset_minutes: i32,
}

impl ScheduleWindow {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `hour_from > 23`, `hour_to > 24`,
    /// or the offset is not strictly within one day.
    pub fn new(hour_from: u32, hour_to: u32, utc_offset_minutes: i32) -> Result<Self, CoreError> {
        if hour_from > 23 {
            return Err(CoreError::Validation(format!(
                "hour_from must be 0..=23, got {hour_from}"
            )));
        }
        if hour_to > 24 {
            return Err(CoreError::Validation(format!(
                "hour_to must be 0..=24, got {hour_to}"
            )));
        }
        if utc_offset_minutes.abs() >= 24 * 60 {
            return Err(CoreError::Validation(format!(
                "utc offset must be within ±24h, got {utc_offset_minutes} minutes"
            )));
        }
        Ok(Self {
            hour_from,
            hour_to,
            utc_offset_minutes,
        })
    }

    #[must_use]
    pub const fn hour_from(&self) -> u32 {
        self.hour_from
    }

    #[must_use]
    pub const fn hour_to(&self) -> u32 {
        self.hour_to
    }

    fn offset(&self) -> FixedOffset {
        // Bounds are checked in `new`.
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Hour of day in the window's time zone.
    #[must_use]
    pub fn local_hour(&self, now: DateTime<Utc>) -> u32 {
        now.with_timezone(&self.offset()).hour()
    }

    #[must_use]
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        let hour = self.local_hour(now);
        if self.hour_from <= self.hour_to {
            hour >= self.hour_from && hour < self.hour_to
        } else {
            hour >= self.hour_from || hour < self.hour_to
        }
    }
}
