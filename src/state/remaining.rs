//! Remaining duration structure and decomposition

use serde::{Deserialize, Serialize};

use crate::display::Unit;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until the target, split into fixed-size buckets.
///
/// This is not a calendar duration: a day is always 86 400 seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingDuration {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl RemainingDuration {
    /// The all-zero duration shown on start and on completion
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn new(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Decompose a millisecond count by successive floor division.
    ///
    /// Non-positive input yields [`RemainingDuration::ZERO`].
    pub fn from_millis(remaining_ms: i64) -> Self {
        if remaining_ms <= 0 {
            return Self::ZERO;
        }

        let days = remaining_ms / MS_PER_DAY;
        let hours = (remaining_ms % MS_PER_DAY) / MS_PER_HOUR;
        let minutes = (remaining_ms % MS_PER_HOUR) / MS_PER_MINUTE;
        let seconds = (remaining_ms % MS_PER_MINUTE) / MS_PER_SECOND;

        Self::new(days as u64, hours as u64, minutes as u64, seconds as u64)
    }

    /// Whole seconds represented by this duration
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }

    /// Milliseconds represented by this duration
    pub fn as_millis(&self) -> i64 {
        self.total_seconds() as i64 * MS_PER_SECOND
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Value of a single unit
    pub fn get(&self, unit: Unit) -> u64 {
        match unit {
            Unit::Days => self.days,
            Unit::Hours => self.hours,
            Unit::Minutes => self.minutes,
            Unit::Seconds => self.seconds,
        }
    }
}
