//! Clock-time parsing.
//!
//! Diary times are entered as `HH:MM` strings. The strict parser reports why an
//! input was rejected; [`minutes_or_zero`] is the lenient entry point used by
//! record assembly, which falls back to midnight on any failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Why a clock string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockParseError {
    /// Input did not split into exactly two colon-separated parts
    #[error("expected HH:MM, got '{0}'")]
    Shape(String),

    /// One of the parts is not a number
    #[error("'{part}' in '{input}' is not a number")]
    NotNumeric { input: String, part: String },

    /// Hour outside 0..=23
    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u32),

    /// Minute outside 0..=59
    #[error("minute {0} is out of range (0-59)")]
    MinuteOutOfRange(u32),
}

/// A wall-clock time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Midnight, also the sentinel used when a clock string cannot be parsed.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Build a clock time, rejecting out-of-range components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ClockParseError> {
        if hour > 23 {
            return Err(ClockParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ClockParseError::MinuteOutOfRange(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.minute)
    }

    /// Minutes elapsed since midnight, in `0..1440`.
    pub fn minutes_since_midnight(self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split(':');
        let (hour, minute) = match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(m), None) => (h, m),
            _ => return Err(ClockParseError::Shape(trimmed.to_string())),
        };

        let number = |part: &str| {
            part.parse::<u32>().map_err(|_| ClockParseError::NotNumeric {
                input: trimmed.to_string(),
                part: part.to_string(),
            })
        };

        Self::new(number(hour)?, number(minute)?)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse an `HH:MM` string into minutes since midnight.
///
/// # Errors
/// Returns a [`ClockParseError`] if the string is not two numeric parts or a
/// component is out of range.
pub fn parse_clock(s: &str) -> Result<u32, ClockParseError> {
    s.parse::<ClockTime>().map(ClockTime::minutes_since_midnight)
}

/// Parse an `HH:MM` string, degrading to `0` (midnight) on failure.
///
/// A failed parse is indistinguishable from `"00:00"` in the return value;
/// callers that care must use [`parse_clock`] instead.
pub fn minutes_or_zero(s: &str) -> u32 {
    match parse_clock(s) {
        Ok(minutes) => minutes,
        Err(e) => {
            log::warn!("treating clock time as 00:00: {e}");
            0
        }
    }
}
