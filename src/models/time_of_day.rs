//! Local time-of-day values.
//!
//! Shift boundaries are exchanged as fixed-width `HH:MM` strings. Wrapping
//! them in [`TimeOfDay`] keeps ordering and formatting in one place.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A local time of day with minute precision.
///
/// Ordering matches the lexical ordering of the `HH:MM` form.
///
/// # Example
///
/// ```
/// use shift_planner::models::TimeOfDay;
///
/// let open: TimeOfDay = "09:30".parse().unwrap();
/// let close: TimeOfDay = "18:00".parse().unwrap();
/// assert!(open < close);
/// assert_eq!(open.to_string(), "09:30");
/// assert!("9:30".parse::<TimeOfDay>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

/// Error returned when a string is not a fixed-width `HH:MM` time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day '{0}', expected HH:MM")]
pub struct ParseTimeOfDayError(String);

impl TimeOfDay {
    /// Builds a time from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono's %H and %M accept leading spaces, so digits are checked here
        let fixed_width = matches!(
            s.as_bytes(),
            [h1, h2, b':', m1, m2] if [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
        );
        if !fixed_width {
            return Err(ParseTimeOfDayError(s.to_string()));
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| ParseTimeOfDayError(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
