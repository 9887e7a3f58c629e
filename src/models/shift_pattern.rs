//! Weekly shift pattern model.
//!
//! A [`ShiftPattern`] is built from form input for a single request and is
//! never stored. It is validated, expanded into dated shifts, and dropped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// A weekly recurrence describing when a team member intends to work.
///
/// `days` holds weekday indices with 0 = Sunday through 6 = Saturday and is
/// treated as a set. Values are kept raw so validation can report any that
/// fall outside that range.
///
/// # Example
///
/// ```
/// use shift_planner::models::ShiftPattern;
///
/// let pattern: ShiftPattern = serde_json::from_str(r#"{
///     "days": [1, 3, 5],
///     "start_time": "10:00",
///     "end_time": "18:00",
///     "start_date": "2025-01-06",
///     "end_date": "2025-01-19"
/// }"#).unwrap();
///
/// assert!(pattern.includes_weekday(3));
/// assert!(!pattern.includes_weekday(0));
/// assert_eq!(pattern.span_days(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPattern {
    /// Selected weekdays, 0 = Sunday through 6 = Saturday.
    pub days: Vec<i32>,
    /// Start time applied to every generated shift.
    pub start_time: TimeOfDay,
    /// End time applied to every generated shift.
    pub end_time: TimeOfDay,
    /// First calendar date of the pattern (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar date of the pattern (inclusive).
    pub end_date: NaiveDate,
}

impl ShiftPattern {
    /// Returns true when the weekday index is one of the selected days.
    pub fn includes_weekday(&self, weekday: u32) -> bool {
        self.days.iter().any(|&d| i64::from(d) == i64::from(weekday))
    }

    /// Number of calendar days covered, counting both ends.
    ///
    /// Zero or negative when the dates are inverted.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
