//! Shift date expansion.
//!
//! Turns a weekly pattern into one [`GeneratedShift`] per matching calendar
//! day. Dates stay plain calendar values (`NaiveDate`) throughout, so adding
//! a day can never skip or repeat one around daylight-saving changes.

use chrono::{Datelike, NaiveDate};

use crate::models::{GeneratedShift, ShiftPattern};

/// Returns the weekday index of a date, 0 = Sunday through 6 = Saturday.
///
/// # Example
///
/// ```
/// use shift_planner::scheduling::weekday_index;
/// use chrono::NaiveDate;
///
/// assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()), 0); // Sunday
/// assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()), 1); // Monday
/// assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2025, 1, 11).unwrap()), 6); // Saturday
/// ```
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Expands a pattern into dated shifts.
///
/// Walks every date from `start_date` to `end_date` inclusive and keeps the
/// ones whose weekday is selected. The result is strictly ascending by
/// date. The pattern is expected to have passed validation; an inverted
/// date range yields no shifts.
///
/// # Example
///
/// ```
/// use shift_planner::models::ShiftPattern;
/// use shift_planner::scheduling::expand;
/// use chrono::NaiveDate;
///
/// let pattern = ShiftPattern {
///     days: vec![1, 3, 5],
///     start_time: "10:00".parse().unwrap(),
///     end_time: "18:00".parse().unwrap(),
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 1, 19).unwrap(),
/// };
///
/// let shifts = expand(&pattern);
/// assert_eq!(shifts.len(), 6);
/// assert_eq!(shifts[1].shift_date, NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
/// ```
pub fn expand(pattern: &ShiftPattern) -> Vec<GeneratedShift> {
    pattern
        .start_date
        .iter_days()
        .take_while(|date| *date <= pattern.end_date)
        .filter(|date| pattern.includes_weekday(weekday_index(*date)))
        .map(|shift_date| GeneratedShift {
            shift_date,
            start_time: pattern.start_time,
            end_time: pattern.end_time,
        })
        .collect()
}
