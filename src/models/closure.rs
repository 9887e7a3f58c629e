//! Venue closure model.
//!
//! This module contains the [`VenueClosure`] type describing days a venue is
//! shut, either once or every year.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A period during which a venue takes no shifts.
///
/// Annual closures repeat on the same month and day from the year of
/// `start_date` onward. A closure starting on 29 February only applies in
/// leap years. A closure crossing New Year recurs as a whole.
///
/// # Example
///
/// ```
/// use shift_planner::models::VenueClosure;
/// use chrono::NaiveDate;
///
/// let christmas = VenueClosure {
///     venue_id: "venue_1".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
///     end_date: Some(NaiveDate::from_ymd_opt(2024, 12, 26).unwrap()),
///     reason: Some("Christmas".to_string()),
///     recurs_annually: true,
/// };
///
/// let dates = christmas.dates_within(
///     NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
/// );
/// assert_eq!(dates, vec![
///     NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 12, 26).unwrap(),
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueClosure {
    /// The venue this closure belongs to.
    pub venue_id: String,
    /// The first closed date (inclusive).
    pub start_date: NaiveDate,
    /// The last closed date (inclusive). Defaults to `start_date`.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Why the venue is closed (e.g., "Christmas", "Refit").
    #[serde(default)]
    pub reason: Option<String>,
    /// Whether the closure repeats every year.
    #[serde(default)]
    pub recurs_annually: bool,
}

impl VenueClosure {
    /// Returns the last closed date of the first occurrence.
    pub fn last_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Expands the closure into the concrete closed dates within
    /// `[from, to]`, ascending.
    pub fn dates_within(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let last = self.last_date();
        if from > to || last < self.start_date {
            return Vec::new();
        }

        if !self.recurs_annually {
            return dates_between(self.start_date.max(from), last.min(to));
        }

        let length = (last - self.start_date).num_days().unsigned_abs();
        let first_year = (from.year() - 1).max(self.start_date.year());
        let mut dates = BTreeSet::new();

        for year in first_year..=to.year() {
            // None for 29 February in a non-leap year
            let Some(start) = self.start_date.with_year(year) else {
                continue;
            };
            let Some(end) = start.checked_add_days(Days::new(length)) else {
                continue;
            };
            dates.extend(dates_between(start.max(from), end.min(to)));
        }

        dates.into_iter().collect()
    }
}

fn dates_between(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|d| *d <= to).collect()
}
