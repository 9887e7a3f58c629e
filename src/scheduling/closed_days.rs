//! Closed-day filtering.
//!
//! Removes generated shifts that land on a venue closure. Closures must
//! already be concrete dates; recurring closures are expanded by the
//! closure lookup before they reach this module.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::GeneratedShift;

/// Drops every shift whose date is in `closed`, keeping the original order.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use shift_planner::models::GeneratedShift;
/// use shift_planner::scheduling::filter_closed;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
/// let shift = |d| GeneratedShift {
///     shift_date: day(d),
///     start_time: "10:00".parse().unwrap(),
///     end_time: "18:00".parse().unwrap(),
/// };
///
/// let closed = BTreeSet::from([day(8)]);
/// let open = filter_closed(vec![shift(6), shift(8), shift(10)], &closed);
/// assert_eq!(open, vec![shift(6), shift(10)]);
/// ```
pub fn filter_closed(
    shifts: Vec<GeneratedShift>,
    closed: &BTreeSet<NaiveDate>,
) -> Vec<GeneratedShift> {
    partition_closed(shifts, closed).0
}

/// Splits shifts into those on open days and the dates that were closed.
///
/// Both outputs keep the input order.
pub fn partition_closed(
    shifts: Vec<GeneratedShift>,
    closed: &BTreeSet<NaiveDate>,
) -> (Vec<GeneratedShift>, Vec<NaiveDate>) {
    let mut open = Vec::with_capacity(shifts.len());
    let mut removed = Vec::new();

    for shift in shifts {
        if closed.contains(&shift.shift_date) {
            removed.push(shift.shift_date);
        } else {
            open.push(shift);
        }
    }

    (open, removed)
}
