//! Generated and persisted shift models.
//!
//! This module defines [`GeneratedShift`] (output of pattern expansion),
//! [`ShiftRecord`] (a persisted shift row) and [`ShiftKey`], the natural key
//! the store enforces.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TimeOfDay;

/// One dated shift produced from a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedShift {
    /// The calendar date of the shift.
    pub shift_date: NaiveDate,
    /// The start time, copied from the pattern.
    pub start_time: TimeOfDay,
    /// The end time, copied from the pattern.
    pub end_time: TimeOfDay,
}

impl GeneratedShift {
    /// Calculates the scheduled length of the shift in hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_planner::models::GeneratedShift;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = GeneratedShift {
    ///     shift_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
    ///     start_time: "10:00".parse().unwrap(),
    ///     end_time: "17:30".parse().unwrap(),
    /// };
    /// assert_eq!(shift.duration_hours(), Decimal::new(75, 1)); // 7.5 hours
    /// ```
    pub fn duration_hours(&self) -> Decimal {
        let start = i64::from(self.start_time.minutes_from_midnight());
        let end = i64::from(self.end_time.minutes_from_midnight());
        Decimal::new(end - start, 0) / Decimal::new(60, 0)
    }

    /// Turns the generated shift into a persistable record for a team member
    /// at a venue.
    pub fn into_record(self, team_member_id: &str, venue_id: &str) -> ShiftRecord {
        ShiftRecord {
            id: Uuid::new_v4(),
            team_member_id: team_member_id.to_string(),
            venue_id: venue_id.to_string(),
            shift_date: self.shift_date,
            start_time: self.start_time,
            end_time: self.end_time,
            created_at: Utc::now(),
        }
    }
}

/// The (team member, venue, date) triple that identifies a stored shift.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftKey {
    /// The team member working the shift.
    pub team_member_id: String,
    /// The venue the shift is worked at.
    pub venue_id: String,
    /// The calendar date of the shift.
    pub shift_date: NaiveDate,
}

/// A shift row held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Unique identifier for the row.
    pub id: Uuid,
    /// The team member working the shift.
    pub team_member_id: String,
    /// The venue the shift is worked at.
    pub venue_id: String,
    /// The calendar date of the shift.
    pub shift_date: NaiveDate,
    /// The start time of the shift.
    pub start_time: TimeOfDay,
    /// The end time of the shift.
    pub end_time: TimeOfDay,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl ShiftRecord {
    /// Returns the natural key of this record.
    pub fn key(&self) -> ShiftKey {
        ShiftKey {
            team_member_id: self.team_member_id.clone(),
            venue_id: self.venue_id.clone(),
            shift_date: self.shift_date,
        }
    }
}
