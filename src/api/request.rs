//! Request types for the Shift Planner API.
//!
//! This module defines the JSON request and query structures for the
//! pattern and shift endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ConflictMode, ShiftPattern, TimeOfDay};
use crate::scheduling::PlanRequest;

/// A weekly shift pattern as submitted from the scheduling form.
///
/// `days` may be omitted when nothing is ticked; validation then reports
/// the missing selection instead of the request failing to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRequest {
    /// Selected weekdays, 0 = Sunday through 6 = Saturday.
    #[serde(default)]
    pub days: Vec<i32>,
    /// Shift start time (`HH:MM`).
    pub start_time: TimeOfDay,
    /// Shift end time (`HH:MM`).
    pub end_time: TimeOfDay,
    /// First date of the pattern (`YYYY-MM-DD`, inclusive).
    pub start_date: NaiveDate,
    /// Last date of the pattern (`YYYY-MM-DD`, inclusive).
    pub end_date: NaiveDate,
}

/// Request body for the `/patterns/preview` and `/patterns/apply` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftPlanRequest {
    /// The team member the shifts are for.
    pub team_member_id: String,
    /// The venue the shifts are at.
    pub venue_id: String,
    /// The weekly pattern to expand.
    pub pattern: PatternRequest,
    /// Conflict policy; the configured default applies when absent.
    #[serde(default)]
    pub conflict_mode: Option<ConflictMode>,
}

/// Query string for `/venues/{venue_id}/closed-dates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedDatesQuery {
    /// First date to report (inclusive).
    pub from: NaiveDate,
    /// Last date to report (inclusive).
    pub to: NaiveDate,
}

impl From<PatternRequest> for ShiftPattern {
    fn from(req: PatternRequest) -> Self {
        ShiftPattern {
            days: req.days,
            start_time: req.start_time,
            end_time: req.end_time,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

impl From<ShiftPlanRequest> for PlanRequest {
    fn from(req: ShiftPlanRequest) -> Self {
        PlanRequest {
            team_member_id: req.team_member_id,
            venue_id: req.venue_id,
            pattern: req.pattern.into(),
            conflict_mode: req.conflict_mode,
        }
    }
}
