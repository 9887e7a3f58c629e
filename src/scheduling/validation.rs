//! Shift pattern validation.
//!
//! Every rule is checked independently so a form can show all problems at
//! once. Validation never fails with an error; it returns a
//! [`ValidationReport`].

use serde::{Deserialize, Serialize};

use crate::config::SchedulingPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::ShiftPattern;

/// Highest valid weekday index (Saturday).
pub const MAX_WEEKDAY_INDEX: i32 = 6;

/// A single rule violation, tied to the form field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The pattern field the issue is reported against.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationIssue {
    /// Creates a new issue for a field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating a shift pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no rule was violated.
    pub valid: bool,
    /// Every violation found, in check order.
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Converts the report into a result so callers can use `?`.
    pub fn into_result(self) -> EngineResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(EngineError::ValidationFailed {
                issues: self.errors,
            })
        }
    }
}

/// Validates a shift pattern against the scheduling policy.
///
/// Checks, all run regardless of earlier failures:
/// - at least one day is selected and every day is within 0..=6
/// - the start time is before the end time
/// - the start date is on or before the end date
/// - the span does not exceed `policy.max_span_days`, when set
///
/// # Example
///
/// ```
/// use shift_planner::config::SchedulingPolicy;
/// use shift_planner::models::ShiftPattern;
/// use shift_planner::scheduling::validate;
/// use chrono::NaiveDate;
///
/// let pattern = ShiftPattern {
///     days: vec![],
///     start_time: "18:00".parse().unwrap(),
///     end_time: "10:00".parse().unwrap(),
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 1, 19).unwrap(),
/// };
///
/// let report = validate(&pattern, &SchedulingPolicy::default());
/// assert!(!report.valid);
/// assert_eq!(report.errors.len(), 2);
/// ```
pub fn validate(pattern: &ShiftPattern, policy: &SchedulingPolicy) -> ValidationReport {
    let mut issues = Vec::new();

    if pattern.days.is_empty() {
        issues.push(ValidationIssue::new(
            "days",
            "Select at least one day of the week",
        ));
    }
    for day in pattern
        .days
        .iter()
        .filter(|d| !(0..=MAX_WEEKDAY_INDEX).contains(*d))
    {
        issues.push(ValidationIssue::new(
            "days",
            format!(
                "Day {} is out of range; expected 0 (Sunday) to {} (Saturday)",
                day, MAX_WEEKDAY_INDEX
            ),
        ));
    }

    if pattern.start_time >= pattern.end_time {
        issues.push(ValidationIssue::new(
            "start_time",
            format!(
                "Start time {} must be before end time {}",
                pattern.start_time, pattern.end_time
            ),
        ));
    }

    if pattern.start_date > pattern.end_date {
        issues.push(ValidationIssue::new(
            "start_date",
            format!(
                "Start date {} must be on or before end date {}",
                pattern.start_date, pattern.end_date
            ),
        ));
    } else if let Some(max_span_days) = policy.max_span_days {
        let span = pattern.span_days();
        if span > i64::from(max_span_days) {
            issues.push(ValidationIssue::new(
                "end_date",
                format!(
                    "Date range covers {} days, more than the allowed {}",
                    span, max_span_days
                ),
            ));
        }
    }

    ValidationReport::from_issues(issues)
}
