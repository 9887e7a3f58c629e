//! Error types for the Shift Planner.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while planning and persisting
//! shifts.

use chrono::NaiveDate;
use thiserror::Error;

use crate::scheduling::ValidationIssue;

/// The main error type for the Shift Planner.
///
/// # Example
///
/// ```
/// use shift_planner::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/planner.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/planner.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift pattern failed validation. Expansion never runs in this case.
    #[error("Invalid shift pattern: {}", format_issues(.issues))]
    ValidationFailed {
        /// Every violation found, in check order.
        issues: Vec<ValidationIssue>,
    },

    /// A shift with the same team member, venue and date already exists.
    #[error(
        "Shift already exists for team member '{team_member_id}' at venue '{venue_id}' on {shift_date}"
    )]
    ConstraintViolation {
        /// The team member of the colliding shift.
        team_member_id: String,
        /// The venue of the colliding shift.
        venue_id: String,
        /// The date of the colliding shift.
        shift_date: NaiveDate,
    },

    /// Existing shifts were deleted but the replacement insert failed.
    ///
    /// The range is left without shifts. Whether a retry can succeed
    /// depends on what made the insert fail.
    #[error("Replaced range is empty: deleted {deleted} shift(s) but insert failed: {message}")]
    PartialFailure {
        /// How many shifts the delete step removed.
        deleted: usize,
        /// The insert failure.
        message: String,
        /// Whether the insert failure was transient.
        retryable: bool,
    },

    /// The shift store could not complete a request.
    #[error("Shift store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// Closed dates could not be fetched for a venue.
    #[error("Closure lookup failed for venue '{venue_id}': {message}")]
    ClosureLookupFailed {
        /// The venue whose closures were requested.
        venue_id: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true when retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::PartialFailure { retryable, .. } => *retryable,
            EngineError::StoreUnavailable { .. } | EngineError::ClosureLookupFailed { .. } => true,
            _ => false,
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
