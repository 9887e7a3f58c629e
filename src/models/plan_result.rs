//! Plan result models for the Shift Planner.
//!
//! This module contains the [`PlanResult`] type and its associated structures
//! that capture the outcome of previewing or applying a shift pattern,
//! including the scheduled shifts, closure removals, totals and audit trace.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GeneratedShift;

/// How newly generated shifts interact with shifts already stored for the
/// same team member and venue.
///
/// # Example
///
/// ```
/// use shift_planner::models::ConflictMode;
///
/// let mode: ConflictMode = serde_json::from_str("\"replace\"").unwrap();
/// assert_eq!(mode, ConflictMode::Replace);
/// assert_eq!(ConflictMode::default(), ConflictMode::Skip);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictMode {
    /// Keep existing shifts; insert only dates that are free.
    #[default]
    Skip,
    /// Delete existing shifts in the generated range, then insert everything.
    Replace,
}

impl fmt::Display for ConflictMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictMode::Skip => write!(f, "skip"),
            ConflictMode::Replace => write!(f, "replace"),
        }
    }
}

/// Aggregated counts for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTotals {
    /// Shifts produced by expanding the pattern.
    pub generated: usize,
    /// Generated shifts removed because the venue is closed.
    pub closed: usize,
    /// Shifts written to the store. Zero for previews.
    pub inserted: usize,
    /// Shifts left out because one already existed on that date.
    pub conflicts_skipped: usize,
    /// Existing shifts removed under replace mode.
    pub deleted: usize,
    /// Total hours across the shifts remaining after closures.
    pub scheduled_hours: Decimal,
}

/// A single step in the audit trace recording a planning decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during planning.
///
/// Warnings don't stop a plan but usually mean the pattern needs another look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a plan.
///
/// # Example
///
/// ```
/// use shift_planner::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of planning steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during planning.
    pub warnings: Vec<AuditWarning>,
    /// The total planning duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of previewing or applying a shift pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Unique identifier for this plan.
    pub plan_id: Uuid,
    /// When the plan was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the planner that produced the plan.
    pub engine_version: String,
    /// The team member the shifts are for.
    pub team_member_id: String,
    /// The venue the shifts are at.
    pub venue_id: String,
    /// The conflict policy used (or that would be used) when persisting.
    pub conflict_mode: ConflictMode,
    /// True when nothing was written to the store.
    pub dry_run: bool,
    /// Generated shifts remaining after closures, ascending by date.
    pub shifts: Vec<GeneratedShift>,
    /// Generated dates removed because the venue is closed.
    pub closed_dates: Vec<NaiveDate>,
    /// Dates not inserted because a shift already existed (skip mode).
    pub skipped_conflicts: Vec<NaiveDate>,
    /// Aggregated totals for the plan.
    pub totals: PlanTotals,
    /// Complete audit trace of planning decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_sample_result() -> PlanResult {
        PlanResult {
            plan_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            team_member_id: "tm_1".to_string(),
            venue_id: "venue_1".to_string(),
            conflict_mode: ConflictMode::Skip,
            dry_run: true,
            shifts: vec![GeneratedShift {
                shift_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
                start_time: "10:00".parse().unwrap(),
                end_time: "18:00".parse().unwrap(),
            }],
            closed_dates: vec![],
            skipped_conflicts: vec![],
            totals: PlanTotals {
                generated: 1,
                closed: 0,
                inserted: 0,
                conflicts_skipped: 0,
                deleted: 0,
                scheduled_hours: Decimal::new(8, 0),
            },
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![AuditWarning {
                    code: "ALL_SHIFTS_CLOSED".to_string(),
                    message: "test".to_string(),
                    severity: "medium".to_string(),
                }],
                duration_us: 10,
            },
        }
    }

    #[test]
    fn test_conflict_mode_display_matches_serde() {
        for mode in [ConflictMode::Skip, ConflictMode::Replace] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode));
        }
    }

    #[test]
    fn test_plan_result_serialization_round_trip() {
        let result = create_sample_result();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"conflict_mode\":\"skip\""));
        assert!(json.contains("\"shift_date\":\"2025-01-06\""));

        let deserialized: PlanResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }

    #[test]
    fn test_warnings_serialize_with_code() {
        let json = serde_json::to_value(create_sample_result()).unwrap();
        assert_eq!(json["audit_trace"]["warnings"][0]["code"], "ALL_SHIFTS_CLOSED");
    }
}
