//! Plan orchestration.
//!
//! Runs validate → expand → closure filter, and for applied plans persists
//! the result, recording each step in an [`AuditTrace`].

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SchedulingPolicy;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ConflictMode, GeneratedShift, PlanResult, PlanTotals,
    ShiftPattern,
};
use crate::store::{ClosureLookup, ShiftStore};

use super::closed_days::partition_closed;
use super::conflict::{PersistTarget, persist_shifts};
use super::expansion::expand;
use super::validation::validate;

/// Warning raised when the pattern matches no date in its range.
pub const NO_SHIFTS_GENERATED: &str = "NO_SHIFTS_GENERATED";

/// Warning raised when closures remove every generated shift.
pub const ALL_SHIFTS_CLOSED: &str = "ALL_SHIFTS_CLOSED";

/// A request to schedule a pattern for a team member at a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// The team member the shifts are for.
    pub team_member_id: String,
    /// The venue the shifts are at.
    pub venue_id: String,
    /// The weekly pattern to expand.
    pub pattern: ShiftPattern,
    /// Conflict policy; the configured default applies when absent.
    #[serde(default)]
    pub conflict_mode: Option<ConflictMode>,
}

/// Intermediate state shared by preview and apply.
struct PlanDraft {
    started: Instant,
    conflict_mode: ConflictMode,
    generated: usize,
    generated_range: Option<(NaiveDate, NaiveDate)>,
    shifts: Vec<GeneratedShift>,
    closed_dates: Vec<NaiveDate>,
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

impl PlanDraft {
    fn push_step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn push_warning(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }

    fn finish(
        self,
        request: &PlanRequest,
        dry_run: bool,
        inserted: usize,
        skipped_conflicts: Vec<NaiveDate>,
        deleted: usize,
    ) -> PlanResult {
        let scheduled_hours: Decimal = self.shifts.iter().map(GeneratedShift::duration_hours).sum();
        let duration_us = self.started.elapsed().as_micros() as u64;

        PlanResult {
            plan_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            team_member_id: request.team_member_id.clone(),
            venue_id: request.venue_id.clone(),
            conflict_mode: self.conflict_mode,
            dry_run,
            totals: PlanTotals {
                generated: self.generated,
                closed: self.closed_dates.len(),
                inserted,
                conflicts_skipped: skipped_conflicts.len(),
                deleted,
                scheduled_hours,
            },
            shifts: self.shifts,
            closed_dates: self.closed_dates,
            skipped_conflicts,
            audit_trace: AuditTrace {
                steps: self.steps,
                warnings: self.warnings,
                duration_us,
            },
        }
    }
}

async fn draft_plan(
    request: &PlanRequest,
    closures: &dyn ClosureLookup,
    policy: &SchedulingPolicy,
) -> EngineResult<PlanDraft> {
    let started = Instant::now();
    let pattern = &request.pattern;
    let conflict_mode = request
        .conflict_mode
        .unwrap_or(policy.default_conflict_mode);

    let report = validate(pattern, policy);
    if !report.valid {
        warn!(
            team_member_id = %request.team_member_id,
            venue_id = %request.venue_id,
            issues = report.errors.len(),
            "Shift pattern rejected"
        );
    }
    report.into_result()?;

    let mut draft = PlanDraft {
        started,
        conflict_mode,
        generated: 0,
        generated_range: None,
        shifts: Vec::new(),
        closed_dates: Vec::new(),
        steps: Vec::new(),
        warnings: Vec::new(),
    };

    draft.push_step(
        "pattern_validation",
        "Pattern Validation",
        serde_json::json!({
            "pattern": pattern,
            "max_span_days": policy.max_span_days,
        }),
        serde_json::json!({ "valid": true }),
        format!(
            "Pattern covers {} day(s) from {} to {}",
            pattern.span_days(),
            pattern.start_date,
            pattern.end_date
        ),
    );

    let generated = expand(pattern);
    draft.generated = generated.len();
    draft.generated_range = generated
        .first()
        .zip(generated.last())
        .map(|(first, last)| (first.shift_date, last.shift_date));

    draft.push_step(
        "shift_expansion",
        "Shift Date Expansion",
        serde_json::json!({
            "days": pattern.days,
            "start_date": pattern.start_date,
            "end_date": pattern.end_date,
        }),
        serde_json::json!({
            "generated": generated.len(),
            "first_date": draft.generated_range.map(|(first, _)| first),
            "last_date": draft.generated_range.map(|(_, last)| last),
        }),
        format!("{} date(s) fall on a selected weekday", generated.len()),
    );

    if generated.is_empty() {
        draft.push_warning(
            NO_SHIFTS_GENERATED,
            "No date in the range falls on a selected weekday".to_string(),
            "medium",
        );
        return Ok(draft);
    }

    let closed = closures
        .closed_dates(&request.venue_id, pattern.start_date, pattern.end_date)
        .await?;
    let (open, removed) = partition_closed(generated, &closed);

    draft.push_step(
        "closure_filter",
        "Closed-Day Filter",
        serde_json::json!({
            "venue_id": request.venue_id,
            "closed_dates_in_range": closed.len(),
        }),
        serde_json::json!({
            "removed": removed,
            "remaining": open.len(),
        }),
        format!(
            "Removed {} shift(s) falling on venue closures",
            removed.len()
        ),
    );

    if open.is_empty() {
        draft.push_warning(
            ALL_SHIFTS_CLOSED,
            format!(
                "Venue {} is closed on every generated date",
                request.venue_id
            ),
            "medium",
        );
    }

    draft.shifts = open;
    draft.closed_dates = removed;
    Ok(draft)
}

/// Expands and filters a pattern without writing anything.
pub async fn preview_plan(
    request: &PlanRequest,
    closures: &dyn ClosureLookup,
    policy: &SchedulingPolicy,
) -> EngineResult<PlanResult> {
    let draft = draft_plan(request, closures, policy).await?;
    let result = draft.finish(request, true, 0, Vec::new(), 0);

    info!(
        team_member_id = %result.team_member_id,
        venue_id = %result.venue_id,
        generated = result.totals.generated,
        closed = result.totals.closed,
        duration_us = result.audit_trace.duration_us,
        "Previewed shift plan"
    );
    Ok(result)
}

/// Expands, filters and persists a pattern under its conflict mode.
///
/// # Example
///
/// ```
/// use shift_planner::config::SchedulingPolicy;
/// use shift_planner::models::ShiftPattern;
/// use shift_planner::scheduling::{PlanRequest, apply_plan};
/// use shift_planner::store::{MemoryClosureLookup, MemoryShiftStore};
/// use chrono::NaiveDate;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// runtime.block_on(async {
///     let store = MemoryShiftStore::new();
///     let closures = MemoryClosureLookup::default();
///     let request = PlanRequest {
///         team_member_id: "tm_1".to_string(),
///         venue_id: "venue_1".to_string(),
///         pattern: ShiftPattern {
///             days: vec![1],
///             start_time: "10:00".parse().unwrap(),
///             end_time: "18:00".parse().unwrap(),
///             start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///             end_date: NaiveDate::from_ymd_opt(2025, 1, 19).unwrap(),
///         },
///         conflict_mode: None,
///     };
///
///     let result = apply_plan(&request, &store, &closures, &SchedulingPolicy::default())
///         .await
///         .unwrap();
///     assert_eq!(result.totals.inserted, 2);
/// });
/// ```
pub async fn apply_plan(
    request: &PlanRequest,
    store: &dyn ShiftStore,
    closures: &dyn ClosureLookup,
    policy: &SchedulingPolicy,
) -> EngineResult<PlanResult> {
    let mut draft = draft_plan(request, closures, policy).await?;

    let target = PersistTarget {
        team_member_id: &request.team_member_id,
        venue_id: &request.venue_id,
        generated_range: draft.generated_range,
    };
    let outcome = persist_shifts(store, target, draft.shifts.clone(), draft.conflict_mode).await?;

    draft.push_step(
        "conflict_resolution",
        "Conflict Resolution",
        serde_json::json!({
            "conflict_mode": draft.conflict_mode,
            "range": draft.generated_range,
            "shifts": draft.shifts.len(),
        }),
        serde_json::json!({
            "inserted": outcome.inserted.len(),
            "skipped_conflicts": outcome.skipped_conflicts,
            "deleted": outcome.deleted,
        }),
        match draft.conflict_mode {
            ConflictMode::Skip => format!(
                "Inserted {} shift(s), left {} existing shift(s) in place",
                outcome.inserted.len(),
                outcome.skipped_conflicts.len()
            ),
            ConflictMode::Replace => format!(
                "Deleted {} existing shift(s) and inserted {}",
                outcome.deleted,
                outcome.inserted.len()
            ),
        },
    );

    let result = draft.finish(
        request,
        false,
        outcome.inserted.len(),
        outcome.skipped_conflicts,
        outcome.deleted,
    );

    info!(
        team_member_id = %result.team_member_id,
        venue_id = %result.venue_id,
        conflict_mode = %result.conflict_mode,
        generated = result.totals.generated,
        closed = result.totals.closed,
        inserted = result.totals.inserted,
        conflicts_skipped = result.totals.conflicts_skipped,
        deleted = result.totals.deleted,
        duration_us = result.audit_trace.duration_us,
        "Applied shift plan"
    );
    Ok(result)
}
