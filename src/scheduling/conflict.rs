//! Conflict resolution when persisting generated shifts.
//!
//! Under [`ConflictMode::Skip`] shifts already stored on a date win and the
//! generated one is dropped. Under [`ConflictMode::Replace`] the stored
//! shifts in the generated range are removed before inserting.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::EngineResult;
use crate::models::{ConflictMode, GeneratedShift};
use crate::store::ShiftStore;

/// What persisting a set of generated shifts changed in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Dates that were written.
    pub inserted: Vec<NaiveDate>,
    /// Dates left out because a shift already existed (skip mode only).
    pub skipped_conflicts: Vec<NaiveDate>,
    /// Existing shifts removed (replace mode only).
    pub deleted: usize,
}

/// Where a team member's shifts are written and which dates the pattern
/// covered before closures were removed.
#[derive(Debug, Clone, Copy)]
pub struct PersistTarget<'a> {
    /// The team member the shifts belong to.
    pub team_member_id: &'a str,
    /// The venue the shifts are at.
    pub venue_id: &'a str,
    /// First and last generated date, before closure filtering.
    ///
    /// `None` when the pattern matched no dates at all.
    pub generated_range: Option<(NaiveDate, NaiveDate)>,
}

/// Writes shifts to the store under a conflict-resolution mode.
///
/// In replace mode every stored shift for the team member and venue within
/// `target.generated_range` is deleted, including ones on closed dates, and
/// all `shifts` are inserted. If the store cannot do both atomically and the
/// insert fails, the error is a retryable
/// [`PartialFailure`](crate::error::EngineError::PartialFailure).
pub async fn persist_shifts(
    store: &dyn ShiftStore,
    target: PersistTarget<'_>,
    shifts: Vec<GeneratedShift>,
    mode: ConflictMode,
) -> EngineResult<PersistOutcome> {
    let Some((from, to)) = target.generated_range else {
        return Ok(PersistOutcome::default());
    };

    let records: Vec<_> = shifts
        .into_iter()
        .map(|shift| shift.into_record(target.team_member_id, target.venue_id))
        .collect();

    match mode {
        ConflictMode::Skip => {
            let outcome = store.insert_shifts_if_absent(records).await?;
            if !outcome.skipped.is_empty() {
                info!(
                    team_member_id = target.team_member_id,
                    venue_id = target.venue_id,
                    skipped = outcome.skipped.len(),
                    "Left existing shifts in place"
                );
            }
            Ok(PersistOutcome {
                inserted: outcome.inserted.iter().map(|r| r.shift_date).collect(),
                skipped_conflicts: outcome.skipped.into_iter().map(|k| k.shift_date).collect(),
                deleted: 0,
            })
        }
        ConflictMode::Replace => {
            let outcome = store
                .replace_shifts_in_range(target.team_member_id, target.venue_id, from, to, records)
                .await
                .inspect_err(|err| {
                    warn!(
                        team_member_id = target.team_member_id,
                        venue_id = target.venue_id,
                        error = %err,
                        retryable = err.is_retryable(),
                        "Replacing shifts failed"
                    );
                })?;
            Ok(PersistOutcome {
                inserted: outcome.inserted.iter().map(|r| r.shift_date).collect(),
                skipped_conflicts: Vec::new(),
                deleted: outcome.deleted,
            })
        }
    }
}
