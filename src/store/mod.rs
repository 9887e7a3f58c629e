//! Record store and closure lookup collaborators.
//!
//! The planner never talks to a database directly. It goes through the
//! [`ShiftStore`] and [`ClosureLookup`] traits; [`MemoryShiftStore`] and
//! [`MemoryClosureLookup`] are the in-process implementations used by the
//! service binary and the tests.

mod memory;

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftKey, ShiftRecord};

pub use memory::{MemoryClosureLookup, MemoryShiftStore};

/// Equality and date-range filters for listing shifts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftQuery {
    /// Only shifts for this team member.
    #[serde(default)]
    pub team_member_id: Option<String>,
    /// Only shifts at this venue.
    #[serde(default)]
    pub venue_id: Option<String>,
    /// Only shifts on or after this date.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Only shifts on or before this date.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl ShiftQuery {
    /// Returns true when the record passes every filter that is set.
    pub fn matches(&self, record: &ShiftRecord) -> bool {
        self.team_member_id
            .as_ref()
            .is_none_or(|id| *id == record.team_member_id)
            && self
                .venue_id
                .as_ref()
                .is_none_or(|id| *id == record.venue_id)
            && self.from.is_none_or(|from| record.shift_date >= from)
            && self.to.is_none_or(|to| record.shift_date <= to)
    }
}

/// Result of an insert that ignores natural-key conflicts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Records that were written.
    pub inserted: Vec<ShiftRecord>,
    /// Keys that already existed and were left alone.
    pub skipped: Vec<ShiftKey>,
}

/// Result of replacing the shifts in a date range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// How many existing shifts were removed.
    pub deleted: usize,
    /// Records that were written.
    pub inserted: Vec<ShiftRecord>,
}

/// Persistent storage for shift rows.
///
/// Implementations enforce uniqueness of [`ShiftKey`].
#[async_trait]
pub trait ShiftStore: Send + Sync {
    /// Inserts every record or none of them.
    ///
    /// Fails with [`EngineError::ConstraintViolation`] if any record collides
    /// with a stored shift or with another record in the batch.
    async fn insert_shifts(&self, records: Vec<ShiftRecord>) -> EngineResult<Vec<ShiftRecord>>;

    /// Inserts the records whose natural key is free and skips the rest.
    async fn insert_shifts_if_absent(&self, records: Vec<ShiftRecord>)
    -> EngineResult<InsertOutcome>;

    /// Deletes a team member's shifts at a venue within `[from, to]`.
    async fn delete_shifts_in_range(
        &self,
        team_member_id: &str,
        venue_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<usize>;

    /// Lists shifts matching the query, ordered by date then team member.
    async fn list_shifts(&self, query: &ShiftQuery) -> EngineResult<Vec<ShiftRecord>>;

    /// Deletes the shifts in `[from, to]` and inserts `records` in their place.
    ///
    /// The default implementation runs the two steps separately. If the
    /// insert fails after the delete succeeded the range is left empty and
    /// [`EngineError::PartialFailure`] is returned, retryable only when the
    /// insert failure itself was. Stores that support
    /// transactions should override this to make both steps atomic.
    async fn replace_shifts_in_range(
        &self,
        team_member_id: &str,
        venue_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        records: Vec<ShiftRecord>,
    ) -> EngineResult<ReplaceOutcome> {
        let deleted = self
            .delete_shifts_in_range(team_member_id, venue_id, from, to)
            .await?;

        match self.insert_shifts(records).await {
            Ok(inserted) => Ok(ReplaceOutcome { deleted, inserted }),
            Err(err) => Err(EngineError::PartialFailure {
                deleted,
                retryable: err.is_retryable(),
                message: err.to_string(),
            }),
        }
    }
}

/// Source of venue closure dates.
#[async_trait]
pub trait ClosureLookup: Send + Sync {
    /// Returns the concrete closed dates for a venue within `[from, to]`,
    /// with recurring closures already expanded.
    async fn closed_dates(
        &self,
        venue_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<BTreeSet<NaiveDate>>;
}
