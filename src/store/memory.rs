//! In-memory collaborator implementations.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftKey, ShiftRecord, VenueClosure};

use super::{ClosureLookup, InsertOutcome, ReplaceOutcome, ShiftQuery, ShiftStore};

/// A [`ShiftStore`] backed by an ordered map keyed on [`ShiftKey`].
///
/// Range replacement holds the write lock across delete and insert, so it
/// is atomic.
#[derive(Debug, Default)]
pub struct MemoryShiftStore {
    shifts: RwLock<BTreeMap<ShiftKey, ShiftRecord>>,
}

impl MemoryShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.shifts.read().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.shifts.read().await.is_empty()
    }
}

fn constraint_violation(key: ShiftKey) -> EngineError {
    EngineError::ConstraintViolation {
        team_member_id: key.team_member_id,
        venue_id: key.venue_id,
        shift_date: key.shift_date,
    }
}

/// Finds the first record colliding with `existing` or with an earlier
/// record in the batch.
fn first_collision(
    existing: &BTreeMap<ShiftKey, ShiftRecord>,
    records: &[ShiftRecord],
) -> Option<ShiftKey> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .map(ShiftRecord::key)
        .find(|key| existing.contains_key(key) || !seen.insert(key.clone()))
}

fn in_range(
    key: &ShiftKey,
    team_member_id: &str,
    venue_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> bool {
    key.team_member_id == team_member_id
        && key.venue_id == venue_id
        && key.shift_date >= from
        && key.shift_date <= to
}

#[async_trait]
impl ShiftStore for MemoryShiftStore {
    async fn insert_shifts(&self, records: Vec<ShiftRecord>) -> EngineResult<Vec<ShiftRecord>> {
        let mut shifts = self.shifts.write().await;

        if let Some(key) = first_collision(&shifts, &records) {
            return Err(constraint_violation(key));
        }

        for record in &records {
            shifts.insert(record.key(), record.clone());
        }
        debug!(count = records.len(), "Inserted shifts");
        Ok(records)
    }

    async fn insert_shifts_if_absent(
        &self,
        records: Vec<ShiftRecord>,
    ) -> EngineResult<InsertOutcome> {
        let mut shifts = self.shifts.write().await;
        let mut outcome = InsertOutcome::default();

        for record in records {
            let key = record.key();
            if shifts.contains_key(&key) {
                outcome.skipped.push(key);
            } else {
                shifts.insert(key, record.clone());
                outcome.inserted.push(record);
            }
        }

        debug!(
            inserted = outcome.inserted.len(),
            skipped = outcome.skipped.len(),
            "Inserted shifts ignoring conflicts"
        );
        Ok(outcome)
    }

    async fn delete_shifts_in_range(
        &self,
        team_member_id: &str,
        venue_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<usize> {
        let mut shifts = self.shifts.write().await;
        let before = shifts.len();
        shifts.retain(|key, _| !in_range(key, team_member_id, venue_id, from, to));
        let deleted = before - shifts.len();

        debug!(team_member_id, venue_id, %from, %to, deleted, "Deleted shifts in range");
        Ok(deleted)
    }

    async fn list_shifts(&self, query: &ShiftQuery) -> EngineResult<Vec<ShiftRecord>> {
        let shifts = self.shifts.read().await;
        let mut matching: Vec<ShiftRecord> = shifts
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            (a.shift_date, &a.team_member_id, &a.venue_id).cmp(&(
                b.shift_date,
                &b.team_member_id,
                &b.venue_id,
            ))
        });
        Ok(matching)
    }

    async fn replace_shifts_in_range(
        &self,
        team_member_id: &str,
        venue_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        records: Vec<ShiftRecord>,
    ) -> EngineResult<ReplaceOutcome> {
        let mut shifts = self.shifts.write().await;

        let mut remaining = shifts.clone();
        remaining.retain(|key, _| !in_range(key, team_member_id, venue_id, from, to));
        let deleted = shifts.len() - remaining.len();

        // Checked before anything changes so a failed replace leaves the range intact
        if let Some(key) = first_collision(&remaining, &records) {
            return Err(constraint_violation(key));
        }

        for record in &records {
            remaining.insert(record.key(), record.clone());
        }
        *shifts = remaining;

        debug!(
            team_member_id,
            venue_id,
            %from,
            %to,
            deleted,
            inserted = records.len(),
            "Replaced shifts in range"
        );
        Ok(ReplaceOutcome {
            deleted,
            inserted: records,
        })
    }
}

/// A [`ClosureLookup`] over a list of [`VenueClosure`]s.
#[derive(Debug, Default)]
pub struct MemoryClosureLookup {
    closures: RwLock<Vec<VenueClosure>>,
}

impl MemoryClosureLookup {
    /// Creates a lookup seeded with closures.
    pub fn new(closures: Vec<VenueClosure>) -> Self {
        Self {
            closures: RwLock::new(closures),
        }
    }

    /// Registers another closure.
    pub async fn add_closure(&self, closure: VenueClosure) {
        self.closures.write().await.push(closure);
    }
}

#[async_trait]
impl ClosureLookup for MemoryClosureLookup {
    async fn closed_dates(
        &self,
        venue_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<BTreeSet<NaiveDate>> {
        let closures = self.closures.read().await;
        Ok(closures
            .iter()
            .filter(|closure| closure.venue_id == venue_id)
            .flat_map(|closure| closure.dates_within(from, to))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeneratedShift;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn record(team_member_id: &str, date: &str) -> ShiftRecord {
        GeneratedShift {
            shift_date: make_date(date),
            start_time: "10:00".parse().unwrap(),
            end_time: "18:00".parse().unwrap(),
        }
        .into_record(team_member_id, "venue_1")
    }

    #[tokio::test]
    async fn test_insert_then_list_in_date_order() {
        let store = MemoryShiftStore::new();
        store
            .insert_shifts(vec![
                record("tm_2", "2025-01-06"),
                record("tm_1", "2025-01-08"),
                record("tm_1", "2025-01-06"),
            ])
            .await
            .unwrap();

        let listed = store.list_shifts(&ShiftQuery::default()).await.unwrap();
        let order: Vec<(String, String)> = listed
            .iter()
            .map(|r| (r.shift_date.to_string(), r.team_member_id.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("2025-01-06".to_string(), "tm_1".to_string()),
                ("2025-01-06".to_string(), "tm_2".to_string()),
                ("2025-01-08".to_string(), "tm_1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_insert_duplicate_fails_and_writes_nothing() {
        let store = MemoryShiftStore::new();
        store
            .insert_shifts(vec![record("tm_1", "2025-01-06")])
            .await
            .unwrap();

        let result = store
            .insert_shifts(vec![record("tm_1", "2025-01-08"), record("tm_1", "2025-01-06")])
            .await;

        match result {
            Err(EngineError::ConstraintViolation { shift_date, .. }) => {
                assert_eq!(shift_date, make_date("2025-01-06"));
            }
            other => panic!("Expected ConstraintViolation, got {:?}", other),
        }
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_duplicate_within_batch_fails() {
        let store = MemoryShiftStore::new();
        let result = store
            .insert_shifts(vec![record("tm_1", "2025-01-06"), record("tm_1", "2025-01-06")])
            .await;
        assert!(matches!(result, Err(EngineError::ConstraintViolation { .. })));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_insert_if_absent_skips_existing() {
        let store = MemoryShiftStore::new();
        let existing = record("tm_1", "2025-01-08");
        store.insert_shifts(vec![existing.clone()]).await.unwrap();

        let outcome = store
            .insert_shifts_if_absent(vec![record("tm_1", "2025-01-06"), record("tm_1", "2025-01-08")])
            .await
            .unwrap();

        assert_eq!(outcome.inserted.len(), 1);
        assert_eq!(outcome.skipped, vec![existing.key()]);

        let stored = store.list_shifts(&ShiftQuery::default()).await.unwrap();
        assert!(stored.iter().any(|r| r.id == existing.id));
    }

    #[tokio::test]
    async fn test_delete_only_touches_member_venue_and_range() {
        let store = MemoryShiftStore::new();
        let mut other_venue = record("tm_1", "2025-01-07");
        other_venue.venue_id = "venue_2".to_string();
        store
            .insert_shifts(vec![
                record("tm_1", "2025-01-05"),
                record("tm_1", "2025-01-06"),
                record("tm_1", "2025-01-07"),
                record("tm_2", "2025-01-07"),
                other_venue,
            ])
            .await
            .unwrap();

        let deleted = store
            .delete_shifts_in_range(
                "tm_1",
                "venue_1",
                make_date("2025-01-06"),
                make_date("2025-01-07"),
            )
            .await
            .unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_replace_is_atomic_on_conflict() {
        let store = MemoryShiftStore::new();
        store
            .insert_shifts(vec![record("tm_1", "2025-01-06"), record("tm_1", "2025-01-20")])
            .await
            .unwrap();

        // 2025-01-20 lies outside the replaced range and so still collides
        let result = store
            .replace_shifts_in_range(
                "tm_1",
                "venue_1",
                make_date("2025-01-06"),
                make_date("2025-01-17"),
                vec![record("tm_1", "2025-01-08"), record("tm_1", "2025-01-20")],
            )
            .await;

        assert!(matches!(result, Err(EngineError::ConstraintViolation { .. })));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_replace_swaps_range_contents() {
        let store = MemoryShiftStore::new();
        store
            .insert_shifts(vec![record("tm_1", "2025-01-06"), record("tm_1", "2025-01-07")])
            .await
            .unwrap();

        let outcome = store
            .replace_shifts_in_range(
                "tm_1",
                "venue_1",
                make_date("2025-01-06"),
                make_date("2025-01-10"),
                vec![record("tm_1", "2025-01-06"), record("tm_1", "2025-01-08")],
            )
            .await
            .unwrap();

        assert_eq!(outcome.deleted, 2);
        assert_eq!(outcome.inserted.len(), 2);

        let dates: Vec<String> = store
            .list_shifts(&ShiftQuery::default())
            .await
            .unwrap()
            .iter()
            .map(|r| r.shift_date.to_string())
            .collect();
        assert_eq!(dates, vec!["2025-01-06", "2025-01-08"]);
    }

    #[tokio::test]
    async fn test_closure_lookup_filters_by_venue_and_expands_recurring() {
        let lookup = MemoryClosureLookup::new(vec![
            VenueClosure {
                venue_id: "venue_1".to_string(),
                start_date: make_date("2020-01-08"),
                end_date: None,
                reason: Some("Stocktake".to_string()),
                recurs_annually: true,
            },
            VenueClosure {
                venue_id: "venue_2".to_string(),
                start_date: make_date("2025-01-10"),
                end_date: None,
                reason: None,
                recurs_annually: false,
            },
        ]);
        lookup
            .add_closure(VenueClosure {
                venue_id: "venue_1".to_string(),
                start_date: make_date("2025-01-15"),
                end_date: Some(make_date("2025-01-16")),
                reason: None,
                recurs_annually: false,
            })
            .await;

        let closed = lookup
            .closed_dates("venue_1", make_date("2025-01-06"), make_date("2025-01-19"))
            .await
            .unwrap();

        assert_eq!(
            closed,
            BTreeSet::from([
                make_date("2025-01-08"),
                make_date("2025-01-15"),
                make_date("2025-01-16"),
            ])
        );
    }
}
