//! Scheduling logic for the Shift Planner.
//!
//! This module contains pattern validation, expansion of weekly patterns
//! into dated shifts, closed-day filtering, conflict resolution against the
//! shift store, and the planner that ties them together.

mod closed_days;
mod conflict;
mod expansion;
mod planner;
mod validation;

pub use closed_days::{filter_closed, partition_closed};
pub use conflict::{PersistOutcome, PersistTarget, persist_shifts};
pub use expansion::{expand, weekday_index};
pub use planner::{ALL_SHIFTS_CLOSED, NO_SHIFTS_GENERATED, PlanRequest, apply_plan, preview_plan};
pub use validation::{MAX_WEEKDAY_INDEX, ValidationIssue, ValidationReport, validate};
