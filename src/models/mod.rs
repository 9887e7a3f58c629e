//! Core data models for the Shift Planner.
//!
//! This module contains all the domain models used throughout the planner.

mod closure;
mod plan_result;
mod shift;
mod shift_pattern;
mod time_of_day;

pub use closure::VenueClosure;
pub use plan_result::{AuditStep, AuditTrace, AuditWarning, ConflictMode, PlanResult, PlanTotals};
pub use shift::{GeneratedShift, ShiftKey, ShiftRecord};
pub use shift_pattern::ShiftPattern;
pub use time_of_day::{ParseTimeOfDayError, TimeOfDay};
