//! HTTP API module for the Shift Planner.
//!
//! This module provides the REST API endpoints for validating, previewing
//! and applying shift patterns, and for reading stored shifts and venue
//! closures.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClosedDatesQuery, PatternRequest, ShiftPlanRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
