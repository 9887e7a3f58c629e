//! Configuration loading and management for the Shift Planner.
//!
//! This module provides functionality to load planner configuration from
//! YAML files, including the scheduling policy, server settings and venue
//! closures.
//!
//! # Example
//!
//! ```no_run
//! use shift_planner::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Max span: {:?}", config.scheduling().max_span_days);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ClosuresConfig, DEFAULT_MAX_SPAN_DAYS, PlannerConfig, PlannerSettings, SchedulingPolicy, ServerSettings,
    ServiceMetadata,
};
