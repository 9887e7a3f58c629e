//! Configuration types for the Shift Planner.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::models::{ConflictMode, VenueClosure};

/// Metadata about the running service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceMetadata {
    /// The service name reported in logs.
    pub name: String,
    /// The deployment environment (e.g., "local", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_environment() -> String {
    "local".to_string()
}

/// Business rules applied when planning shifts.
///
/// # Example
///
/// ```
/// use shift_planner::config::SchedulingPolicy;
/// use shift_planner::models::ConflictMode;
///
/// let policy = SchedulingPolicy::default();
/// assert_eq!(policy.max_span_days, Some(366));
/// assert_eq!(policy.default_conflict_mode, ConflictMode::Skip);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingPolicy {
    /// Longest date range a single pattern may cover, counting both ends.
    ///
    /// `None` means no limit. Expansion materialises one shift per matching
    /// day, so an unbounded policy lets a single request allocate shifts
    /// for every day up to `NaiveDate::MAX`.
    #[serde(default = "default_max_span_days")]
    pub max_span_days: Option<u32>,
    /// Conflict mode used when a request doesn't name one.
    #[serde(default)]
    pub default_conflict_mode: ConflictMode,
}

/// Span ceiling applied when configuration doesn't set one.
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 366;

fn default_max_span_days() -> Option<u32> {
    Some(DEFAULT_MAX_SPAN_DAYS)
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            max_span_days: default_max_span_days(),
            default_conflict_mode: ConflictMode::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

/// Planner configuration file structure (`planner.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerSettings {
    /// Service metadata.
    pub service: ServiceMetadata,
    /// Scheduling policy.
    #[serde(default)]
    pub scheduling: SchedulingPolicy,
    /// Server settings.
    pub server: ServerSettings,
}

/// Closures configuration file structure (`closures.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ClosuresConfig {
    /// Known venue closures.
    #[serde(default)]
    pub closures: Vec<VenueClosure>,
}

/// The complete planner configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    settings: PlannerSettings,
    /// Closures sorted by venue then start date.
    closures: Vec<VenueClosure>,
}

impl PlannerConfig {
    /// Creates a new PlannerConfig from its component parts.
    pub fn new(settings: PlannerSettings, closures: Vec<VenueClosure>) -> Self {
        let mut sorted_closures = closures;
        sorted_closures.sort_by(|a, b| {
            (&a.venue_id, a.start_date).cmp(&(&b.venue_id, b.start_date))
        });
        Self {
            settings,
            closures: sorted_closures,
        }
    }

    /// Returns the service metadata.
    pub fn service(&self) -> &ServiceMetadata {
        &self.settings.service
    }

    /// Returns the scheduling policy.
    pub fn scheduling(&self) -> &SchedulingPolicy {
        &self.settings.scheduling
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerSettings {
        &self.settings.server
    }

    /// Returns all configured closures.
    pub fn closures(&self) -> &[VenueClosure] {
        &self.closures
    }
}
