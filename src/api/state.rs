//! Application state for the Shift Planner API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, SchedulingPolicy};
use crate::store::{ClosureLookup, MemoryClosureLookup, MemoryShiftStore, ShiftStore};

/// Shared application state.
///
/// Contains the loaded configuration and the collaborators the planner
/// reads from and writes to.
#[derive(Clone)]
pub struct AppState {
    /// The loaded planner configuration.
    config: Arc<ConfigLoader>,
    /// Where shifts are persisted.
    store: Arc<dyn ShiftStore>,
    /// Where venue closures come from.
    closures: Arc<dyn ClosureLookup>,
}

impl AppState {
    /// Creates a new application state from its collaborators.
    pub fn new(
        config: ConfigLoader,
        store: Arc<dyn ShiftStore>,
        closures: Arc<dyn ClosureLookup>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            closures,
        }
    }

    /// Creates a state backed by in-memory collaborators, with closures
    /// seeded from the configuration.
    pub fn in_memory(config: ConfigLoader) -> Self {
        let closures = MemoryClosureLookup::new(config.config().closures().to_vec());
        Self::new(
            config,
            Arc::new(MemoryShiftStore::new()),
            Arc::new(closures),
        )
    }

    /// Returns the scheduling policy.
    pub fn policy(&self) -> &SchedulingPolicy {
        self.config.scheduling()
    }

    /// Returns the shift store.
    pub fn store(&self) -> &dyn ShiftStore {
        self.store.as_ref()
    }

    /// Returns the closure lookup.
    pub fn closures(&self) -> &dyn ClosureLookup {
        self.closures.as_ref()
    }
}
