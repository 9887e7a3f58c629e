//! Shift Planner for multi-venue salon scheduling
//!
//! This crate expands weekly shift patterns for team members into concrete
//! dated shifts, removes venue closures, and persists the result under a
//! skip or replace conflict-resolution policy.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduling;
pub mod store;
