//! Core domain: catalog, progress, priorities, schedules and reports

pub mod error;
pub mod feasibility;
pub mod models;
pub mod persistence;
pub mod prerequisites;
pub mod priority;
pub mod progress_store;
pub mod report;
pub mod schedule;
pub mod stats;

pub use error::{CatalogError, ScheduleError, StateError};
