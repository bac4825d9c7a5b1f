//! Shared library for `correlativas`
//!
//! Tracks academic progress through a prerequisite-linked curriculum and
//! assembles conflict-free weekly schedules from commission datasets.
//! The CLI binary in `src/cli` is a thin layer over this crate.

pub mod config;
pub mod core;
pub mod logger;

/// Returns the current version of the `correlativas` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
