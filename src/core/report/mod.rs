//! Report generation for academic progress and the weekly schedule
//!
//! Reports are rendered from embedded templates with `{{placeholder}}`
//! substitution. HTML reports draw one weekly calendar per semester using the
//! same block layout as the interactive schedule view; Markdown reports list
//! progress, priorities and the fixed classes.

pub mod formats;

use crate::core::models::{CourseCatalog, FixedClass};
use crate::core::priority::{priority_list, PriorityEntry, PriorityScope};
use crate::core::progress_store::ProgressStore;
use crate::core::schedule::ScheduleSession;
use crate::core::stats::{compute_stats, year_statuses, ProgressStats, YearStatus};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
///
/// Statistics are computed once at construction so every section of a
/// report sees the same numbers.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Course catalog
    pub catalog: &'a CourseCatalog,
    /// Progress and active electives
    pub store: &'a ProgressStore,
    /// Fixed classes and saved schedules
    pub session: &'a ScheduleSession,
    /// Progress statistics
    pub stats: ProgressStats,
    /// Per-year summary over mandatory courses
    pub years: BTreeMap<u8, YearStatus>,
    /// Generation timestamp
    pub generated_at: DateTime<Local>,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub fn new(
        catalog: &'a CourseCatalog,
        store: &'a ProgressStore,
        session: &'a ScheduleSession,
    ) -> Self {
        Self {
            catalog,
            store,
            session,
            stats: compute_stats(store, catalog),
            years: year_statuses(store, catalog),
            generated_at: Local::now(),
        }
    }

    /// Ranked courses for `scope`
    #[must_use]
    pub fn priority(&self, scope: PriorityScope) -> Vec<PriorityEntry<'a>> {
        priority_list(self.store.progress(), self.catalog, scope)
    }

    /// Committed classes
    #[must_use]
    pub fn fixed(&self) -> &'a [FixedClass] {
        self.session.fixed()
    }

    /// Generation date as `YYYY-MM-DD HH:MM`
    #[must_use]
    pub fn generated_on(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Average grade with two decimals, or `-`
    #[must_use]
    pub fn average_grade(&self) -> String {
        self.stats
            .average_grade
            .map_or_else(|| "-".to_string(), |avg| format!("{avg:.2}"))
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
