//! Progress statistics and per-year summaries

use crate::core::models::{Course, CourseCatalog, CourseId, Status};
use crate::core::prerequisites::is_locked;
use crate::core::progress_store::ProgressStore;
use std::collections::BTreeMap;
use std::fmt;

/// Aggregate progress over the tracked courses (mandatory plus active electives)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressStats {
    /// Number of tracked courses
    pub total: usize,
    /// Tracked courses approved
    pub approved: usize,
    /// Tracked courses regularized
    pub regularized: usize,
    /// Tracked courses pending and unlocked
    pub available: usize,
    /// Tracked courses pending and locked
    pub locked: usize,
    /// Rounded share of approved tracked courses (0-100)
    pub percentage: u32,
    /// Mean of numeric grades on approved entries
    pub average_grade: Option<f64>,
    /// Credits earned from approved active electives
    pub elective_credits: u32,
    /// Electives not yet added that could be taken now
    pub addable_electives: usize,
    /// Tracked courses with no status whose prerequisites are met
    pub ready_to_start: Vec<CourseId>,
}

/// Courses that count toward progress: every mandatory course and the active electives
pub fn tracked_courses<'a>(
    catalog: &'a CourseCatalog,
    electives: &'a [CourseId],
) -> impl Iterator<Item = &'a Course> + 'a {
    catalog
        .courses()
        .iter()
        .filter(move |course| course.is_mandatory() || electives.contains(&course.id))
}

/// Compute statistics for the current store
#[must_use]
pub fn compute_stats(store: &ProgressStore, catalog: &CourseCatalog) -> ProgressStats {
    let progress = store.progress();
    let mut stats = ProgressStats::default();

    for course in tracked_courses(catalog, store.electives()) {
        stats.total += 1;
        let status = progress.status(course.id);
        match status {
            Some(Status::Approved) => stats.approved += 1,
            Some(Status::Regularized) => stats.regularized += 1,
            _ if is_locked(course, progress, catalog) => stats.locked += 1,
            _ => {
                stats.available += 1;
                if status.is_none() {
                    stats.ready_to_start.push(course.id);
                }
            }
        }
    }

    stats.percentage = percentage(stats.approved, stats.total);

    let grades: Vec<f64> = progress
        .iter()
        .filter(|(_, entry)| entry.status == Some(Status::Approved))
        .filter_map(|(_, entry)| entry.grade.as_ref().and_then(|g| g.value()))
        .collect();
    if !grades.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let count = grades.len() as f64;
        stats.average_grade = Some(grades.iter().sum::<f64>() / count);
    }

    stats.elective_credits = catalog
        .electives()
        .filter(|course| store.is_active_elective(course.id))
        .filter(|course| progress.status(course.id) == Some(Status::Approved))
        .map(|course| course.credits)
        .sum();

    stats.addable_electives = catalog
        .electives()
        .filter(|course| !store.is_active_elective(course.id))
        .filter(|course| progress.status(course.id).is_none())
        .filter(|course| !is_locked(course, progress, catalog))
        .count();

    stats
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

/// Summary state of one curriculum year, most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum YearStatus {
    /// Some course is still locked
    Locked,
    /// Some course can be taken but has not been
    Pending,
    /// Everything done, some only regularized
    Regularized,
    /// Everything approved
    Approved,
}

impl fmt::Display for YearStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Locked => "locked",
            Self::Pending => "pending",
            Self::Regularized => "regularized",
            Self::Approved => "approved",
        };
        f.write_str(label)
    }
}

/// Status of each curriculum year over the mandatory courses
#[must_use]
pub fn year_statuses(store: &ProgressStore, catalog: &CourseCatalog) -> BTreeMap<u8, YearStatus> {
    let progress = store.progress();
    let mut years: BTreeMap<u8, YearStatus> = BTreeMap::new();

    for course in catalog.mandatory() {
        let course_status = if is_locked(course, progress, catalog) {
            YearStatus::Locked
        } else {
            match progress.status(course.id) {
                Some(Status::Approved) => YearStatus::Approved,
                Some(Status::Regularized) => YearStatus::Regularized,
                _ => YearStatus::Pending,
            }
        };
        years
            .entry(course.year)
            .and_modify(|year| *year = (*year).min(course_status))
            .or_insert(course_status);
    }

    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseKind, Grade};

    fn catalog() -> CourseCatalog {
        CourseCatalog::new(vec![
            Course::new(1, 1, "Análisis Matemático I", CourseKind::Mandatory),
            Course::new(2, 1, "Álgebra", CourseKind::Mandatory),
            Course::new(9, 2, "Análisis Matemático II", CourseKind::Mandatory).with_regular(&[1, 2]),
            Course::new(18, 3, "Análisis Numérico", CourseKind::Mandatory).with_approved(&[9]),
            Course::new(101, 3, "Backend", CourseKind::Elective).with_credits(4),
            Course::new(102, 3, "Ciencia de Datos", CourseKind::Elective).with_credits(6),
            Course::new(103, 4, "Seguridad", CourseKind::Elective).with_approved(&[18]),
        ])
        .expect("valid catalog")
    }

    #[test]
    fn test_empty_progress() {
        let catalog = catalog();
        let stats = compute_stats(&ProgressStore::new(), &catalog);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.available, 2);
        assert_eq!(stats.locked, 2);
        assert_eq!(stats.percentage, 0);
        assert_eq!(stats.average_grade, None);
        assert_eq!(stats.addable_electives, 2);
        assert_eq!(stats.ready_to_start, vec![1, 2]);
    }

    #[test]
    fn test_counts_grades_and_credits() {
        let catalog = catalog();
        let mut store = ProgressStore::new();
        store.add_elective(101);
        store.set_status(&catalog, 1, Status::Approved);
        store.set_status(&catalog, 2, Status::Approved);
        store.set_status(&catalog, 9, Status::Regularized);
        store.set_status(&catalog, 101, Status::Approved);
        store.set_grade(1, Grade::Number(8.0));
        store.set_grade(2, Grade::Text("7".to_string()));
        store.set_grade(9, Grade::Number(10.0));
        store.set_grade(101, Grade::Text("pending".to_string()));

        let stats = compute_stats(&store, &catalog);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.approved, 3);
        assert_eq!(stats.regularized, 1);
        assert_eq!(stats.locked, 1);
        assert_eq!(stats.available, 0);
        assert_eq!(stats.percentage, 60);
        assert_eq!(stats.average_grade, Some(7.5));
        assert_eq!(stats.elective_credits, 4);
        assert_eq!(stats.addable_electives, 1);
    }

    #[test]
    fn test_attending_counts_as_available_but_not_ready() {
        let catalog = catalog();
        let mut store = ProgressStore::new();
        store.set_status(&catalog, 1, Status::Attending);

        let stats = compute_stats(&store, &catalog);
        assert_eq!(stats.available, 2);
        assert_eq!(stats.ready_to_start, vec![2]);
    }

    #[test]
    fn test_year_statuses() {
        let catalog = catalog();
        let mut store = ProgressStore::new();
        store.set_status(&catalog, 1, Status::Approved);
        store.set_status(&catalog, 2, Status::Regularized);

        let years = year_statuses(&store, &catalog);
        assert_eq!(years.get(&1), Some(&YearStatus::Regularized));
        assert_eq!(years.get(&2), Some(&YearStatus::Pending));
        assert_eq!(years.get(&3), Some(&YearStatus::Locked));

        store.set_status(&catalog, 2, Status::Approved);
        assert_eq!(year_statuses(&store, &catalog).get(&1), Some(&YearStatus::Approved));
    }
}
