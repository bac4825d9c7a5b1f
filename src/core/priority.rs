//! Ranking of pending courses by how many others they unlock once approved

use crate::core::models::{Course, CourseCatalog, CourseKind, PrereqKind, Progress, Status};
use std::fmt;

/// A ranked course with its unlock counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityEntry<'a> {
    /// The pending course
    pub course: &'a Course,
    /// Mandatory courses that list it as an approved-type prerequisite
    pub unlocks_mandatory: usize,
    /// Electives that list it as an approved-type prerequisite
    pub unlocks_elective: usize,
}

impl PriorityEntry<'_> {
    /// Total number of courses unlocked
    #[must_use]
    pub const fn unlocks_count(&self) -> usize {
        self.unlocks_mandatory + self.unlocks_elective
    }
}

/// Which pending courses a ranking considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityScope {
    /// Every course that is neither approved nor regularized
    #[default]
    Global,
    /// Courses currently regularized or attending (finals still to pass)
    Finals,
}

impl PriorityScope {
    /// Whether a course with `status` is a candidate in this scope
    #[must_use]
    pub const fn includes(self, status: Option<Status>) -> bool {
        match self {
            Self::Global => !matches!(status, Some(Status::Approved | Status::Regularized)),
            Self::Finals => matches!(status, Some(Status::Regularized | Status::Attending)),
        }
    }
}

impl fmt::Display for PriorityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Finals => f.write_str("finals"),
        }
    }
}

/// Rank `candidates` by unlock counts
///
/// Courses that unlock nothing are dropped. Order is descending by mandatory
/// unlocks, then elective unlocks; ties keep candidate order.
#[must_use]
pub fn rank<'a, I>(candidates: I, catalog: &'a CourseCatalog) -> Vec<PriorityEntry<'a>>
where
    I: IntoIterator<Item = &'a Course>,
{
    let mut ranked: Vec<PriorityEntry<'a>> = candidates
        .into_iter()
        .map(|course| {
            let (mut unlocks_mandatory, mut unlocks_elective) = (0, 0);
            for &dependent in catalog.dependents(course.id, PrereqKind::Approved) {
                match catalog.get(dependent).map(|d| d.kind) {
                    Some(CourseKind::Mandatory) => unlocks_mandatory += 1,
                    Some(CourseKind::Elective) => unlocks_elective += 1,
                    None => {}
                }
            }
            PriorityEntry {
                course,
                unlocks_mandatory,
                unlocks_elective,
            }
        })
        .filter(|entry| entry.unlocks_count() > 0)
        .collect();

    ranked.sort_by(|a, b| {
        b.unlocks_mandatory
            .cmp(&a.unlocks_mandatory)
            .then(b.unlocks_elective.cmp(&a.unlocks_elective))
    });
    ranked
}

/// Ranking over the whole catalog for the given scope
#[must_use]
pub fn priority_list<'a>(
    progress: &Progress,
    catalog: &'a CourseCatalog,
    scope: PriorityScope,
) -> Vec<PriorityEntry<'a>> {
    let candidates = catalog
        .courses()
        .iter()
        .filter(|course| scope.includes(progress.status(course.id)));
    rank(candidates, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CourseCatalog {
        CourseCatalog::new(vec![
            Course::new(1, 1, "Análisis Matemático I", CourseKind::Mandatory),
            Course::new(2, 1, "Álgebra", CourseKind::Mandatory),
            Course::new(3, 1, "Física I", CourseKind::Mandatory),
            Course::new(9, 2, "Análisis Matemático II", CourseKind::Mandatory).with_approved(&[1]),
            Course::new(10, 2, "Física II", CourseKind::Mandatory).with_approved(&[3]),
            Course::new(18, 3, "Análisis Numérico", CourseKind::Mandatory).with_approved(&[1, 2]),
            Course::new(101, 3, "Backend", CourseKind::Elective).with_approved(&[2]),
            Course::new(102, 3, "Ciencia de Datos", CourseKind::Elective)
                .with_approved(&[2])
                .with_regular(&[1]),
        ])
        .expect("valid catalog")
    }

    fn ranked_ids(entries: &[PriorityEntry<'_>]) -> Vec<u32> {
        entries.iter().map(|e| e.course.id).collect()
    }

    #[test]
    fn test_global_ranking_order() {
        let catalog = catalog();
        let ranked = priority_list(&Progress::new(), &catalog, PriorityScope::Global);

        // 1 unlocks 2 mandatory; 2 unlocks 1 mandatory + 2 electives; 3 unlocks 1 mandatory
        assert_eq!(ranked_ids(&ranked), vec![1, 2, 3]);
        assert_eq!(ranked[1].unlocks_mandatory, 1);
        assert_eq!(ranked[1].unlocks_elective, 2);
        assert_eq!(ranked[1].unlocks_count(), 3);
    }

    #[test]
    fn test_regular_type_dependents_do_not_count() {
        let catalog = catalog();
        let ranked = priority_list(&Progress::new(), &catalog, PriorityScope::Global);
        let first = ranked.iter().find(|e| e.course.id == 1).expect("course 1 ranked");

        assert_eq!(first.unlocks_elective, 0);
    }

    #[test]
    fn test_completed_courses_excluded_globally() {
        let catalog = catalog();
        let progress: Progress = [(1, Status::Approved), (2, Status::Regularized)].into_iter().collect();

        let ranked = priority_list(&progress, &catalog, PriorityScope::Global);
        assert_eq!(ranked_ids(&ranked), vec![3]);
    }

    #[test]
    fn test_finals_scope() {
        let catalog = catalog();
        let progress: Progress = [
            (1, Status::Approved),
            (2, Status::Regularized),
            (3, Status::Attending),
        ]
        .into_iter()
        .collect();

        let ranked = priority_list(&progress, &catalog, PriorityScope::Finals);
        assert_eq!(ranked_ids(&ranked), vec![2, 3]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = CourseCatalog::new(vec![
            Course::new(5, 1, "B", CourseKind::Mandatory),
            Course::new(4, 1, "A", CourseKind::Mandatory),
            Course::new(6, 2, "C", CourseKind::Mandatory).with_approved(&[4, 5]),
        ])
        .expect("valid catalog");

        let ranked = priority_list(&Progress::new(), &catalog, PriorityScope::Global);
        assert_eq!(ranked_ids(&ranked), vec![5, 4]);
    }
}
