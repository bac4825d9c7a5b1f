//! Mutable academic progress with cascading invalidation
//!
//! The store owns the progress map and the ordered set of active electives.
//! Whenever a course loses a status that other courses depend on, every
//! dependent whose prerequisite is no longer satisfied is cleared, and so on
//! transitively through the catalog's reverse-dependency index.

use crate::core::models::progress::status_satisfies;
use crate::core::models::{CourseCatalog, CourseId, Grade, PrereqKind, Progress, Status};
use std::collections::HashSet;

/// Outcome of a progress mutation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusChange {
    /// Edited course
    pub course: CourseId,
    /// Status before the edit
    pub old: Option<Status>,
    /// Status after the edit
    pub new: Option<Status>,
    /// Dependents removed by the cascade, in discovery order
    pub cascaded: Vec<CourseId>,
}

impl StatusChange {
    /// Whether the edit removed any other course
    #[must_use]
    pub fn cascaded_any(&self) -> bool {
        !self.cascaded.is_empty()
    }
}

/// Whether moving from `old` to `new` can invalidate a dependent
#[must_use]
pub fn needs_cascade(old: Option<Status>, new: Option<Status>) -> bool {
    let lost_approved = status_satisfies(old, PrereqKind::Approved)
        && !status_satisfies(new, PrereqKind::Approved);
    let lost_regular = status_satisfies(old, PrereqKind::Regular)
        && !status_satisfies(new, PrereqKind::Regular);
    lost_approved || lost_regular
}

/// Ids whose entries must be removed after `origin` moves to `new`
///
/// Worklist over the reverse index. Each scheduled dependent is expanded as if
/// its own status were gone. The origin and already-scheduled ids are never
/// revisited, so the traversal terminates even on a cyclic graph.
#[must_use]
pub fn cascade(
    catalog: &CourseCatalog,
    progress: &Progress,
    origin: CourseId,
    new: Option<Status>,
) -> Vec<CourseId> {
    let mut scheduled = Vec::new();
    let mut visited: HashSet<CourseId> = HashSet::from([origin]);
    let mut worklist = vec![(origin, new)];

    while let Some((id, status)) = worklist.pop() {
        for kind in [PrereqKind::Approved, PrereqKind::Regular] {
            if status_satisfies(status, kind) {
                continue;
            }
            for &dependent in catalog.dependents(id, kind) {
                if !progress.contains(dependent) || !visited.insert(dependent) {
                    continue;
                }
                scheduled.push(dependent);
                worklist.push((dependent, None));
            }
        }
    }

    scheduled
}

/// Progress map plus active electives, with cascade-aware mutations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressStore {
    progress: Progress,
    electives: Vec<CourseId>,
}

impl ProgressStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store over previously persisted state
    #[must_use]
    pub fn from_parts(progress: Progress, electives: Vec<CourseId>) -> Self {
        let mut store = Self {
            progress,
            electives: Vec::with_capacity(electives.len()),
        };
        for id in electives {
            store.add_elective(id);
        }
        store
    }

    /// Current progress map
    #[must_use]
    pub const fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Active electives in insertion order
    #[must_use]
    pub fn electives(&self) -> &[CourseId] {
        &self.electives
    }

    /// Current status of a course
    #[must_use]
    pub fn status(&self, id: CourseId) -> Option<Status> {
        self.progress.status(id)
    }

    /// Whether an elective is in the active set
    #[must_use]
    pub fn is_active_elective(&self, id: CourseId) -> bool {
        self.electives.contains(&id)
    }

    /// Set a status with toggle semantics
    ///
    /// Setting the status the course already holds clears it. Otherwise the
    /// status is replaced and any stored grade kept.
    pub fn set_status(&mut self, catalog: &CourseCatalog, id: CourseId, status: Status) -> StatusChange {
        if self.status(id) == Some(status) {
            return self.clear(catalog, id);
        }
        self.apply(catalog, id, Some(status))
    }

    /// Remove a course's entry, cascading to its dependents
    pub fn clear(&mut self, catalog: &CourseCatalog, id: CourseId) -> StatusChange {
        self.apply(catalog, id, None)
    }

    fn apply(&mut self, catalog: &CourseCatalog, id: CourseId, new: Option<Status>) -> StatusChange {
        let old = self.status(id);
        let cascaded = if needs_cascade(old, new) {
            cascade(catalog, &self.progress, id, new)
        } else {
            Vec::new()
        };

        for dependent in &cascaded {
            self.progress.remove(*dependent);
        }
        match new {
            Some(status) => self.progress.set_status(id, status),
            None => {
                self.progress.remove(id);
            }
        }

        if cascaded.is_empty() {
            crate::debug!("Course {id}: {} -> {}", label(old), label(new));
        } else {
            crate::info!(
                "Course {id}: {} -> {}; cleared dependents {cascaded:?}",
                label(old),
                label(new)
            );
        }

        StatusChange {
            course: id,
            old,
            new,
            cascaded,
        }
    }

    /// Store a grade without touching the status; never cascades
    pub fn set_grade(&mut self, id: CourseId, grade: Grade) {
        self.progress.entry_mut(id).grade = Some(grade);
    }

    /// Add an elective to the active set. Returns `false` if it was already there.
    pub fn add_elective(&mut self, id: CourseId) -> bool {
        if self.electives.contains(&id) {
            return false;
        }
        self.electives.push(id);
        true
    }

    /// Drop an elective from the active set and clear its progress
    ///
    /// Returns `None` when the elective was not active.
    pub fn remove_elective(&mut self, catalog: &CourseCatalog, id: CourseId) -> Option<StatusChange> {
        let pos = self.electives.iter().position(|&e| e == id)?;
        self.electives.remove(pos);
        Some(self.clear(catalog, id))
    }

    /// Forget all progress and active electives
    pub fn reset(&mut self) {
        self.progress.clear();
        self.electives.clear();
        crate::info!("Progress reset");
    }
}

fn label(status: Option<Status>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, CourseKind};

    fn course(id: CourseId) -> Course {
        Course::new(id, 1, format!("Course {id}"), CourseKind::Mandatory)
    }

    fn chain_catalog() -> CourseCatalog {
        CourseCatalog::new(vec![
            course(1),
            course(2).with_approved(&[1]),
            course(3).with_approved(&[2]),
        ])
        .expect("valid catalog")
    }

    fn store_with(entries: &[(CourseId, Status)]) -> ProgressStore {
        ProgressStore::from_parts(entries.iter().copied().collect(), Vec::new())
    }

    #[test]
    fn test_needs_cascade_transitions() {
        use Status::{Approved, Attending, Regularized};

        assert!(needs_cascade(Some(Approved), Some(Regularized)));
        assert!(needs_cascade(Some(Approved), None));
        assert!(needs_cascade(Some(Regularized), Some(Attending)));
        assert!(needs_cascade(Some(Regularized), None));
        assert!(!needs_cascade(Some(Regularized), Some(Approved)));
        assert!(!needs_cascade(Some(Attending), None));
        assert!(!needs_cascade(None, Some(Approved)));
    }

    #[test]
    fn test_clearing_chain_head_clears_whole_chain() {
        let catalog = chain_catalog();
        let mut store = store_with(&[(1, Status::Approved), (2, Status::Approved), (3, Status::Approved)]);

        let change = store.clear(&catalog, 1);

        assert_eq!(change.old, Some(Status::Approved));
        assert_eq!(change.new, None);
        assert_eq!(change.cascaded, vec![2, 3]);
        assert!(store.progress().is_empty());
    }

    #[test]
    fn test_downgrade_to_regularized_keeps_regular_dependents() {
        let catalog = CourseCatalog::new(vec![
            course(1),
            course(9).with_regular(&[1]),
            course(18).with_approved(&[1]),
        ])
        .expect("valid catalog");
        let mut store = store_with(&[(1, Status::Approved), (9, Status::Regularized), (18, Status::Attending)]);

        let change = store.set_status(&catalog, 1, Status::Regularized);

        assert_eq!(change.cascaded, vec![18]);
        assert_eq!(store.status(1), Some(Status::Regularized));
        assert_eq!(store.status(9), Some(Status::Regularized));
        assert_eq!(store.status(18), None);
    }

    #[test]
    fn test_dependents_without_entries_are_skipped() {
        let catalog = chain_catalog();
        let mut store = store_with(&[(1, Status::Approved), (3, Status::Approved)]);

        let change = store.clear(&catalog, 1);

        assert!(change.cascaded.is_empty());
        assert_eq!(store.status(3), Some(Status::Approved));
    }

    #[test]
    fn test_same_status_toggles_off() {
        let catalog = chain_catalog();
        let mut store = store_with(&[(1, Status::Approved), (2, Status::Regularized)]);

        let change = store.set_status(&catalog, 1, Status::Approved);

        assert_eq!(change.new, None);
        assert_eq!(store.status(1), None);
        assert_eq!(store.status(2), None);
    }

    #[test]
    fn test_upgrade_never_cascades() {
        let catalog = chain_catalog();
        let mut store = store_with(&[(1, Status::Regularized), (2, Status::Attending)]);

        let change = store.set_status(&catalog, 1, Status::Approved);

        assert!(!change.cascaded_any());
        assert_eq!(store.status(2), Some(Status::Attending));
    }

    #[test]
    fn test_status_change_keeps_grade() {
        let catalog = chain_catalog();
        let mut store = store_with(&[(1, Status::Approved)]);
        store.set_grade(1, Grade::Number(9.0));

        store.set_status(&catalog, 1, Status::Regularized);

        let entry = store.progress().get(1).expect("entry");
        assert_eq!(entry.grade, Some(Grade::Number(9.0)));
    }

    #[test]
    fn test_grade_creates_statusless_entry() {
        let mut store = ProgressStore::new();
        store.set_grade(7, Grade::Text("8".to_string()));

        assert!(store.progress().contains(7));
        assert_eq!(store.status(7), None);
    }

    #[test]
    fn test_unknown_course_stores_orphan_entry() {
        let catalog = chain_catalog();
        let mut store = ProgressStore::new();

        let change = store.set_status(&catalog, 404, Status::Approved);
        assert!(!change.cascaded_any());
        assert_eq!(store.status(404), Some(Status::Approved));

        let change = store.clear(&catalog, 404);
        assert!(!change.cascaded_any());
        assert!(store.progress().is_empty());
    }

    #[test]
    fn test_cascade_visits_shared_dependent_once() {
        let catalog = CourseCatalog::new(vec![
            course(1),
            course(2).with_regular(&[1]),
            course(3).with_regular(&[1]),
            course(4).with_regular(&[2, 3]),
        ])
        .expect("valid catalog");
        let progress: Progress = [
            (1, Status::Approved),
            (2, Status::Approved),
            (3, Status::Approved),
            (4, Status::Approved),
        ]
        .into_iter()
        .collect();

        let mut cleared = cascade(&catalog, &progress, 1, None);
        cleared.sort_unstable();
        assert_eq!(cleared, vec![2, 3, 4]);
    }

    #[test]
    fn test_elective_lifecycle() {
        let catalog = CourseCatalog::new(vec![
            course(1),
            Course::new(101, 3, "Backend", CourseKind::Elective).with_approved(&[1]),
            Course::new(102, 4, "Ciencia de Datos", CourseKind::Elective).with_regular(&[101]),
        ])
        .expect("valid catalog");
        let mut store = ProgressStore::new();

        assert!(store.add_elective(101));
        assert!(store.add_elective(102));
        assert!(!store.add_elective(101));
        store.set_status(&catalog, 1, Status::Approved);
        store.set_status(&catalog, 101, Status::Approved);
        store.set_status(&catalog, 102, Status::Regularized);

        let change = store.remove_elective(&catalog, 101).expect("was active");
        assert_eq!(change.cascaded, vec![102]);
        assert_eq!(store.electives(), &[102]);
        assert_eq!(store.status(101), None);
        assert!(store.remove_elective(&catalog, 101).is_none());
    }

    #[test]
    fn test_reset_empties_everything() {
        let mut store = store_with(&[(1, Status::Approved)]);
        store.add_elective(101);

        store.reset();

        assert!(store.progress().is_empty());
        assert!(store.electives().is_empty());
    }
}
