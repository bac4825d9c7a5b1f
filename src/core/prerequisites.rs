//! Prerequisite resolution: which courses are locked and why
//!
//! All functions are pure queries over a [`CourseCatalog`] and a [`Progress`]
//! map. A prerequisite id that is not in the catalog never counts as missing.

use crate::core::models::course::sort_by_name;
use crate::core::models::progress::status_satisfies;
use crate::core::models::{Course, CourseCatalog, CourseId, PrereqKind, Progress};

/// Unsatisfied prerequisites of a course, split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingPrerequisites<'a> {
    /// Needed at least regularized
    pub regular: Vec<&'a Course>,
    /// Needed approved
    pub approved: Vec<&'a Course>,
}

impl MissingPrerequisites<'_> {
    /// Whether nothing is missing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.approved.is_empty()
    }
}

fn unmet<'a>(
    ids: &'a [CourseId],
    kind: PrereqKind,
    progress: &'a Progress,
) -> impl Iterator<Item = CourseId> + 'a {
    ids.iter()
        .copied()
        .filter(move |&id| !status_satisfies(progress.status(id), kind))
}

/// List the prerequisites of `course` that `progress` does not satisfy
#[must_use]
pub fn missing_prerequisites<'a>(
    course: &Course,
    progress: &Progress,
    catalog: &'a CourseCatalog,
) -> MissingPrerequisites<'a> {
    MissingPrerequisites {
        regular: unmet(&course.regular_prereqs, PrereqKind::Regular, progress)
            .filter_map(|id| catalog.get(id))
            .collect(),
        approved: unmet(&course.approved_prereqs, PrereqKind::Approved, progress)
            .filter_map(|id| catalog.get(id))
            .collect(),
    }
}

/// Whether `course` has any unsatisfied prerequisite
#[must_use]
pub fn is_locked(course: &Course, progress: &Progress, catalog: &CourseCatalog) -> bool {
    unmet(&course.regular_prereqs, PrereqKind::Regular, progress)
        .chain(unmet(&course.approved_prereqs, PrereqKind::Approved, progress))
        .any(|id| catalog.contains(id))
}

/// Courses that can be taken now, split by kind and sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableCourses<'a> {
    /// Mandatory courses
    pub mandatory: Vec<&'a Course>,
    /// Electives, whether or not they are in the active set
    pub electives: Vec<&'a Course>,
}

impl AvailableCourses<'_> {
    /// Whether `id` is available in either list
    #[must_use]
    pub fn contains(&self, id: CourseId) -> bool {
        self.mandatory
            .iter()
            .chain(&self.electives)
            .any(|course| course.id == id)
    }
}

/// Every course without a regularized/approved status whose prerequisites are met
#[must_use]
pub fn available_courses<'a>(progress: &Progress, catalog: &'a CourseCatalog) -> AvailableCourses<'a> {
    let (mut mandatory, mut electives): (Vec<&Course>, Vec<&Course>) = catalog
        .courses()
        .iter()
        .filter(|course| !progress.status(course.id).is_some_and(|s| s.is_completed()))
        .filter(|course| !is_locked(course, progress, catalog))
        .partition(|course| course.is_mandatory());

    sort_by_name(&mut mandatory);
    sort_by_name(&mut electives);
    AvailableCourses {
        mandatory,
        electives,
    }
}
