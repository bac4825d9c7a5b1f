//! Projection of second-semester options from the current fixed classes
//!
//! Answers "if I regularize everything I fixed, what opens up next semester?"

use crate::core::models::course::sort_by_name;
use crate::core::models::{
    CommissionCatalog, Course, CourseCatalog, CourseId, FixedClass, Progress, Semester, Status,
};
use crate::core::prerequisites::{available_courses, is_locked};

/// Progress with every fixed course treated as regularized
///
/// Courses already approved keep their status; the projection never downgrades.
#[must_use]
pub fn projected_progress(progress: &Progress, fixed: &[CourseId]) -> Progress {
    let mut projected = progress.clone();
    for &id in fixed {
        if projected.status(id) != Some(Status::Approved) {
            projected.set_status(id, Status::Regularized);
        }
    }
    projected
}

/// Courses that become selectable in semester 2 if the fixed classes are regularized
///
/// A course qualifies when it is not completed, not available already, not
/// fixed itself, unlocked under the projection, and offered by some
/// commission with a semester-2 meeting. Sorted by name.
#[must_use]
pub fn possible_courses<'a>(
    progress: &Progress,
    fixed: &[FixedClass],
    catalog: &'a CourseCatalog,
    commissions: &CommissionCatalog,
) -> Vec<&'a Course> {
    let fixed_ids: Vec<CourseId> = fixed.iter().map(|class| class.course_id).collect();
    if fixed_ids.is_empty() {
        return Vec::new();
    }

    let projected = projected_progress(progress, &fixed_ids);
    let available = available_courses(progress, catalog);

    let mut possible: Vec<&Course> = catalog
        .courses()
        .iter()
        .filter(|course| !progress.status(course.id).is_some_and(Status::is_completed))
        .filter(|course| !available.contains(course.id))
        .filter(|course| !fixed_ids.contains(&course.id))
        .filter(|course| !is_locked(course, &projected, catalog))
        .filter(|course| commissions.offers_in(course.id, Semester::Second))
        .collect();

    sort_by_name(&mut possible);
    possible
}
