//! The schedule-building session: fixed classes plus saved snapshots

use super::conflict::section_options;
use crate::core::error::ScheduleError;
use crate::core::models::{CommissionCatalog, CourseId, FixedClass, SavedSchedule};
use chrono::Utc;

/// Mutable schedule state owned by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSession {
    fixed: Vec<FixedClass>,
    saved: Vec<SavedSchedule>,
}

impl ScheduleSession {
    /// Empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over previously persisted state
    #[must_use]
    pub const fn from_parts(fixed: Vec<FixedClass>, saved: Vec<SavedSchedule>) -> Self {
        Self { fixed, saved }
    }

    /// Committed classes in insertion order
    #[must_use]
    pub fn fixed(&self) -> &[FixedClass] {
        &self.fixed
    }

    /// Saved snapshots in creation order
    #[must_use]
    pub fn saved(&self) -> &[SavedSchedule] {
        &self.saved
    }

    /// Whether a class is fixed for `course`
    #[must_use]
    pub fn is_fixed(&self, course: CourseId) -> bool {
        self.fixed.iter().any(|class| class.course_id == course)
    }

    /// Fix the commission `commission` for `course`
    ///
    /// # Errors
    /// Fails when the course is already fixed, no commission by that code
    /// offers it, or the option overlaps an existing fixed class
    pub fn fix(
        &mut self,
        course: CourseId,
        commission: &str,
        commissions: &CommissionCatalog,
    ) -> Result<&FixedClass, ScheduleError> {
        if self.is_fixed(course) {
            return Err(ScheduleError::AlreadyFixed(course));
        }

        let options = section_options(course, commissions, &self.fixed);
        let option = options
            .iter()
            .find(|option| option.commission_id() == commission)
            .ok_or_else(|| ScheduleError::UnknownCommission {
                course,
                commission: commission.to_string(),
            })?;

        if option.has_conflict {
            crate::warn!("Commission {commission} for course {course} overlaps the current schedule");
            return Err(ScheduleError::Conflict {
                commission: commission.to_string(),
            });
        }

        let class = option.to_fixed(course);
        crate::info!("Fixed course {course} in commission {commission}");
        self.fixed.push(class);
        Ok(&self.fixed[self.fixed.len() - 1])
    }

    /// Remove every fixed class for `course`. Returns how many were removed.
    pub fn unfix(&mut self, course: CourseId) -> usize {
        let before = self.fixed.len();
        self.fixed.retain(|class| class.course_id != course);
        before - self.fixed.len()
    }

    /// Remove the fixed class at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<FixedClass> {
        (index < self.fixed.len()).then(|| self.fixed.remove(index))
    }

    /// Drop every fixed class; saved snapshots are kept
    pub fn clear(&mut self) {
        self.fixed.clear();
    }

    /// Snapshot the fixed classes under `name` and return the snapshot id
    ///
    /// Ids are creation timestamps in milliseconds, bumped when needed to stay unique.
    pub fn save(&mut self, name: &str) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while self.saved.iter().any(|saved| saved.id == id) {
            id += 1;
        }
        self.saved.push(SavedSchedule {
            id,
            name: name.to_string(),
            classes: self.fixed.clone(),
        });
        crate::debug!("Saved schedule '{name}' as {id}");
        id
    }

    /// Replace the fixed classes with a saved snapshot
    ///
    /// # Errors
    /// Fails when no snapshot has that id
    pub fn load(&mut self, id: i64) -> Result<&SavedSchedule, ScheduleError> {
        let saved = self
            .saved
            .iter()
            .find(|saved| saved.id == id)
            .ok_or(ScheduleError::UnknownSavedSchedule(id))?;
        self.fixed.clone_from(&saved.classes);
        Ok(saved)
    }

    /// Delete a saved snapshot
    ///
    /// # Errors
    /// Fails when no snapshot has that id
    pub fn delete_saved(&mut self, id: i64) -> Result<SavedSchedule, ScheduleError> {
        let pos = self
            .saved
            .iter()
            .position(|saved| saved.id == id)
            .ok_or(ScheduleError::UnknownSavedSchedule(id))?;
        Ok(self.saved.remove(pos))
    }
}
