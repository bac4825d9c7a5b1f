//! JSON state files under the configured data directory
//!
//! Four files hold everything the user edits:
//! - `academic_progress.json`: course id -> `{status, grade}`
//! - `active_electives.json`: ordered list of elective ids
//! - `schedule_current.json`: the fixed classes
//! - `schedule_saved.json`: saved schedule snapshots
//!
//! Reads never fail. A missing file yields the empty default and a corrupt one
//! is logged and replaced by the default the next time it is written.

use crate::core::error::StateError;
use crate::core::models::{CourseId, FixedClass, Progress, SavedSchedule};
use crate::core::progress_store::ProgressStore;
use crate::core::schedule::ScheduleSession;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const PROGRESS_FILE: &str = "academic_progress.json";
const ELECTIVES_FILE: &str = "active_electives.json";
const CURRENT_SCHEDULE_FILE: &str = "schedule_current.json";
const SAVED_SCHEDULES_FILE: &str = "schedule_saved.json";

/// File-backed store for progress and schedule state
#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    /// Store rooted at `root`; nothing is touched until the first save
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the state files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the progress map and the active electives
    #[must_use]
    pub fn load_progress(&self) -> ProgressStore {
        let progress: Progress = self.read_or_default(PROGRESS_FILE);
        let electives: Vec<CourseId> = self.read_or_default(ELECTIVES_FILE);
        ProgressStore::from_parts(progress, electives)
    }

    /// Persist the progress map and the active electives
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or a file cannot be written
    pub fn save_progress(&self, store: &ProgressStore) -> Result<(), StateError> {
        self.write(PROGRESS_FILE, store.progress())?;
        self.write(ELECTIVES_FILE, store.electives())
    }

    /// Load the fixed classes and saved snapshots
    #[must_use]
    pub fn load_schedule(&self) -> ScheduleSession {
        let fixed: Vec<FixedClass> = self.read_or_default(CURRENT_SCHEDULE_FILE);
        let saved: Vec<SavedSchedule> = self.read_or_default(SAVED_SCHEDULES_FILE);
        ScheduleSession::from_parts(fixed, saved)
    }

    /// Persist the fixed classes and saved snapshots
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or a file cannot be written
    pub fn save_schedule(&self, session: &ScheduleSession) -> Result<(), StateError> {
        self.write(CURRENT_SCHEDULE_FILE, session.fixed())?;
        self.write(SAVED_SCHEDULES_FILE, session.saved())
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.root.join(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                crate::warn!("Could not read {}: {e}; using defaults", path.display());
                return T::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            crate::warn!("Malformed state in {}: {e}; using defaults", path.display());
            T::default()
        })
    }

    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), StateError> {
        let path = self.root.join(name);
        fs::create_dir_all(&self.root).map_err(|source| StateError::Io {
            path: self.root.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(value).map_err(|source| StateError::Serialize {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StateError::Io {
            path: path.clone(),
            source,
        })?;

        crate::debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Grade, Status};
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let state = StateStore::new(dir.path().join("nested"));

        assert!(state.load_progress().progress().is_empty());
        assert!(state.load_schedule().fixed().is_empty());
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn test_corrupt_file_yields_default() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join(PROGRESS_FILE), "{not json").expect("write");
        fs::write(dir.path().join(ELECTIVES_FILE), "[50, 51]").expect("write");

        let store = StateStore::new(dir.path()).load_progress();
        assert!(store.progress().is_empty());
        assert_eq!(store.electives(), &[50, 51]);
    }

    #[test]
    fn test_progress_file_format() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(
            dir.path().join(PROGRESS_FILE),
            r#"{"1": {"status": "approved", "grade": 8}, "2": {"status": "regularized"}, "3": {"grade": "7"}}"#,
        )
        .expect("write");

        let store = StateStore::new(dir.path()).load_progress();
        assert_eq!(store.status(1), Some(Status::Approved));
        assert_eq!(store.status(2), Some(Status::Regularized));
        assert_eq!(store.status(3), None);
        assert_eq!(
            store.progress().get(3).and_then(|e| e.grade.clone()),
            Some(Grade::Text("7".to_string()))
        );
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().expect("tempdir");
        let state = StateStore::new(dir.path().join("state"));

        let mut store = ProgressStore::new();
        store.add_elective(50);
        state.save_progress(&store).expect("save");

        let electives = fs::read_to_string(dir.path().join("state").join(ELECTIVES_FILE))
            .expect("read electives");
        let parsed: Vec<CourseId> = serde_json::from_str(&electives).expect("parse");
        assert_eq!(parsed, vec![50]);
    }
}
