//! Error types for catalog loading, persisted state and schedule editing

use crate::core::models::CourseId;
use std::path::PathBuf;
use thiserror::Error;

/// Problems found while building a course or commission catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two catalog records share an id
    #[error("duplicate course id {0} in catalog")]
    DuplicateCourse(CourseId),

    /// The prerequisite graph is not acyclic
    #[error("prerequisite cycle detected among courses {0:?}")]
    Cycle(Vec<CourseId>),

    /// A catalog or commission file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A catalog or commission file is not valid JSON for its schema
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The compiled-in catalog is malformed
    #[error("bundled catalog is invalid: {0}")]
    Bundled(#[source] serde_json::Error),
}

/// Failures while writing persisted state
#[derive(Debug, Error)]
pub enum StateError {
    /// Filesystem error
    #[error("failed to write {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected schedule-session edits
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// No commission offers the course under that id
    #[error("commission '{commission}' does not offer course {course}")]
    UnknownCommission {
        /// Requested course
        course: CourseId,
        /// Requested commission
        commission: String,
    },

    /// The option overlaps an already fixed class
    #[error("commission '{commission}' conflicts with the current schedule")]
    Conflict {
        /// Rejected commission
        commission: String,
    },

    /// A class for this course is already fixed
    #[error("course {0} is already in the schedule")]
    AlreadyFixed(CourseId),

    /// No saved schedule has that id
    #[error("no saved schedule with id {0}")]
    UnknownSavedSchedule(i64),
}
