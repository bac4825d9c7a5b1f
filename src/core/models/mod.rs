//! Data models for `correlativas`

pub mod catalog;
pub mod commission;
pub mod course;
pub mod progress;
pub mod schedule;

pub use catalog::CourseCatalog;
pub use commission::{
    ClockTime, Commission, CommissionCatalog, CommissionDataset, CommissionSubject, Semester,
    TimeSlot, Weekday,
};
pub use course::{Course, CourseId, CourseKind, PrereqKind};
pub use progress::{Grade, Progress, ProgressEntry, Status};
pub use schedule::{FixedClass, SavedSchedule};
