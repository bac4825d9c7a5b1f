//! Schedule building: conflicts, calendar layout and the editing session

pub mod conflict;
pub mod layout;
pub mod session;

pub use conflict::{
    conflicts_with_fixed, overlaps, possible_section_options, section_options, SectionOption,
};
pub use layout::{
    resolve_overlaps, visible_range, BlockGeometry, BlockSource, CalendarView, PlacedBlock,
    TimeRange,
};
pub use session::ScheduleSession;
