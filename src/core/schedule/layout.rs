//! Weekly calendar layout: visible time range and side-by-side columns
//!
//! Blocks of one day and semester are sorted by start time and placed with a
//! greedy first-fit column assignment. Blocks that share visual space (a
//! connected run of intersecting intervals) then agree on a common column
//! count so they render with equal widths.

use super::conflict::SectionOption;
use crate::core::models::{ClockTime, FixedClass, Semester, TimeSlot, Weekday};

/// Earliest minute a calendar shows (08:00)
pub const DAY_START: u16 = 8 * 60;

/// Latest minute a calendar shows (23:00)
pub const DAY_END: u16 = 23 * 60;

/// Inclusive-exclusive window of minutes shown by a calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// First visible minute
    pub start: u16,
    /// Last visible minute
    pub end: u16,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start: DAY_START,
            end: DAY_END,
        }
    }
}

impl TimeRange {
    /// Visible minutes
    #[must_use]
    pub const fn len(&self) -> u16 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range is degenerate
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hour labels ("8:00", "9:00", ...) from start to end inclusive
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        (self.start..=self.end)
            .step_by(60)
            .map(|minute| format!("{}:00", minute / 60))
            .collect()
    }
}

/// Window covering `slots`, widened to whole hours plus a one-hour margin
///
/// Clamped to [`DAY_START`, `DAY_END`]; the full day when `slots` is empty.
pub fn visible_range<'a>(slots: impl IntoIterator<Item = &'a TimeSlot>) -> TimeRange {
    let bounds = slots.into_iter().fold(None, |acc: Option<(u16, u16)>, slot| {
        let (start, end) = (slot.start.minutes(), slot.end.minutes());
        Some(acc.map_or((start, end), |(lo, hi)| (lo.min(start), hi.max(end))))
    });
    let Some((lo, hi)) = bounds else {
        return TimeRange::default();
    };

    let start = (lo / 60 * 60).saturating_sub(60).max(DAY_START);
    let end = (hi.div_ceil(60) * 60 + 60).min(DAY_END);
    TimeRange { start, end }
}

/// Position of a block inside its day column, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    /// Offset from the top of the range
    pub top: f64,
    /// Height
    pub height: f64,
    /// Offset from the left edge
    pub left: f64,
    /// Width
    pub width: f64,
}

/// A block with its assigned column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBlock<T> {
    /// What the block shows
    pub item: T,
    /// Meeting the block represents
    pub slot: TimeSlot,
    /// Zero-based column
    pub column: usize,
    /// Columns shared by the block's overlap cluster
    pub total_columns: usize,
}

impl<T> PlacedBlock<T> {
    /// Percent geometry of the block within `range`
    #[must_use]
    pub fn geometry(&self, range: TimeRange) -> BlockGeometry {
        let length = f64::from(range.len().max(1));
        let offset = f64::from(self.slot.start.minutes()) - f64::from(range.start);
        #[allow(clippy::cast_precision_loss)]
        let width = 100.0 / self.total_columns.max(1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let left = width * self.column as f64;
        BlockGeometry {
            top: offset / length * 100.0,
            height: f64::from(self.slot.duration()) / length * 100.0,
            left,
            width,
        }
    }
}

/// Assign columns to blocks of a single day and semester
///
/// Blocks are stably sorted by start time. Each takes the lowest column not
/// used by an earlier block it intersects, so no column ever holds two
/// intersecting blocks. Every member of an overlap cluster then reports the
/// cluster's column count.
pub fn resolve_overlaps<T>(blocks: impl IntoIterator<Item = (T, TimeSlot)>) -> Vec<PlacedBlock<T>> {
    let mut placed: Vec<PlacedBlock<T>> = blocks
        .into_iter()
        .map(|(item, slot)| PlacedBlock {
            item,
            slot,
            column: 0,
            total_columns: 1,
        })
        .collect();
    placed.sort_by_key(|block| block.slot.start);

    for index in 0..placed.len() {
        let taken: Vec<usize> = placed[..index]
            .iter()
            .filter(|other| other.slot.intersects(&placed[index].slot))
            .map(|other| other.column)
            .collect();
        let column = (0..).find(|c| !taken.contains(c)).unwrap_or_default();
        placed[index].column = column;
        placed[index].total_columns = column + 1;
    }

    let mut cluster_start = 0;
    let mut cluster_end: Option<ClockTime> = None;
    for index in 0..placed.len() {
        let slot = placed[index].slot;
        if cluster_end.is_some_and(|end| slot.start >= end) {
            share_columns(&mut placed[cluster_start..index]);
            cluster_start = index;
            cluster_end = None;
        }
        cluster_end = Some(cluster_end.map_or(slot.end, |end| end.max(slot.end)));
    }
    share_columns(&mut placed[cluster_start..]);

    placed
}

fn share_columns<T>(cluster: &mut [PlacedBlock<T>]) {
    let columns = cluster.iter().map(|b| b.column + 1).max().unwrap_or(1);
    for block in cluster {
        block.total_columns = columns;
    }
}

/// Where a calendar block comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSource<'a> {
    /// A committed class
    Fixed(&'a FixedClass),
    /// A selectable option for the course being browsed
    Option(&'a SectionOption<'a>),
    /// A projected semester-2 option
    Possible(&'a SectionOption<'a>),
}

/// Everything a weekly calendar may show
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarView<'a> {
    /// Committed classes
    pub fixed: &'a [FixedClass],
    /// Options for the course currently browsed
    pub options: &'a [SectionOption<'a>],
    /// Projected semester-2 options for the possible course being browsed
    pub possible: &'a [SectionOption<'a>],
}

impl<'a> CalendarView<'a> {
    /// Blocks shown in `semester`, in source order
    fn raw_blocks(&self, semester: Semester) -> Vec<(BlockSource<'a>, TimeSlot)> {
        let mut blocks = Vec::new();
        for class in self.fixed {
            for slot in class.slots.iter().filter(|s| s.semester.shows_in(semester)) {
                blocks.push((BlockSource::Fixed(class), *slot));
            }
        }
        for option in self.options {
            for slot in option.slots.iter().filter(|s| s.semester.shows_in(semester)) {
                blocks.push((BlockSource::Option(option), *slot));
            }
        }
        if semester == Semester::Second {
            for option in self.possible {
                for slot in option.slots.iter().filter(|s| s.semester == Semester::Second) {
                    blocks.push((BlockSource::Possible(option), *slot));
                }
            }
        }
        blocks
    }

    /// Visible range for a semester calendar
    #[must_use]
    pub fn visible_range(&self, semester: Semester) -> TimeRange {
        let blocks = self.raw_blocks(semester);
        visible_range(blocks.iter().map(|(_, slot)| slot))
    }

    /// Laid-out blocks for one day of a semester calendar
    #[must_use]
    pub fn day_blocks(&self, day: Weekday, semester: Semester) -> Vec<PlacedBlock<BlockSource<'a>>> {
        resolve_overlaps(
            self.raw_blocks(semester)
                .into_iter()
                .filter(|(_, slot)| slot.day == day),
        )
    }

    /// Days to draw: Monday to Friday, plus Saturday when something meets then
    #[must_use]
    pub fn days(&self, semester: Semester) -> Vec<Weekday> {
        let saturday = self
            .raw_blocks(semester)
            .iter()
            .any(|(_, slot)| slot.day == Weekday::Sabado);
        Weekday::ALL
            .into_iter()
            .filter(|&day| day != Weekday::Sabado || saturday)
            .collect()
    }
}
