//! Commission (class section) datasets and their weekly time slots

use super::course::CourseId;
use crate::core::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Teaching day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday
    Lunes,
    /// Tuesday
    Martes,
    /// Wednesday
    #[serde(rename = "Miércoles", alias = "Miercoles")]
    Miercoles,
    /// Thursday
    Jueves,
    /// Friday
    Viernes,
    /// Saturday
    #[serde(rename = "Sábado", alias = "Sabado")]
    Sabado,
}

impl Weekday {
    /// All teaching days in calendar order
    pub const ALL: [Self; 6] = [
        Self::Lunes,
        Self::Martes,
        Self::Miercoles,
        Self::Jueves,
        Self::Viernes,
        Self::Sabado,
    ];

    /// Display name as used in the datasets
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lunes => "Lunes",
            Self::Martes => "Martes",
            Self::Miercoles => "Miércoles",
            Self::Jueves => "Jueves",
            Self::Viernes => "Viernes",
            Self::Sabado => "Sábado",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lunes" | "lu" => Ok(Self::Lunes),
            "martes" | "ma" => Ok(Self::Martes),
            "miércoles" | "miercoles" | "mi" => Ok(Self::Miercoles),
            "jueves" | "ju" => Ok(Self::Jueves),
            "viernes" | "vi" => Ok(Self::Viernes),
            "sábado" | "sabado" | "sa" => Ok(Self::Sabado),
            other => Err(format!("Unknown weekday: '{other}'")),
        }
    }
}

/// Half of the academic year a slot belongs to
///
/// Persisted as an integer: `1`, `2`, or `0` for a slot that runs all year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Semester {
    /// Whole-year slot
    Annual,
    /// First half
    First,
    /// Second half
    Second,
}

impl Semester {
    /// Whether a slot tagged with `self` is displayed in the calendar for `semester`
    ///
    /// Only used for display and visible-range computation; conflict checks
    /// compare semesters strictly.
    #[must_use]
    pub fn shows_in(self, semester: Self) -> bool {
        self == semester || self == Self::Annual
    }
}

impl TryFrom<u8> for Semester {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Annual),
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(format!("Invalid semester: {other}")),
        }
    }
}

impl From<Semester> for u8 {
    fn from(semester: Semester) -> Self {
        match semester {
            Semester::Annual => 0,
            Semester::First => 1,
            Semester::Second => 2,
        }
    }
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annual" | "anual" => Ok(Self::Annual),
            other => other
                .parse::<u8>()
                .map_err(|_| format!("Invalid semester: '{other}'"))
                .and_then(Self::try_from),
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Annual => f.write_str("annual"),
            Self::First => f.write_str("1"),
            Self::Second => f.write_str("2"),
        }
    }
}

/// Time of day as minutes since midnight, persisted as `"HH:MM"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build from hours and minutes
    ///
    /// # Errors
    /// Returns an error when the time is past 24:00 or minutes are out of range
    pub fn new(hours: u16, minutes: u16) -> Result<Self, String> {
        if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
            return Err(format!("Invalid time: {hours}:{minutes:02}"));
        }
        Ok(Self(hours * 60 + minutes))
    }

    /// Build directly from minutes since midnight
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    /// Minutes since midnight
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hours, minutes) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("Invalid time '{s}': expected HH:MM"))?;
        let hours = hours
            .parse::<u16>()
            .map_err(|_| format!("Invalid hours in '{s}'"))?;
        let minutes = minutes
            .parse::<u16>()
            .map_err(|_| format!("Invalid minutes in '{s}'"))?;
        Self::new(hours, minutes)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A weekly class meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of the week
    #[serde(rename = "dia")]
    pub day: Weekday,

    /// Start time
    #[serde(rename = "inicio")]
    pub start: ClockTime,

    /// End time (exclusive)
    #[serde(rename = "fin")]
    pub end: ClockTime,

    /// Semester the meeting belongs to
    #[serde(rename = "semestre")]
    pub semester: Semester,
}

impl TimeSlot {
    /// Create a slot
    #[must_use]
    pub const fn new(day: Weekday, start: ClockTime, end: ClockTime, semester: Semester) -> Self {
        Self {
            day,
            start,
            end,
            semester,
        }
    }

    /// Length in minutes (zero for inverted slots)
    #[must_use]
    pub const fn duration(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Half-open interval intersection, ignoring day and semester
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Same day, same semester and intersecting times
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.day == other.day && self.semester == other.semester && self.intersects(other)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} (sem {})",
            self.day, self.start, self.end, self.semester
        )
    }
}

#[derive(Deserialize)]
struct RawSubject {
    #[serde(default)]
    id: Option<CourseId>,
    #[serde(default)]
    ids: Vec<CourseId>,
    #[serde(default)]
    codigo: String,
    #[serde(default)]
    nombre: String,
    #[serde(default)]
    tipo: String,
    #[serde(default)]
    horarios: Vec<TimeSlot>,
}

/// A course as offered inside one commission
///
/// One physical section may stand for several catalog courses (e.g. an
/// elective listed under two plans); `primary` is the first id and `aliases`
/// the rest. Entries without any id never match a course.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSubject")]
pub struct CommissionSubject {
    /// Main course id
    pub primary: Option<CourseId>,
    /// Other course ids the same section represents
    pub aliases: Vec<CourseId>,
    /// Short code used for calendar labels and colors (e.g. "SOP")
    pub code: String,
    /// Display name
    pub name: String,
    /// Dictation type label from the dataset
    pub kind: String,
    /// Weekly meetings
    pub slots: Vec<TimeSlot>,
}

impl From<RawSubject> for CommissionSubject {
    fn from(raw: RawSubject) -> Self {
        let primary = raw.id.or_else(|| raw.ids.first().copied());
        let aliases = raw
            .ids
            .into_iter()
            .filter(|&id| Some(id) != primary)
            .collect();
        Self {
            primary,
            aliases,
            code: raw.codigo,
            name: raw.nombre,
            kind: raw.tipo,
            slots: raw.horarios,
        }
    }
}

impl CommissionSubject {
    /// Create a subject entry for a single course
    #[must_use]
    pub fn new(id: CourseId, code: impl Into<String>, name: impl Into<String>, slots: Vec<TimeSlot>) -> Self {
        Self {
            primary: Some(id),
            aliases: Vec::new(),
            code: code.into(),
            name: name.into(),
            kind: String::new(),
            slots,
        }
    }

    /// Builder-style helper to add alias ids
    #[must_use]
    pub fn with_aliases(mut self, aliases: &[CourseId]) -> Self {
        let primary = self.primary;
        self.aliases.extend(aliases.iter().copied().filter(|&id| Some(id) != primary));
        self
    }

    /// Whether this entry stands for `course`
    #[must_use]
    pub fn represents(&self, course: CourseId) -> bool {
        self.primary == Some(course) || self.aliases.contains(&course)
    }

    /// Every course id this entry stands for
    pub fn course_ids(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.primary.into_iter().chain(self.aliases.iter().copied())
    }

    /// Whether any meeting is tagged with exactly `semester`
    #[must_use]
    pub fn has_semester(&self, semester: Semester) -> bool {
        self.slots.iter().any(|slot| slot.semester == semester)
    }

    /// Meetings tagged with exactly `semester`
    #[must_use]
    pub fn slots_in(&self, semester: Semester) -> Vec<TimeSlot> {
        self.slots
            .iter()
            .filter(|slot| slot.semester == semester)
            .copied()
            .collect()
    }
}

/// A class section with its shift and offered courses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commission {
    /// Human-readable code (e.g. "2K1")
    pub id: String,

    /// Shift label (e.g. "Mañana")
    #[serde(rename = "turno", default)]
    pub shift: String,

    /// Offered courses
    #[serde(rename = "materias", default)]
    pub subjects: Vec<CommissionSubject>,
}

impl Commission {
    /// First subject entry representing `course`
    #[must_use]
    pub fn subject_for(&self, course: CourseId) -> Option<&CommissionSubject> {
        self.subjects.iter().find(|subject| subject.represents(course))
    }
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    comisiones: Vec<Commission>,
}

/// All commissions of one curriculum year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionDataset {
    /// Dataset label (file stem, e.g. "3ro")
    pub label: String,
    /// Commissions in dataset order
    pub commissions: Vec<Commission>,
}

impl CommissionDataset {
    /// Parse a dataset from its JSON document
    ///
    /// # Errors
    /// Returns an error if the document does not match the dataset schema
    pub fn from_json(label: impl Into<String>, json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Ok(Self {
            label: label.into(),
            commissions: raw.comisiones,
        })
    }

    /// Look up a commission by id
    #[must_use]
    pub fn commission(&self, id: &str) -> Option<&Commission> {
        self.commissions.iter().find(|c| c.id == id)
    }

    /// Course ids offered anywhere in this dataset
    #[must_use]
    pub fn offered_courses(&self) -> BTreeSet<CourseId> {
        self.commissions
            .iter()
            .flat_map(|c| c.subjects.iter())
            .flat_map(CommissionSubject::course_ids)
            .collect()
    }
}

/// Every commission dataset, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommissionCatalog {
    datasets: Vec<CommissionDataset>,
}

impl CommissionCatalog {
    /// Wrap already-parsed datasets
    #[must_use]
    pub const fn new(datasets: Vec<CommissionDataset>) -> Self {
        Self { datasets }
    }

    /// Load every `*.json` file in `dir`, ordered by file name
    ///
    /// # Errors
    /// Returns an error if the directory or a dataset cannot be read or parsed
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let io_err = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();

        let mut datasets = Vec::with_capacity(files.len());
        for path in files {
            let content = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            let label = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let dataset = CommissionDataset::from_json(label, &content).map_err(|source| {
                CatalogError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;
            crate::debug!(
                "Loaded commission dataset '{}' ({} commissions)",
                dataset.label,
                dataset.commissions.len()
            );
            datasets.push(dataset);
        }

        Ok(Self { datasets })
    }

    /// Datasets in load order
    #[must_use]
    pub fn datasets(&self) -> &[CommissionDataset] {
        &self.datasets
    }

    /// Look up a dataset by label
    #[must_use]
    pub fn dataset(&self, label: &str) -> Option<&CommissionDataset> {
        self.datasets.iter().find(|d| d.label == label)
    }

    /// Every commission with the label of its dataset
    pub fn commissions(&self) -> impl Iterator<Item = (&str, &Commission)> {
        self.datasets
            .iter()
            .flat_map(|d| d.commissions.iter().map(move |c| (d.label.as_str(), c)))
    }

    /// The subject entry for `course` in the commission named `commission`
    ///
    /// Commission codes can repeat across datasets; the first match wins.
    #[must_use]
    pub fn find(&self, course: CourseId, commission: &str) -> Option<(&str, &Commission, &CommissionSubject)> {
        self.commissions()
            .filter(|(_, c)| c.id == commission)
            .find_map(|(label, c)| c.subject_for(course).map(|s| (label, c, s)))
    }

    /// Whether some commission offers `course` with a meeting tagged `semester`
    #[must_use]
    pub fn offers_in(&self, course: CourseId, semester: Semester) -> bool {
        self.commissions()
            .flat_map(|(_, c)| c.subjects.iter())
            .any(|s| s.represents(course) && s.has_semester(semester))
    }

    /// Total number of commissions
    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.iter().map(|d| d.commissions.len()).sum()
    }

    /// Whether no commission is loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
