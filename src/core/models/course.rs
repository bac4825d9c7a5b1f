//! Course model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric course identifier as used by the curriculum (e.g. `9` for "Análisis Matemático II")
pub type CourseId = u32;

/// Whether a course is part of the fixed curriculum or an opt-in elective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseKind {
    /// Required by the degree
    Mandatory,
    /// Chosen by the student; only tracked once added to the active set
    Elective,
}

impl fmt::Display for CourseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mandatory => write!(f, "mandatory"),
            Self::Elective => write!(f, "elective"),
        }
    }
}

/// Which prerequisite list a reference comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrereqKind {
    /// Must be at least regularized
    Regular,
    /// Must be approved
    Approved,
}

/// A course in the curriculum catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique identifier
    pub id: CourseId,

    /// Curriculum year (1-5)
    pub year: u8,

    /// Course name (e.g., "Sistemas Operativos")
    pub name: String,

    /// Dictation modality label (e.g., "A" for annual, "1C-2C")
    #[serde(default)]
    pub modality: String,

    /// Mandatory or elective
    pub kind: CourseKind,

    /// Courses that must be at least regularized first
    #[serde(default)]
    pub regular_prereqs: Vec<CourseId>,

    /// Courses that must be approved first
    #[serde(default)]
    pub approved_prereqs: Vec<CourseId>,

    /// Elective credits (zero for mandatory courses)
    #[serde(default)]
    pub credits: u32,
}

impl Course {
    /// Create a course with no prerequisites
    #[must_use]
    pub fn new(id: CourseId, year: u8, name: impl Into<String>, kind: CourseKind) -> Self {
        Self {
            id,
            year,
            name: name.into(),
            modality: String::new(),
            kind,
            regular_prereqs: Vec::new(),
            approved_prereqs: Vec::new(),
            credits: 0,
        }
    }

    /// Builder-style helper to set regular prerequisites
    #[must_use]
    pub fn with_regular(mut self, prereqs: &[CourseId]) -> Self {
        for &id in prereqs {
            self.add_prerequisite(PrereqKind::Regular, id);
        }
        self
    }

    /// Builder-style helper to set approved prerequisites
    #[must_use]
    pub fn with_approved(mut self, prereqs: &[CourseId]) -> Self {
        for &id in prereqs {
            self.add_prerequisite(PrereqKind::Approved, id);
        }
        self
    }

    /// Builder-style helper to set elective credits
    #[must_use]
    pub const fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    /// Add a prerequisite of the given kind, ignoring duplicates
    pub fn add_prerequisite(&mut self, kind: PrereqKind, id: CourseId) {
        let list = match kind {
            PrereqKind::Regular => &mut self.regular_prereqs,
            PrereqKind::Approved => &mut self.approved_prereqs,
        };
        if !list.contains(&id) {
            list.push(id);
        }
    }

    /// All prerequisite references with their kind
    pub fn prerequisites(&self) -> impl Iterator<Item = (PrereqKind, CourseId)> + '_ {
        self.regular_prereqs
            .iter()
            .map(|&id| (PrereqKind::Regular, id))
            .chain(self.approved_prereqs.iter().map(|&id| (PrereqKind::Approved, id)))
    }

    /// Whether the course belongs to the fixed curriculum
    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.kind == CourseKind::Mandatory
    }

    /// Whether the course is an elective
    #[must_use]
    pub fn is_elective(&self) -> bool {
        self.kind == CourseKind::Elective
    }

    /// Case- and accent-insensitive key for alphabetical listings
    #[must_use]
    pub fn name_key(&self) -> String {
        self.name
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| match c {
                'á' | 'à' | 'ä' => 'a',
                'é' | 'è' | 'ë' => 'e',
                'í' | 'ì' | 'ï' => 'i',
                'ó' | 'ò' | 'ö' => 'o',
                'ú' | 'ù' | 'ü' => 'u',
                'ñ' => 'n',
                other => other,
            })
            .collect()
    }
}

/// Sort courses alphabetically by name, ignoring case and accents
pub fn sort_by_name(courses: &mut [&Course]) {
    courses.sort_by_cached_key(|course| course.name_key());
}
