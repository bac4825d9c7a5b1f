//! Per-course progress entries

use super::course::{CourseId, PrereqKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Status a student has reached in a course
///
/// Ordered by what it satisfies: `Approved` satisfies both prerequisite kinds,
/// `Regularized` only regular-type prerequisites, `Attending` neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Currently enrolled
    Attending,
    /// Coursework passed, final pending
    Regularized,
    /// Final passed
    Approved,
}

impl Status {
    /// Whether this status satisfies a prerequisite of the given kind
    #[must_use]
    pub const fn satisfies(self, kind: PrereqKind) -> bool {
        match kind {
            PrereqKind::Regular => matches!(self, Self::Regularized | Self::Approved),
            PrereqKind::Approved => matches!(self, Self::Approved),
        }
    }

    /// Whether the course counts as completed for planning (regularized or approved)
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Regularized | Self::Approved)
    }
}

/// `satisfies` lifted over a possibly absent status
#[must_use]
pub fn status_satisfies(status: Option<Status>, kind: PrereqKind) -> bool {
    status.is_some_and(|s| s.satisfies(kind))
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Attending => "attending",
            Self::Regularized => "regularized",
            Self::Approved => "approved",
        };
        f.write_str(label)
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attending" | "cursando" | "c" => Ok(Self::Attending),
            "regularized" | "regularizada" | "r" => Ok(Self::Regularized),
            "approved" | "aprobada" | "a" => Ok(Self::Approved),
            other => Err(format!("Unknown status: '{other}'")),
        }
    }
}

/// Final grade as persisted: either a number or the raw text typed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    /// Numeric grade
    Number(f64),
    /// Free-form text, numeric when it parses
    Text(String),
}

impl Grade {
    /// Numeric value, if the grade has one
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Grade {
    /// Numeric input becomes a number; anything else is kept verbatim
    fn from(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(input.to_string()),
        }
    }
}

/// Progress recorded for one course
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Reached status; absent for grade-only entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Final grade, meaningful once approved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
}

impl ProgressEntry {
    /// Entry with a status and no grade
    #[must_use]
    pub const fn with_status(status: Status) -> Self {
        Self {
            status: Some(status),
            grade: None,
        }
    }
}

/// Map of course id -> progress entry, persisted as a JSON object keyed by id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(BTreeMap<CourseId, ProgressEntry>);

impl Progress {
    /// Empty progress
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of a course, `None` when absent
    #[must_use]
    pub fn status(&self, id: CourseId) -> Option<Status> {
        self.0.get(&id).and_then(|entry| entry.status)
    }

    /// Entry for a course
    #[must_use]
    pub fn get(&self, id: CourseId) -> Option<&ProgressEntry> {
        self.0.get(&id)
    }

    /// Whether an entry exists for a course
    #[must_use]
    pub fn contains(&self, id: CourseId) -> bool {
        self.0.contains_key(&id)
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, id: CourseId, entry: ProgressEntry) -> Option<ProgressEntry> {
        self.0.insert(id, entry)
    }

    /// Set the status, keeping any existing grade
    pub fn set_status(&mut self, id: CourseId, status: Status) {
        self.0.entry(id).or_default().status = Some(status);
    }

    /// Remove an entry
    pub fn remove(&mut self, id: CourseId) -> Option<ProgressEntry> {
        self.0.remove(&id)
    }

    /// Iterate entries in id order
    pub fn iter(&self) -> impl Iterator<Item = (CourseId, &ProgressEntry)> {
        self.0.iter().map(|(&id, entry)| (id, entry))
    }

    /// Mutable access for grade edits
    pub fn entry_mut(&mut self, id: CourseId) -> &mut ProgressEntry {
        self.0.entry(id).or_default()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(CourseId, Status)> for Progress {
    fn from_iter<I: IntoIterator<Item = (CourseId, Status)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, status)| (id, ProgressEntry::with_status(status)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_satisfaction() {
        assert!(Status::Approved.satisfies(PrereqKind::Regular));
        assert!(Status::Approved.satisfies(PrereqKind::Approved));
        assert!(Status::Regularized.satisfies(PrereqKind::Regular));
        assert!(!Status::Regularized.satisfies(PrereqKind::Approved));
        assert!(!Status::Attending.satisfies(PrereqKind::Regular));
        assert!(!status_satisfies(None, PrereqKind::Regular));
    }

    #[test]
    fn test_grade_value() {
        assert_eq!(Grade::Number(8.0).value(), Some(8.0));
        assert_eq!(Grade::Text(" 7.5 ".to_string()).value(), Some(7.5));
        assert_eq!(Grade::Text(String::new()).value(), None);
        assert_eq!(Grade::Text("NaN".to_string()).value(), None);
        assert_eq!(Grade::from("8"), Grade::Number(8.0));
        assert_eq!(Grade::from("ausente"), Grade::Text("ausente".to_string()));
    }

    #[test]
    fn test_progress_json_shape() {
        let json = r#"{"1": {"status": "approved", "grade": "9"}, "9": {"status": "regularized"}, "12": {"grade": 6}}"#;
        let progress: Progress = serde_json::from_str(json).expect("progress map");

        assert_eq!(progress.status(1), Some(Status::Approved));
        assert_eq!(progress.get(1).and_then(|e| e.grade.clone()), Some(Grade::Text("9".to_string())));
        assert_eq!(progress.status(9), Some(Status::Regularized));
        assert!(progress.contains(12));
        assert_eq!(progress.status(12), None);

        let back = serde_json::to_value(&progress).expect("serialize");
        assert_eq!(back["9"], serde_json::json!({"status": "regularized"}));
        assert_eq!(back["12"]["grade"], serde_json::json!(6.0));
    }

    #[test]
    fn test_set_status_keeps_grade() {
        let mut progress = Progress::new();
        progress.entry_mut(3).grade = Some(Grade::Number(7.0));
        progress.set_status(3, Status::Approved);

        let entry = progress.get(3).expect("entry");
        assert_eq!(entry.status, Some(Status::Approved));
        assert_eq!(entry.grade, Some(Grade::Number(7.0)));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Approved".parse::<Status>(), Ok(Status::Approved));
        assert_eq!("r".parse::<Status>(), Ok(Status::Regularized));
        assert_eq!("cursando".parse::<Status>(), Ok(Status::Attending));
        assert!("done".parse::<Status>().is_err());
    }
}
