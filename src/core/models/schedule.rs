//! Committed schedule choices and named snapshots

use super::commission::{CommissionSubject, TimeSlot};
use super::course::CourseId;
use serde::{Deserialize, Serialize};

/// A commission the user has committed to for one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedClass {
    /// Course the class was fixed for
    #[serde(rename = "subjectId")]
    pub course_id: CourseId,

    /// Display name of the course in the commission
    #[serde(rename = "subjectName", default)]
    pub course_name: String,

    /// Commission code
    #[serde(rename = "comisionId")]
    pub commission_id: String,

    /// Copied meetings of the chosen commission
    #[serde(rename = "horarios", default)]
    pub slots: Vec<TimeSlot>,

    /// Short code used to pick a calendar color
    #[serde(rename = "colorCode", default)]
    pub color_code: String,
}

impl FixedClass {
    /// Commit `subject` from commission `commission_id` for `course_id`
    #[must_use]
    pub fn from_subject(course_id: CourseId, commission_id: &str, subject: &CommissionSubject) -> Self {
        Self {
            course_id,
            course_name: subject.name.clone(),
            commission_id: commission_id.to_string(),
            slots: subject.slots.clone(),
            color_code: subject.code.clone(),
        }
    }
}

/// A named snapshot of the fixed classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSchedule {
    /// Creation timestamp in milliseconds, unique among saved schedules
    pub id: i64,
    /// User-supplied name
    pub name: String,
    /// Snapshot of the fixed classes
    #[serde(default)]
    pub classes: Vec<FixedClass>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_class_json_keys() {
        let json = r#"{
            "subjectId": 15, "subjectName": "Sistemas Operativos", "comisionId": "2K1",
            "horarios": [{"dia": "Lunes", "inicio": "08:30", "fin": "12:00", "semestre": 1}],
            "colorCode": "SOP"
        }"#;
        let fixed: FixedClass = serde_json::from_str(json).expect("fixed class");

        assert_eq!(fixed.course_id, 15);
        assert_eq!(fixed.commission_id, "2K1");
        assert_eq!(fixed.slots.len(), 1);

        let back = serde_json::to_value(&fixed).expect("serialize");
        assert_eq!(back["subjectId"], serde_json::json!(15));
        assert_eq!(back["horarios"][0]["inicio"], serde_json::json!("08:30"));
    }

    #[test]
    fn test_saved_schedule_without_classes() {
        let saved: SavedSchedule =
            serde_json::from_str(r#"{"id": 1700000000000, "name": "Mañana ideal"}"#).expect("saved");
        assert!(saved.classes.is_empty());
    }
}
