//! Time-overlap detection between commissions and the fixed schedule

use crate::core::models::{
    Commission, CommissionCatalog, CommissionSubject, CourseId, FixedClass, Semester, TimeSlot,
};

/// Whether any meeting in `a` conflicts with any meeting in `b`
///
/// Meetings conflict on the same day and semester when their half-open
/// intervals intersect; touching endpoints do not conflict.
#[must_use]
pub fn overlaps(a: &[TimeSlot], b: &[TimeSlot]) -> bool {
    a.iter().any(|x| b.iter().any(|y| x.conflicts_with(y)))
}

/// Whether `slots` conflict with any fixed class
#[must_use]
pub fn conflicts_with_fixed(slots: &[TimeSlot], fixed: &[FixedClass]) -> bool {
    fixed.iter().any(|class| overlaps(slots, &class.slots))
}

/// One commission offering a course, as presented for selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOption<'a> {
    /// Label of the dataset the commission comes from
    pub dataset: &'a str,
    /// The commission
    pub commission: &'a Commission,
    /// The course entry inside the commission
    pub subject: &'a CommissionSubject,
    /// Meetings relevant to this option (all, or only semester 2 for projections)
    pub slots: Vec<TimeSlot>,
    /// Whether the option overlaps a fixed class; conflicting options are not selectable
    pub has_conflict: bool,
}

impl SectionOption<'_> {
    /// Commission code
    #[must_use]
    pub fn commission_id(&self) -> &str {
        &self.commission.id
    }

    /// Commit this option for `course`
    #[must_use]
    pub fn to_fixed(&self, course: CourseId) -> FixedClass {
        FixedClass::from_subject(course, &self.commission.id, self.subject)
    }
}

/// Every commission offering `course`, with conflicts against `fixed` flagged
///
/// Conflicting options are kept so the caller can show the whole landscape.
#[must_use]
pub fn section_options<'a>(
    course: CourseId,
    commissions: &'a CommissionCatalog,
    fixed: &[FixedClass],
) -> Vec<SectionOption<'a>> {
    commissions
        .commissions()
        .filter_map(|(dataset, commission)| {
            let subject = commission.subject_for(course)?;
            Some(SectionOption {
                dataset,
                commission,
                subject,
                slots: subject.slots.clone(),
                has_conflict: conflicts_with_fixed(&subject.slots, fixed),
            })
        })
        .collect()
}

/// Commissions offering `course` in semester 2, judged on their semester-2 meetings only
#[must_use]
pub fn possible_section_options<'a>(
    course: CourseId,
    commissions: &'a CommissionCatalog,
    fixed: &[FixedClass],
) -> Vec<SectionOption<'a>> {
    commissions
        .commissions()
        .filter_map(|(dataset, commission)| {
            let subject = commission.subject_for(course)?;
            let slots = subject.slots_in(Semester::Second);
            if slots.is_empty() {
                return None;
            }
            let has_conflict = conflicts_with_fixed(&slots, fixed);
            Some(SectionOption {
                dataset,
                commission,
                subject,
                slots,
                has_conflict,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ClockTime, CommissionDataset, Weekday};

    fn slot(day: Weekday, start: &str, end: &str, semester: Semester) -> TimeSlot {
        TimeSlot::new(
            day,
            start.parse::<ClockTime>().expect("start"),
            end.parse::<ClockTime>().expect("end"),
            semester,
        )
    }

    #[test]
    fn test_overlap_scenario() {
        let a = [slot(Weekday::Lunes, "10:00", "12:00", Semester::First)];
        let b = [slot(Weekday::Lunes, "11:00", "13:00", Semester::First)];

        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        let a = [slot(Weekday::Lunes, "10:00", "11:00", Semester::First)];
        let b = [slot(Weekday::Lunes, "11:00", "12:00", Semester::First)];

        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_different_day_or_semester_never_overlaps() {
        let base = [slot(Weekday::Martes, "18:00", "22:00", Semester::First)];
        let other_day = [slot(Weekday::Jueves, "18:00", "22:00", Semester::First)];
        let other_semester = [slot(Weekday::Martes, "18:00", "22:00", Semester::Second)];
        let annual = [slot(Weekday::Martes, "18:00", "22:00", Semester::Annual)];

        assert!(!overlaps(&base, &other_day));
        assert!(!overlaps(&base, &other_semester));
        assert!(!overlaps(&base, &annual));
        assert!(overlaps(&annual, &annual));
    }

    #[test]
    fn test_overlap_checks_every_pair() {
        let a = [
            slot(Weekday::Lunes, "08:00", "10:00", Semester::First),
            slot(Weekday::Viernes, "14:00", "16:00", Semester::Second),
        ];
        let b = [
            slot(Weekday::Miercoles, "08:00", "10:00", Semester::First),
            slot(Weekday::Viernes, "15:30", "17:00", Semester::Second),
        ];
        assert!(overlaps(&a, &b));
        assert!(!overlaps(&a, &[]));
    }

    const DATASET: &str = r#"{"comisiones": [
        {"id": "3K1", "turno": "Mañana", "materias": [
            {"id": 26, "codigo": "COM", "nombre": "Comunicación de Datos", "horarios": [
                {"dia": "Lunes", "inicio": "08:00", "fin": "10:00", "semestre": 1},
                {"dia": "Jueves", "inicio": "08:00", "fin": "10:00", "semestre": 2}
            ]}
        ]},
        {"id": "3K2", "turno": "Noche", "materias": [
            {"id": 26, "codigo": "COM", "nombre": "Comunicación de Datos", "horarios": [
                {"dia": "Lunes", "inicio": "19:00", "fin": "21:00", "semestre": 1}
            ]}
        ]}
    ]}"#;

    fn catalog() -> CommissionCatalog {
        CommissionCatalog::new(vec![
            CommissionDataset::from_json("3ro", DATASET).expect("dataset"),
        ])
    }

    fn fixed(slots: Vec<TimeSlot>) -> FixedClass {
        FixedClass {
            course_id: 15,
            course_name: "Sistemas Operativos".to_string(),
            commission_id: "2K1".to_string(),
            slots,
            color_code: "SOP".to_string(),
        }
    }

    #[test]
    fn test_section_options_flag_conflicts() {
        let commissions = catalog();
        let fixed = [fixed(vec![slot(Weekday::Lunes, "09:00", "11:00", Semester::First)])];

        let options = section_options(26, &commissions, &fixed);

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].commission_id(), "3K1");
        assert_eq!(options[0].dataset, "3ro");
        assert!(options[0].has_conflict);
        assert!(!options[1].has_conflict);
        assert!(section_options(99, &commissions, &fixed).is_empty());
    }

    #[test]
    fn test_possible_options_use_second_semester_only() {
        let commissions = catalog();
        let fixed = [fixed(vec![slot(Weekday::Lunes, "09:00", "11:00", Semester::First)])];

        let options = possible_section_options(26, &commissions, &fixed);

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].commission_id(), "3K1");
        assert_eq!(options[0].slots.len(), 1);
        assert!(!options[0].has_conflict);
    }

    #[test]
    fn test_to_fixed_uses_requested_course() {
        let commissions = catalog();
        let options = section_options(26, &commissions, &[]);
        let class = options[1].to_fixed(26);

        assert_eq!(class.course_id, 26);
        assert_eq!(class.commission_id, "3K2");
        assert_eq!(class.color_code, "COM");
        assert_eq!(class.slots.len(), 1);
    }
}
