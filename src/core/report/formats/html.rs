//! HTML report generator
//!
//! Draws one weekly calendar per semester with the fixed classes, followed by
//! the progress summary. The output is a single self-contained page with
//! embedded CSS.

use crate::core::models::{Semester, Weekday};
use crate::core::priority::PriorityScope;
use crate::core::report::{ReportContext, ReportGenerator};
use crate::core::schedule::{BlockSource, CalendarView};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// Number of color classes defined by the template stylesheet
const PALETTE_SIZE: usize = 8;

/// HTML report generator with per-semester calendars
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let stats = &ctx.stats;
        let mut output = HTML_TEMPLATE.to_string();

        output = output.replace("{{generated_on}}", &ctx.generated_on());
        output = output.replace("{{percentage}}", &stats.percentage.to_string());
        output = output.replace("{{approved}}", &stats.approved.to_string());
        output = output.replace("{{regularized}}", &stats.regularized.to_string());
        output = output.replace("{{available}}", &stats.available.to_string());
        output = output.replace("{{locked}}", &stats.locked.to_string());
        output = output.replace("{{total}}", &stats.total.to_string());
        output = output.replace("{{average_grade}}", &ctx.average_grade());
        output = output.replace("{{elective_credits}}", &stats.elective_credits.to_string());

        output = output.replace("{{first_semester}}", &Self::generate_calendar(ctx, Semester::First));
        output = output.replace("{{second_semester}}", &Self::generate_calendar(ctx, Semester::Second));
        output = output.replace("{{years}}", &Self::generate_years_html(ctx));
        output = output.replace("{{priority}}", &Self::generate_priority_html(ctx));

        output
    }

    /// Generate the weekly calendar for one semester
    fn generate_calendar(ctx: &ReportContext, semester: Semester) -> String {
        let view = CalendarView {
            fixed: ctx.fixed(),
            ..CalendarView::default()
        };
        let range = view.visible_range(semester);
        let labels = range.labels();
        let hours = labels.len().saturating_sub(1).max(1);
        let mut html = String::new();

        let _ = writeln!(
            html,
            "<div class=\"calendar\" style=\"--hours: {hours}\">"
        );
        let _ = writeln!(html, "  <div class=\"time-axis\">");
        for label in &labels {
            let _ = writeln!(html, "    <div class=\"time-label\">{label}</div>");
        }
        let _ = writeln!(html, "  </div>");

        for day in view.days(semester) {
            let _ = writeln!(html, "  <div class=\"day-column\">");
            let _ = writeln!(html, "    <div class=\"day-header\">{day}</div>");
            let _ = writeln!(html, "    <div class=\"day-body\">");

            for block in view.day_blocks(day, semester) {
                let BlockSource::Fixed(class) = block.item else {
                    continue;
                };
                let geometry = block.geometry(range);
                let _ = writeln!(
                    html,
                    "      <div class=\"block color-{}\" style=\"top:{:.2}%;height:{:.2}%;left:{:.2}%;width:{:.2}%\" title=\"{}\">",
                    color_index(&class.color_code),
                    geometry.top,
                    geometry.height,
                    geometry.left,
                    geometry.width,
                    escape(&class.course_name)
                );
                let _ = writeln!(
                    html,
                    "        <span class=\"block-code\">{}</span> <span class=\"block-commission\">{}</span>",
                    escape(&class.color_code),
                    escape(&class.commission_id)
                );
                let _ = writeln!(
                    html,
                    "        <div class=\"block-time\">{} - {}</div>",
                    block.slot.start, block.slot.end
                );
                let _ = writeln!(html, "      </div>");
            }

            let _ = writeln!(html, "    </div>");
            let _ = writeln!(html, "  </div>");
        }
        let _ = writeln!(html, "</div>");

        if !Weekday::ALL
            .into_iter()
            .any(|day| !view.day_blocks(day, semester).is_empty())
        {
            let _ = writeln!(html, "<p class=\"empty\">No classes this semester.</p>");
        }

        html
    }

    /// Generate the per-year status rows
    fn generate_years_html(ctx: &ReportContext) -> String {
        let mut html = String::new();
        for (year, status) in &ctx.years {
            let _ = writeln!(
                html,
                "<tr class=\"year-{status}\"><td>{year}</td><td>{status}</td></tr>"
            );
        }
        html
    }

    /// Generate the priority table rows
    fn generate_priority_html(ctx: &ReportContext) -> String {
        let mut html = String::new();
        for entry in ctx.priority(PriorityScope::Global) {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                entry.course.id,
                escape(&entry.course.name),
                entry.unlocks_mandatory,
                entry.unlocks_elective
            );
        }
        html
    }
}

/// Stable palette slot for a course code
fn color_index(code: &str) -> usize {
    code.bytes().map(usize::from).sum::<usize>() % PALETTE_SIZE
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        ClockTime, Course, CourseCatalog, CourseKind, FixedClass, TimeSlot,
    };
    use crate::core::progress_store::ProgressStore;
    use crate::core::schedule::ScheduleSession;

    fn catalog() -> CourseCatalog {
        CourseCatalog::new(vec![
            Course::new(1, 1, "Análisis Matemático I", CourseKind::Mandatory),
            Course::new(9, 2, "Análisis Matemático II", CourseKind::Mandatory).with_approved(&[1]),
        ])
        .expect("valid catalog")
    }

    fn class(day: Weekday, start: &str, end: &str, semester: Semester) -> FixedClass {
        FixedClass {
            course_id: 9,
            course_name: "Análisis Matemático II".to_string(),
            commission_id: "2K1".to_string(),
            slots: vec![TimeSlot::new(
                day,
                start.parse::<ClockTime>().expect("start"),
                end.parse::<ClockTime>().expect("end"),
                semester,
            )],
            color_code: "AM2".to_string(),
        }
    }

    #[test]
    fn test_render_places_fixed_blocks() {
        let catalog = catalog();
        let store = ProgressStore::new();
        let session = ScheduleSession::from_parts(
            vec![class(Weekday::Martes, "18:00", "20:00", Semester::First)],
            Vec::new(),
        );
        let ctx = ReportContext::new(&catalog, &store, &session);

        let html = HtmlReporter::new().render(&ctx).expect("render");

        assert!(html.contains("block-code\">AM2"));
        assert!(html.contains("18:00 - 20:00"));
        assert!(html.contains("No classes this semester."));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_annual_class_appears_in_both_calendars() {
        let catalog = catalog();
        let store = ProgressStore::new();
        let session = ScheduleSession::from_parts(
            vec![class(Weekday::Sabado, "09:00", "12:00", Semester::Annual)],
            Vec::new(),
        );
        let ctx = ReportContext::new(&catalog, &store, &session);

        let html = HtmlReporter::new().render(&ctx).expect("render");

        assert_eq!(html.matches("09:00 - 12:00").count(), 2);
        assert_eq!(html.matches(">Sábado<").count(), 2);
        assert!(!html.contains("No classes this semester."));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
