//! Markdown report generator
//!
//! Generates a plain progress summary with priority tables and the fixed
//! schedule. Renders well in GitHub, GitLab and VS Code.

use crate::core::priority::{PriorityEntry, PriorityScope};
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let stats = &ctx.stats;
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{generated_on}}", &ctx.generated_on());
        output = output.replace("{{percentage}}", &stats.percentage.to_string());
        output = output.replace("{{approved}}", &stats.approved.to_string());
        output = output.replace("{{regularized}}", &stats.regularized.to_string());
        output = output.replace("{{available}}", &stats.available.to_string());
        output = output.replace("{{locked}}", &stats.locked.to_string());
        output = output.replace("{{total}}", &stats.total.to_string());
        output = output.replace("{{average_grade}}", &ctx.average_grade());
        output = output.replace("{{elective_credits}}", &stats.elective_credits.to_string());

        output = output.replace("{{years}}", &Self::generate_years_table(ctx));
        output = output.replace(
            "{{priority}}",
            &Self::generate_priority_table(&ctx.priority(PriorityScope::Global)),
        );
        output = output.replace(
            "{{finals}}",
            &Self::generate_priority_table(&ctx.priority(PriorityScope::Finals)),
        );
        output = output.replace("{{fixed_classes}}", &Self::generate_fixed_table(ctx));

        output
    }

    fn generate_years_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        table.push_str("| Año | Estado |\n");
        table.push_str("|---|---|\n");
        for (year, status) in &ctx.years {
            let _ = writeln!(table, "| {year} | {status} |");
        }
        table
    }

    /// Ranked courses as a table, or a note when nothing unlocks anything
    fn generate_priority_table(entries: &[PriorityEntry]) -> String {
        if entries.is_empty() {
            return "_Nada para priorizar._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| # | Id | Materia | Obligatorias | Electivas |\n");
        table.push_str("|---|---|---|---|---|\n");
        for (pos, entry) in entries.iter().enumerate() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} |",
                pos + 1,
                entry.course.id,
                entry.course.name,
                entry.unlocks_mandatory,
                entry.unlocks_elective
            );
        }
        table
    }

    /// Fixed classes with every meeting listed
    fn generate_fixed_table(ctx: &ReportContext) -> String {
        let fixed = ctx.fixed();
        if fixed.is_empty() {
            return "_Sin materias fijadas._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Materia | Comisión | Horarios |\n");
        table.push_str("|---|---|---|\n");
        for class in fixed {
            let slots: Vec<String> = class
                .slots
                .iter()
                .map(|slot| {
                    format!(
                        "{} {}-{} ({})",
                        slot.day, slot.start, slot.end, slot.semester
                    )
                })
                .collect();
            let _ = writeln!(
                table,
                "| {} | {} | {} |",
                class.course_name,
                class.commission_id,
                slots.join(", ")
            );
        }
        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
