//! Schedule command handler
//!
//! Text rendering of the weekly calendar: every block is printed with its
//! column position so overlapping options are visible side by side.

use super::{confirm, fail, Workspace};
use crate::args::ScheduleSubcommand;
use correlativas::core::feasibility::possible_courses;
use correlativas::core::models::{Semester, TimeSlot, Weekday};
use correlativas::core::prerequisites::available_courses;
use correlativas::core::schedule::{
    possible_section_options, section_options, BlockSource, CalendarView, ScheduleSession,
    SectionOption,
};
use correlativas::{error, verbose};

/// Dispatch schedule subcommands
pub fn run(subcommand: ScheduleSubcommand, ws: &Workspace) {
    let mut session = ws.state.load_schedule();

    match subcommand {
        ScheduleSubcommand::Show {
            semester,
            with_course,
            day,
        } => {
            let semesters = match semester {
                Some(raw) => vec![raw.parse::<Semester>().unwrap_or_else(|e| fail(&e))],
                None => vec![Semester::First, Semester::Second],
            };
            let day = day.map(|raw| raw.parse::<Weekday>().unwrap_or_else(|e| fail(&e)));
            let options = with_course
                .map(|id| section_options(ws.course(id).id, &ws.commissions, session.fixed()))
                .unwrap_or_default();
            list_fixed(&session);
            let view = CalendarView {
                fixed: session.fixed(),
                options: &options,
                possible: &[],
            };
            for semester in semesters {
                print_calendar(&view, semester, day);
            }
        }
        ScheduleSubcommand::Options { id } => {
            let course = ws.course(id);
            let options = section_options(id, &ws.commissions, session.fixed());
            if options.is_empty() {
                println!("✗ No commission offers {}", course.name);
                return;
            }
            println!("\n=== {} ===", course.name);
            print_options(&options);
        }
        ScheduleSubcommand::Fix { id, commission } => {
            let course = ws.course(id);
            let available = available_courses(ws.state.load_progress().progress(), &ws.catalog);
            if !available.contains(id) {
                verbose!("{} is not available yet; fixing it anyway", course.name);
            }
            match session.fix(id, &commission, &ws.commissions) {
                Ok(class) => println!("✓ Fixed {} in {}", class.course_name, class.commission_id),
                Err(e) => fail(&e.to_string()),
            }
            save(ws, &session);
        }
        ScheduleSubcommand::Unfix { id } => {
            let course = ws.course(id);
            if session.unfix(id) == 0 {
                fail(&format!("{} is not in the schedule", course.name));
            }
            save(ws, &session);
            println!("✓ Removed {} from the schedule", course.name);
        }
        ScheduleSubcommand::Remove { index } => {
            let removed = index
                .checked_sub(1)
                .and_then(|pos| session.remove_at(pos))
                .unwrap_or_else(|| fail(&format!("No fixed class at position {index}")));
            save(ws, &session);
            println!("✓ Removed {} ({})", removed.course_name, removed.commission_id);
        }
        ScheduleSubcommand::Clear { yes } => {
            if session.fixed().is_empty() {
                println!("✓ Schedule is already empty");
                return;
            }
            if !confirm("Remove every fixed class?", yes) {
                println!("✗ Clear cancelled");
                return;
            }
            session.clear();
            save(ws, &session);
            println!("✓ Schedule cleared");
        }
        ScheduleSubcommand::Possible { id: None } => {
            let progress = ws.state.load_progress();
            let possible = possible_courses(
                progress.progress(),
                session.fixed(),
                &ws.catalog,
                &ws.commissions,
            );
            if possible.is_empty() {
                println!("✓ No new courses open up for the second semester");
                return;
            }
            println!("\n=== Possible in the second semester ===");
            for course in possible {
                println!("  {:>3}  {}", course.id, course.name);
            }
        }
        ScheduleSubcommand::Possible { id: Some(id) } => {
            let course = ws.course(id);
            let options = possible_section_options(id, &ws.commissions, session.fixed());
            if options.is_empty() {
                println!("✗ No second-semester commission offers {}", course.name);
                return;
            }
            println!("\n=== {} (second semester) ===", course.name);
            print_options(&options);
            let view = CalendarView {
                fixed: session.fixed(),
                options: &[],
                possible: &options,
            };
            print_calendar(&view, Semester::Second, None);
        }
        ScheduleSubcommand::Save { name } => {
            if session.fixed().is_empty() {
                fail("Nothing to save: the schedule is empty");
            }
            let id = session.save(&name);
            save(ws, &session);
            println!("✓ Saved schedule '{name}' with id {id}");
        }
        ScheduleSubcommand::Load { id, yes } => {
            if !session.fixed().is_empty()
                && !confirm("Replace the current schedule with the saved one?", yes)
            {
                println!("✗ Load cancelled");
                return;
            }
            let name = match session.load(id) {
                Ok(saved) => saved.name.clone(),
                Err(e) => fail(&e.to_string()),
            };
            save(ws, &session);
            println!("✓ Loaded schedule '{name}'");
        }
        ScheduleSubcommand::Delete { id, yes } => {
            let name = session
                .saved()
                .iter()
                .find(|saved| saved.id == id)
                .map(|saved| saved.name.clone())
                .unwrap_or_else(|| fail(&format!("No saved schedule with id {id}")));
            if !confirm(&format!("Delete saved schedule '{name}'?"), yes) {
                println!("✗ Delete cancelled");
                return;
            }
            if let Err(e) = session.delete_saved(id) {
                fail(&e.to_string());
            }
            save(ws, &session);
            println!("✓ Deleted schedule '{name}'");
        }
        ScheduleSubcommand::Saved => {
            if session.saved().is_empty() {
                println!("✓ No saved schedules");
                return;
            }
            println!("\n=== Saved schedules ===");
            for saved in session.saved() {
                println!("  {}  {} ({} classes)", saved.id, saved.name, saved.classes.len());
            }
        }
        ScheduleSubcommand::Browse {
            dataset,
            commission,
        } => browse(ws, dataset.as_deref(), commission.as_deref()),
    }
}

fn save(ws: &Workspace, session: &ScheduleSession) {
    if let Err(e) = ws.state.save_schedule(session) {
        error!("Failed to save schedule: {e}");
        fail(&format!("Failed to save schedule: {e}"));
    }
}

fn format_slot(slot: &TimeSlot) -> String {
    let semester = match slot.semester {
        Semester::Annual => "annual".to_string(),
        other => format!("sem {other}"),
    };
    format!("{} {}-{} ({semester})", slot.day, slot.start, slot.end)
}

fn list_fixed(session: &ScheduleSession) {
    if session.fixed().is_empty() {
        println!("✓ No fixed classes");
        return;
    }
    println!("\n=== Fixed classes ===");
    for (pos, class) in session.fixed().iter().enumerate() {
        let slots: Vec<String> = class.slots.iter().map(format_slot).collect();
        println!(
            "  {:>2}. {:<40} {:<5} {}",
            pos + 1,
            class.course_name,
            class.commission_id,
            slots.join(", ")
        );
    }
}

fn print_options(options: &[SectionOption]) {
    for option in options {
        let slots: Vec<String> = option.slots.iter().map(format_slot).collect();
        let marker = if option.has_conflict { "✗ conflict" } else { "✓" };
        println!(
            "  {:<5} {:<8} {:<10} {}  {marker}",
            option.commission_id(),
            option.dataset,
            option.commission.shift,
            slots.join(", ")
        );
    }
}

fn print_calendar(view: &CalendarView, semester: Semester, only: Option<Weekday>) {
    let range = view.visible_range(semester);
    let labels = range.labels();
    println!(
        "\n=== Semester {semester} ({} - {}) ===",
        labels.first().map_or("", String::as_str),
        labels.last().map_or("", String::as_str)
    );

    for day in view.days(semester) {
        if only.is_some_and(|wanted| wanted != day) {
            continue;
        }
        let blocks = view.day_blocks(day, semester);
        if blocks.is_empty() {
            continue;
        }
        println!("  {day}");
        for block in blocks {
            let (kind, label) = match block.item {
                BlockSource::Fixed(class) => ("fixed", format!("{} {}", class.color_code, class.commission_id)),
                BlockSource::Option(option) => ("option", format!("{} {}", option.subject.code, option.commission_id())),
                BlockSource::Possible(option) => ("possible", format!("{} {}", option.subject.code, option.commission_id())),
            };
            let column = if block.total_columns > 1 {
                format!("  [col {}/{}]", block.column + 1, block.total_columns)
            } else {
                String::new()
            };
            println!(
                "    {}-{}  {kind:<8} {label}{column}",
                block.slot.start, block.slot.end
            );
        }
    }
}

fn browse(ws: &Workspace, dataset: Option<&str>, commission: Option<&str>) {
    let Some(label) = dataset else {
        if ws.commissions.is_empty() {
            println!("✓ No commission datasets loaded");
            return;
        }
        println!("\n=== Datasets ===");
        for dataset in ws.commissions.datasets() {
            println!(
                "  {:<8} {} commissions, {} courses",
                dataset.label,
                dataset.commissions.len(),
                dataset.offered_courses().len()
            );
        }
        return;
    };

    let dataset = ws
        .commissions
        .dataset(label)
        .unwrap_or_else(|| fail(&format!("Unknown dataset: '{label}'")));

    let Some(code) = commission else {
        println!("\n=== {} ===", dataset.label);
        for commission in &dataset.commissions {
            println!(
                "  {:<5} {:<10} {} courses",
                commission.id,
                commission.shift,
                commission.subjects.len()
            );
        }
        return;
    };

    let commission = dataset
        .commission(code)
        .unwrap_or_else(|| fail(&format!("Unknown commission '{code}' in {label}")));
    println!("\n=== {} {} ({}) ===", dataset.label, commission.id, commission.shift);
    for subject in &commission.subjects {
        let slots: Vec<String> = subject.slots.iter().map(format_slot).collect();
        println!("  {:<5} {:<40} {}", subject.code, subject.name, slots.join(", "));
    }
}
