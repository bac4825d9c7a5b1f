//! Progress command handler
//!
//! Status edits go through the cascading store and are saved immediately.
//! Locked courses cannot be given a status from the command line.

use super::{confirm, fail, Workspace};
use crate::args::ProgressSubcommand;
use correlativas::core::models::{Course, CourseId, Grade, Status};
use correlativas::core::prerequisites::{available_courses, is_locked, missing_prerequisites};
use correlativas::core::priority::{priority_list, PriorityScope};
use correlativas::core::progress_store::{cascade, needs_cascade, ProgressStore, StatusChange};
use correlativas::core::stats::{compute_stats, year_statuses};
use correlativas::{error, verbose};

/// Dispatch progress subcommands
pub fn run(subcommand: ProgressSubcommand, ws: &Workspace) {
    let mut store = ws.state.load_progress();

    match subcommand {
        ProgressSubcommand::Show => show(ws, &store),
        ProgressSubcommand::Available => available(ws, &store),
        ProgressSubcommand::Set { id, status } => {
            let status = status.parse::<Status>().unwrap_or_else(|e| fail(&e));
            set(ws, &mut store, id, status);
        }
        ProgressSubcommand::Clear { id, yes } => clear(ws, &mut store, id, yes),
        ProgressSubcommand::Grade { id, value } => {
            let course = ws.course(id);
            store.set_grade(id, Grade::from(value.as_str()));
            save(ws, &store);
            println!("✓ Grade for {} set to {value}", course.name);
        }
        ProgressSubcommand::Reset { yes } => {
            if !confirm("Clear all statuses and active electives?", yes) {
                println!("✗ Reset cancelled");
                return;
            }
            store.reset();
            save(ws, &store);
            println!("✓ Progress reset");
        }
        ProgressSubcommand::Stats => stats(ws, &store),
        ProgressSubcommand::Priority { finals } => {
            let scope = if finals {
                PriorityScope::Finals
            } else {
                PriorityScope::Global
            };
            priority(ws, &store, scope);
        }
    }
}

pub(super) fn save(ws: &Workspace, store: &ProgressStore) {
    if let Err(e) = ws.state.save_progress(store) {
        error!("Failed to save progress: {e}");
        fail(&format!("Failed to save progress: {e}"));
    }
}

fn set(ws: &Workspace, store: &mut ProgressStore, id: CourseId, status: Status) {
    let course = ws.course(id);
    let toggling_off = store.status(id) == Some(status);

    if !toggling_off && is_locked(course, store.progress(), &ws.catalog) {
        fail(&format!(
            "{} is locked; missing {}",
            course.name,
            describe_missing(ws, store, course)
        ));
    }

    let change = store.set_status(&ws.catalog, id, status);
    save(ws, store);
    report_change(ws, &change);
}

fn clear(ws: &Workspace, store: &mut ProgressStore, id: CourseId, yes: bool) {
    let course = ws.course(id);
    let old = store.status(id);
    let dependents = if needs_cascade(old, None) {
        cascade(&ws.catalog, store.progress(), id, None)
    } else {
        Vec::new()
    };

    if !dependents.is_empty() {
        println!("Clearing {} also clears:", course.name);
        for dependent in &dependents {
            let name = ws.catalog.get(*dependent).map_or("?", |c| c.name.as_str());
            println!("    - {dependent} {name}");
        }
        if !confirm("Continue?", yes) {
            println!("✗ Clear cancelled");
            return;
        }
    }

    let change = store.clear(&ws.catalog, id);
    save(ws, store);
    report_change(ws, &change);
}

pub(super) fn report_change(ws: &Workspace, change: &StatusChange) {
    let name = ws
        .catalog
        .get(change.course)
        .map_or_else(|| change.course.to_string(), |c| c.name.clone());
    match change.new {
        Some(status) => println!("✓ {name}: {status}"),
        None => println!("✓ {name}: cleared"),
    }

    if change.cascaded_any() {
        println!("  Also cleared (prerequisites no longer met):");
        for id in &change.cascaded {
            let dependent = ws.catalog.get(*id).map_or("?", |c| c.name.as_str());
            println!("    - {id} {dependent}");
        }
    }
}

fn describe_missing(ws: &Workspace, store: &ProgressStore, course: &Course) -> String {
    let missing = missing_prerequisites(course, store.progress(), &ws.catalog);
    let mut parts = Vec::new();
    if !missing.regular.is_empty() {
        let names: Vec<&str> = missing.regular.iter().map(|c| c.name.as_str()).collect();
        parts.push(format!("regularized: {}", names.join(", ")));
    }
    if !missing.approved.is_empty() {
        let names: Vec<&str> = missing.approved.iter().map(|c| c.name.as_str()).collect();
        parts.push(format!("approved: {}", names.join(", ")));
    }
    parts.join("; ")
}

fn status_cell(ws: &Workspace, store: &ProgressStore, course: &Course) -> String {
    let entry = store.progress().get(course.id);
    match entry.and_then(|e| e.status) {
        Some(status) => match entry.and_then(|e| e.grade.as_ref()) {
            Some(grade) => format!("{status} ({grade})"),
            None => status.to_string(),
        },
        None if is_locked(course, store.progress(), &ws.catalog) => "locked".to_string(),
        None => "-".to_string(),
    }
}

fn show(ws: &Workspace, store: &ProgressStore) {
    let years = year_statuses(store, &ws.catalog);
    let mut current_year = None;

    for course in ws.catalog.mandatory() {
        if current_year != Some(course.year) {
            current_year = Some(course.year);
            let label = years.get(&course.year).map_or("-".to_string(), ToString::to_string);
            println!("\n=== Year {} [{label}] ===", course.year);
        }
        println!(
            "  {:>3}  {:<48} {}",
            course.id,
            course.name,
            status_cell(ws, store, course)
        );
        verbose!("       {}", describe_missing(ws, store, course));
    }

    if !store.electives().is_empty() {
        println!("\n=== Electives ===");
        for &id in store.electives() {
            if let Some(course) = ws.catalog.get(id) {
                println!(
                    "  {:>3}  {:<48} {}",
                    course.id,
                    course.name,
                    status_cell(ws, store, course)
                );
            }
        }
    }
}

fn available(ws: &Workspace, store: &ProgressStore) {
    let available = available_courses(store.progress(), &ws.catalog);

    println!("\n=== Mandatory ({}) ===", available.mandatory.len());
    for course in &available.mandatory {
        println!("  {:>3}  {}", course.id, course.name);
    }

    println!("\n=== Electives ({}) ===", available.electives.len());
    for course in &available.electives {
        let marker = if store.is_active_elective(course.id) { "*" } else { " " };
        println!("  {:>3}{marker} {}", course.id, course.name);
    }
}

fn stats(ws: &Workspace, store: &ProgressStore) {
    let stats = compute_stats(store, &ws.catalog);

    println!("\n=== Progress ===\n");
    println!("  Progress:          {}%", stats.percentage);
    println!("  Approved:          {}", stats.approved);
    println!("  Regularized:       {}", stats.regularized);
    println!("  Available:         {}", stats.available);
    println!("  Locked:            {}", stats.locked);
    println!("  Total tracked:     {}", stats.total);
    match stats.average_grade {
        Some(avg) => println!("  Average grade:     {avg:.2}"),
        None => println!("  Average grade:     -"),
    }
    println!("  Elective credits:  {}", stats.elective_credits);
    println!("  Addable electives: {}", stats.addable_electives);

    if !stats.ready_to_start.is_empty() {
        println!("\n  Ready to start:");
        for id in &stats.ready_to_start {
            if let Some(course) = ws.catalog.get(*id) {
                println!("    {:>3}  {}", course.id, course.name);
            }
        }
    }
}

fn priority(ws: &Workspace, store: &ProgressStore, scope: PriorityScope) {
    let ranked = priority_list(store.progress(), &ws.catalog, scope);
    if ranked.is_empty() {
        println!("✓ Nothing to prioritize");
        return;
    }

    println!("\n=== Priority ({scope}) ===\n");
    println!("  {:>3}  {:>3}  {:<48} {:>9} {:>9}", "#", "ID", "Course", "Mandatory", "Electives");
    for (pos, entry) in ranked.iter().enumerate() {
        println!(
            "  {:>3}  {:>3}  {:<48} {:>9} {:>9}",
            pos + 1,
            entry.course.id,
            entry.course.name,
            entry.unlocks_mandatory,
            entry.unlocks_elective
        );
    }
}
