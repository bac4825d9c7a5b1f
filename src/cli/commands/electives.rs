//! Electives command handler

use super::progress::{report_change, save};
use super::{confirm, fail, Workspace};
use crate::args::ElectivesSubcommand;
use correlativas::core::prerequisites::{is_locked, missing_prerequisites};
use correlativas::core::progress_store::ProgressStore;

/// Dispatch electives subcommands
pub fn run(subcommand: ElectivesSubcommand, ws: &Workspace) {
    let mut store = ws.state.load_progress();

    match subcommand {
        ElectivesSubcommand::List => list(ws, &store),
        ElectivesSubcommand::Add { id } => {
            let course = ws.course(id);
            if !course.is_elective() {
                fail(&format!("{} is not an elective", course.name));
            }
            if is_locked(course, store.progress(), &ws.catalog) {
                let missing = missing_prerequisites(course, store.progress(), &ws.catalog);
                let names: Vec<&str> = missing
                    .regular
                    .iter()
                    .chain(&missing.approved)
                    .map(|c| c.name.as_str())
                    .collect();
                fail(&format!("{} is locked; missing {}", course.name, names.join(", ")));
            }
            if !store.add_elective(id) {
                println!("✓ {} is already active", course.name);
                return;
            }
            save(ws, &store);
            println!("✓ Added elective {}", course.name);
        }
        ElectivesSubcommand::Remove { id, yes } => {
            let course = ws.course(id);
            if !store.is_active_elective(id) {
                fail(&format!("{} is not an active elective", course.name));
            }
            if let Some(status) = store.status(id) {
                let prompt = format!("{} is {status}; remove it and clear its progress?", course.name);
                if !confirm(&prompt, yes) {
                    println!("✗ Removal cancelled");
                    return;
                }
            }
            match store.remove_elective(&ws.catalog, id) {
                Some(change) => {
                    save(ws, &store);
                    println!("✓ Removed elective {}", course.name);
                    if change.old.is_some() {
                        report_change(ws, &change);
                    }
                }
                None => fail(&format!("{} is not an active elective", course.name)),
            }
        }
    }
}

fn list(ws: &Workspace, store: &ProgressStore) {
    println!("\n=== Active electives ({}) ===", store.electives().len());
    for &id in store.electives() {
        if let Some(course) = ws.catalog.get(id) {
            let status = store
                .status(id)
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            println!("  {:>3}  {:<48} {:>2} cr  {status}", id, course.name, course.credits);
        }
    }

    println!("\n=== Other electives ===");
    for course in ws.catalog.electives() {
        if store.is_active_elective(course.id) {
            continue;
        }
        let marker = if is_locked(course, store.progress(), &ws.catalog) {
            "locked"
        } else {
            "available"
        };
        println!(
            "  {:>3}  {:<48} {:>2} cr  {marker}",
            course.id, course.name, course.credits
        );
    }
}
