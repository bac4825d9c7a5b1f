//! Report command handler
//!
//! Renders the progress summary and weekly calendars to a file in the
//! requested format.

use super::{fail, Workspace};
use chrono::Local;
use correlativas::config::Config;
use correlativas::core::report::{ReportContext, ReportFormat};
use correlativas::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command.
///
/// # Arguments
/// * `ws` - Loaded catalogs and state directory
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown, html)
/// * `config` - Configuration containing the default reports directory
pub fn run(ws: &Workspace, output_file: Option<&Path>, format_str: &str, config: &Config) {
    match generate_report(ws, output_file, format_str, config) {
        Ok(path) => println!("✓ Report generated: {}", path.display()),
        Err(err) => {
            error!("Report generation failed: {err}");
            fail(&err);
        }
    }
}

fn generate_report(
    ws: &Workspace,
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) -> Result<PathBuf, String> {
    let format = ReportFormat::from_str(format_str)?;

    let output_path = match output_file {
        Some(path) => path.to_path_buf(),
        None => default_output_path(config, format),
    };
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }

    let store = ws.state.load_progress();
    let session = ws.state.load_schedule();
    let ctx = ReportContext::new(&ws.catalog, &store, &session);

    format
        .generator()
        .generate(&ctx, &output_path)
        .map_err(|e| format!("Failed to write {}: {e}", output_path.display()))?;

    info!("Wrote {format} report to {}", output_path.display());
    Ok(output_path)
}

/// `<reports_dir>/progreso-YYYYMMDD-HHMM.<ext>`
fn default_output_path(config: &Config, format: ReportFormat) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M");
    PathBuf::from(&config.paths.reports_dir)
        .join(format!("progreso-{stamp}.{}", format.extension()))
}
