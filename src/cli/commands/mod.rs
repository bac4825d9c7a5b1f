//! CLI command handlers for `correlativas`.
//!
//! Each command is implemented in its own submodule. Handlers print `✓`/`✗`
//! lines and exit non-zero when a command fails.

pub mod config;
pub mod electives;
pub mod progress;
pub mod report;
pub mod schedule;

use correlativas::config::Config;
use correlativas::core::models::{CommissionCatalog, Course, CourseCatalog, CourseId};
use correlativas::core::persistence::StateStore;
use correlativas::core::CatalogError;
use correlativas::{error, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Everything a command needs: the catalogs and the state directory
pub struct Workspace {
    pub catalog: CourseCatalog,
    pub commissions: CommissionCatalog,
    pub state: StateStore,
}

impl Workspace {
    /// Load the catalogs named by `config`
    pub fn open(config: &Config) -> Result<Self, CatalogError> {
        let catalog = if config.paths.catalog_file.is_empty() {
            CourseCatalog::bundled()?
        } else {
            CourseCatalog::load(Path::new(&config.paths.catalog_file))?
        };
        info!("Catalog loaded: {} courses", catalog.len());

        let commissions_dir = PathBuf::from(&config.paths.commissions_dir);
        let commissions = if commissions_dir.is_dir() {
            CommissionCatalog::load_dir(&commissions_dir)?
        } else {
            info!(
                "No commission datasets at {}; schedule commands will find no offers",
                commissions_dir.display()
            );
            CommissionCatalog::default()
        };

        Ok(Self {
            catalog,
            commissions,
            state: StateStore::new(&config.paths.data_dir),
        })
    }

    /// [`open`](Self::open), exiting with a message on failure
    pub fn open_or_exit(config: &Config) -> Self {
        Self::open(config).unwrap_or_else(|e| {
            error!("Failed to load catalogs: {e}");
            fail(&format!("Failed to load catalogs: {e}"))
        })
    }

    /// Look up a course, exiting when the id is unknown
    pub fn course(&self, id: CourseId) -> &Course {
        self.catalog
            .get(id)
            .unwrap_or_else(|| fail(&format!("Unknown course id: {id}")))
    }
}

/// Print `✗ message` and exit with status 1
pub fn fail(message: &str) -> ! {
    eprintln!("✗ {message}");
    std::process::exit(1);
}

/// Ask a y/n question unless `yes` is already given
pub fn confirm(prompt: &str, yes: bool) -> bool {
    if yes {
        return true;
    }

    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}
