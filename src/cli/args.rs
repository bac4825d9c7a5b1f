//! CLI argument definitions for `correlativas`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use correlativas::config::ConfigOverrides;
use correlativas::core::models::CourseId;
use correlativas::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProgressSubcommand {
    /// Show the curriculum year by year with statuses and lock markers.
    Show,
    /// List courses that can be taken now, mandatory and electives separately.
    Available,
    /// Set the status of a course (attending, regularized, approved).
    ///
    /// Setting the status a course already has clears it. Dependents whose
    /// prerequisites stop being met are cleared too.
    Set {
        /// Course id
        #[arg(value_name = "ID")]
        id: CourseId,
        /// New status (attending|regularized|approved, or c|r|a)
        #[arg(value_name = "STATUS")]
        status: String,
    },
    /// Clear the status of a course, cascading to dependents.
    ///
    /// Asks for confirmation when dependents would be cleared too.
    Clear {
        /// Course id
        #[arg(value_name = "ID")]
        id: CourseId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Record a grade for a course.
    Grade {
        /// Course id
        #[arg(value_name = "ID")]
        id: CourseId,
        /// Grade (numeric or free text)
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Clear every status and active elective (requires confirmation).
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show progress statistics.
    Stats,
    /// Rank pending courses by how many courses they unlock.
    Priority {
        /// Rank regularized/attending courses instead (finals to take)
        #[arg(long)]
        finals: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ElectivesSubcommand {
    /// List active electives and the ones that could be added.
    List,
    /// Activate an elective so it counts toward progress.
    Add {
        /// Elective course id
        #[arg(value_name = "ID")]
        id: CourseId,
    },
    /// Deactivate an elective and clear its progress.
    ///
    /// Asks for confirmation when the elective has a status.
    Remove {
        /// Elective course id
        #[arg(value_name = "ID")]
        id: CourseId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScheduleSubcommand {
    /// Show the fixed classes laid out per day.
    Show {
        /// Semester to show (1 or 2); both when omitted
        #[arg(short, long, value_name = "SEMESTER")]
        semester: Option<String>,
        /// Also lay out the commission options of this course
        #[arg(long = "with", value_name = "ID")]
        with_course: Option<CourseId>,
        /// Only this day (e.g. lunes, ju)
        #[arg(short, long, value_name = "DAY")]
        day: Option<String>,
    },
    /// List every commission offering a course, flagging conflicts.
    Options {
        /// Course id
        #[arg(value_name = "ID")]
        id: CourseId,
    },
    /// Fix a commission for a course.
    Fix {
        /// Course id
        #[arg(value_name = "ID")]
        id: CourseId,
        /// Commission code (e.g., 3K1)
        #[arg(value_name = "COMMISSION")]
        commission: String,
    },
    /// Remove a course from the schedule.
    Unfix {
        /// Course id
        #[arg(value_name = "ID")]
        id: CourseId,
    },
    /// Remove the fixed class at a position (as listed by `schedule show`).
    Remove {
        /// 1-based position
        #[arg(value_name = "INDEX")]
        index: usize,
    },
    /// Remove every fixed class (requires confirmation).
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Courses that become takeable in the second semester if the fixed
    /// first-semester courses are regularized.
    ///
    /// With an ID, lists that course's second-semester commissions instead.
    Possible {
        /// Course id to inspect
        #[arg(value_name = "ID")]
        id: Option<CourseId>,
    },
    /// Save the fixed classes under a name.
    Save {
        /// Schedule name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Replace the fixed classes with a saved schedule.
    ///
    /// Asks for confirmation when the current schedule is not empty.
    Load {
        /// Saved schedule id
        #[arg(value_name = "ID")]
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a saved schedule (requires confirmation).
    Delete {
        /// Saved schedule id
        #[arg(value_name = "ID")]
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List saved schedules.
    Saved,
    /// Browse the commission datasets.
    ///
    /// Without arguments lists the datasets; with a dataset lists its
    /// commissions; with `--commission` shows that commission's timetable.
    Browse {
        /// Dataset label (file stem, e.g. `3ro`)
        #[arg(value_name = "DATASET")]
        dataset: Option<String>,
        /// Commission code inside the dataset
        #[arg(short, long, value_name = "COMMISSION")]
        commission: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Track course statuses and grades.
    Progress {
        #[command(subcommand)]
        subcommand: ProgressSubcommand,
    },
    /// Manage the electives that count toward progress.
    Electives {
        #[command(subcommand)]
        subcommand: ElectivesSubcommand,
    },
    /// Build a weekly schedule from the commission datasets.
    Schedule {
        #[command(subcommand)]
        subcommand: ScheduleSubcommand,
    },
    /// Generate a progress and schedule report.
    Report {
        /// Output file path (optional; defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "correlativas",
    about = "Academic progress and class schedule planner",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the state directory
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the course catalog file
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Override the commission datasets directory
    #[arg(long = "commissions-dir", value_name = "DIR")]
    pub commissions_dir: Option<PathBuf>,

    /// Override the reports output directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: None,
            verbose: self.config_verbose,
            data_dir: path_string(self.data_dir.as_ref()),
            catalog_file: path_string(self.catalog.as_ref()),
            commissions_dir: path_string(self.commissions_dir.as_ref()),
            reports_dir: path_string(self.reports_dir.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::parse_from([
            "correlativas",
            "--data-dir",
            "/tmp/state",
            "--config-level",
            "info",
            "progress",
            "stats",
        ]);
        let overrides = cli.to_config_overrides();

        assert_eq!(overrides.data_dir.as_deref(), Some("/tmp/state"));
        assert_eq!(overrides.level.as_deref(), Some("info"));
        assert!(overrides.catalog_file.is_none());
    }

    #[test]
    fn test_confirmation_flags_parse() {
        let cli = Cli::parse_from(["correlativas", "schedule", "delete", "1700000000000", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Schedule {
                subcommand: ScheduleSubcommand::Delete { id: 1_700_000_000_000, yes: true }
            }
        ));

        let cli = Cli::parse_from(["correlativas", "electives", "remove", "101"]);
        assert!(matches!(
            cli.command,
            Command::Electives {
                subcommand: ElectivesSubcommand::Remove { id: 101, yes: false }
            }
        ));
    }

    #[test]
    fn test_schedule_show_day_filter() {
        let cli = Cli::parse_from(["correlativas", "schedule", "show", "-s", "2", "--day", "lunes"]);
        match cli.command {
            Command::Schedule {
                subcommand: ScheduleSubcommand::Show { semester, day, .. },
            } => {
                assert_eq!(semester.as_deref(), Some("2"));
                assert_eq!(day.as_deref(), Some("lunes"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_progress_set_parses() {
        let cli = Cli::parse_from(["correlativas", "progress", "set", "15", "regularized"]);
        match cli.command {
            Command::Progress {
                subcommand: ProgressSubcommand::Set { id, status },
            } => {
                assert_eq!(id, 15);
                assert_eq!(status, "regularized");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
