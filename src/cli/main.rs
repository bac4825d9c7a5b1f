//! Command-line interface entry point for `correlativas`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::Workspace;
use correlativas::config::Config;
use correlativas::info;
use correlativas::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());
    init_logging(&args, &config);

    if let Command::Config { subcommand } = args.command {
        commands::config::run(subcommand, &mut config, &defaults);
        return;
    }

    let workspace = Workspace::open_or_exit(&config);
    match args.command {
        Command::Config { .. } => {}
        Command::Progress { subcommand } => commands::progress::run(subcommand, &workspace),
        Command::Electives { subcommand } => commands::electives::run(subcommand, &workspace),
        Command::Schedule { subcommand } => commands::schedule::run(subcommand, &workspace),
        Command::Report { output, format } => {
            commands::report::run(&workspace, output.as_deref(), &format, &config);
        }
    }
}

/// Apply level, debug, verbose and file logging from flags, then config
fn init_logging(args: &Cli, config: &Config) {
    // --log-level beats [logging] level; warn when neither parses
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }
    set_level(level);

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }

    let log_path = args.log_file.clone().or_else(|| {
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file))
    });
    let Some(log_path) = log_path else {
        return;
    };

    if !init_file_logging(&log_path) {
        eprintln!("✗ Failed to initialize file logging at: {}", log_path.display());
    } else if verbose {
        eprintln!("✓ File logging initialized at: {}", log_path.display());
    } else {
        info!("File logging initialized at: {}", log_path.display());
    }
}
