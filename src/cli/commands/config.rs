//! Config command handler
//!
//! Edits are written back to the config file immediately.

use super::{confirm, fail};
use crate::args::ConfigSubcommand;
use correlativas::config::Config;

/// Dispatch config subcommands; no subcommand prints everything
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand.unwrap_or(ConfigSubcommand::Get { key: None }) {
        ConfigSubcommand::Get { key: None } => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
            println!("\nConfig file: {}", Config::get_config_file_path().display());
        }
        ConfigSubcommand::Get { key: Some(key) } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => fail(&format!("Unknown config key: '{key}'")),
        },
        ConfigSubcommand::Set { key, value } => {
            config.set(&key, &value).unwrap_or_else(|e| fail(&e));
            persist(config);
            println!("✓ Set {key} = {value}");
        }
        ConfigSubcommand::Unset { key } => {
            config.unset(&key, defaults).unwrap_or_else(|e| fail(&e));
            persist(config);
            println!("✓ Reset {key} to default");
        }
        ConfigSubcommand::Reset { yes } => reset(yes),
    }
}

fn persist(config: &Config) {
    if let Err(e) = config.save() {
        fail(&format!("Failed to save config: {e}"));
    }
}

fn reset(yes: bool) {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }
    if !confirm("Reset the configuration to defaults?", yes) {
        println!("✗ Reset cancelled");
        return;
    }
    match Config::reset() {
        Ok(()) => println!("✓ Config reset to defaults"),
        Err(e) => fail(&format!("Failed to remove config file: {e}")),
    }
}
