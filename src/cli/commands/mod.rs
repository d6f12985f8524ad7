//! CLI command implementations

mod arch;
mod info;
mod init;
mod resume;
mod sample;
mod schedule;
mod validate;

use crate::cli::LogLevel;
use crate::config::{
    apply_overrides, load_config, Cli, Command, ConfigOverrides, OverrideArgs, TrainSpec,
};
use std::path::Path;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
        Command::Init(args) => init::run_init(args, log_level),
        Command::Schedule(args) => schedule::run_schedule(args, log_level),
        Command::Arch(args) => arch::run_arch(args, log_level),
        Command::Resume(args) => resume::run_resume(args, log_level),
        Command::Sample(args) => sample::run_sample(args, log_level),
    }
}

/// Load a training config and apply command-line overrides
fn load_with_overrides(path: &Path, overrides: &OverrideArgs) -> Result<TrainSpec, String> {
    let mut spec = load_config(path).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &ConfigOverrides::from(overrides))
        .map_err(|e| format!("Override error: {e}"))?;
    Ok(spec)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    println!("{json}");
    Ok(())
}

fn print_yaml<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let yaml =
        serde_yaml::to_string(value).map_err(|e| format!("YAML serialization error: {e}"))?;
    println!("{yaml}");
    Ok(())
}

#[cfg(test)]
mod tests;
