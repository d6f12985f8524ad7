//! Core CLI types - Cli, Command, and argument structs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::ConfigOverrides;

/// pggan: configuration tooling for progressive-growing GAN training
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "pggan")]
#[command(version)]
#[command(
    about = "Validate, inspect and plan progressive-growing GAN training configurations"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate a training configuration
    Validate(ValidateArgs),

    /// Display a training configuration
    Info(InfoArgs),

    /// Write a commented configuration template
    Init(InitArgs),

    /// Show the progressive-growing schedule
    Schedule(ScheduleArgs),

    /// Show the generator and discriminator layer plan
    Arch(ArchArgs),

    /// Resolve checkpoint resume pointers
    Resume(ResumeArgs),

    /// Validate a sampling configuration
    Sample(SampleArgs),
}

/// Overrides shared by every command that loads a training config
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct OverrideArgs {
    /// Override batch_per_gpu
    #[arg(long)]
    pub batch_per_gpu: Option<usize>,

    /// Override max_step
    #[arg(long)]
    pub max_step: Option<u64>,

    /// Override lr_G
    #[arg(long = "lr-g")]
    pub lr_g: Option<f64>,

    /// Override lr_D
    #[arg(long = "lr-d")]
    pub lr_d: Option<f64>,

    /// Override ckpt_id
    #[arg(long)]
    pub ckpt_id: Option<String>,

    /// Override ckpt_step
    #[arg(long)]
    pub ckpt_step: Option<u64>,

    /// Replace dataset_root_list (repeatable)
    #[arg(long = "dataset-root", value_name = "PATH")]
    pub dataset_roots: Vec<PathBuf>,
}

impl From<&OverrideArgs> for ConfigOverrides {
    fn from(args: &OverrideArgs) -> Self {
        Self {
            batch_per_gpu: args.batch_per_gpu,
            max_step: args.max_step,
            lr_g: args.lr_g,
            lr_d: args.lr_d,
            ckpt_id: args.ckpt_id.clone(),
            ckpt_step: args.ckpt_step,
            dataset_roots: args.dataset_roots.clone(),
        }
    }
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed configuration summary
    #[arg(short, long)]
    pub detailed: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the init command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Run name
    #[arg(long, default_value = "pggan")]
    pub model_id: String,

    /// Dataset image folder (repeatable)
    #[arg(long = "dataset-root", value_name = "PATH")]
    pub dataset_roots: Vec<PathBuf>,

    /// Output path (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the schedule command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ScheduleArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Report the stage and alpha at this global step
    #[arg(long, value_name = "STEP")]
    pub at: Option<u64>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the arch command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ArchArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Stage to plan for (defaults to the final stage)
    #[arg(long)]
    pub stage: Option<usize>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the resume command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ResumeArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Fail if the referenced checkpoint files are missing
    #[arg(long)]
    pub check: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the sample command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SampleArgs {
    /// Path to YAML sampling configuration
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Fail if ckpt_path does not exist
    #[arg(long)]
    pub check: bool,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
