//! Declarative configuration for progressive-growing GAN training
//!
//! A training run is described by one flat YAML document ([`TrainSpec`]);
//! drawing samples from a trained generator by another ([`SampleSpec`]).

pub mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{
    parse_args, ArchArgs, Cli, Command, InfoArgs, InitArgs, OutputFormat, OverrideArgs,
    ResumeArgs, SampleArgs, ScheduleArgs, ValidateArgs,
};
pub use loader::{
    apply_overrides, default_template, load_config, load_sample_config, parse_config,
    save_config, ConfigOverrides,
};
pub use schema::{stage_resolution, GeneratorActivation, SampleSpec, TrainSpec, MAX_STAGES};
pub use validate::{validate_config, validate_sample_config, ValidationError};
