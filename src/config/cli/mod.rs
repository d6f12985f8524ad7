//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! pggan validate run.yaml --detailed
//! pggan info run.yaml --format json
//! pggan init --model-id ffhq --dataset-root /data/ffhq -o ffhq.yaml
//! pggan schedule run.yaml --at 150000
//! pggan arch run.yaml --stage 4
//! pggan resume run.yaml --ckpt-id ffhq --check
//! pggan sample sample.yaml
//! ```

mod core;
mod types;

pub use self::core::{
    parse_args, ArchArgs, Cli, Command, InfoArgs, InitArgs, OverrideArgs, ResumeArgs,
    SampleArgs, ScheduleArgs, ValidateArgs,
};
pub use types::OutputFormat;
