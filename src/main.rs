//! pggan CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate config
//! pggan validate run.yaml
//!
//! # Where is the run at step 150k?
//! pggan schedule run.yaml --at 150000
//!
//! # Layer plan of the final generator and discriminator
//! pggan arch run.yaml
//!
//! # Check the checkpoint a resume points at
//! pggan resume run.yaml --check
//! ```

use clap::Parser;
use pggan::cli::{init_tracing, run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
