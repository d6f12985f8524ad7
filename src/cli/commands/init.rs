//! Init command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{default_template, InitArgs};

pub fn run_init(args: InitArgs, level: LogLevel) -> Result<(), String> {
    let yaml = default_template(&args.model_id, &args.dataset_roots)
        .map_err(|e| format!("Template error: {e}"))?;

    match &args.output {
        Some(path) => {
            if path.exists() && !args.force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
            }
            std::fs::write(path, &yaml).map_err(|e| format!("Failed to write file: {e}"))?;
            log(
                level,
                LogLevel::Normal,
                &format!("Created {}", path.display()),
            );
        }
        None => println!("{yaml}"),
    }

    if args.dataset_roots.is_empty() {
        log(
            level,
            LogLevel::Normal,
            "Note: replace the /path/to/images placeholder in dataset_root_list before training",
        );
    }

    Ok(())
}
