//! Sample command implementation

use crate::arch::{GeneratorPlan, ProgressiveNet};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_sample_config, SampleArgs};

pub fn run_sample(args: SampleArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating sampling config: {}", args.config.display()),
    );

    let spec = load_sample_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    let generator =
        GeneratorPlan::for_sampling(&spec).map_err(|e| format!("Generator error: {e}"))?;

    if args.check && !spec.ckpt_path.is_file() {
        return Err(format!(
            "Checkpoint error: {} not found",
            spec.ckpt_path.display()
        ));
    }

    log(level, LogLevel::Normal, "Sampling configuration is valid");
    let (h, w) = generator.output_size();
    println!("  Checkpoint: {}", spec.ckpt_path.display());
    println!("  Samples: {} on GPU {}", spec.n_samples, spec.gpu);
    println!("  Output: {}", spec.save_path.display());
    println!("  Image size: {h}x{w}");
    println!("  Generator parameters: {}", generator.parameter_count());

    Ok(())
}
