//! Info command implementation

use super::{load_with_overrides, print_json, print_yaml};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{InfoArgs, OutputFormat};

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_with_overrides(&args.config, &args.overrides)?;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            println!("Model id: {}", spec.model_id);
            println!("Datasets: {}", spec.dataset_root_list.len());
            println!(
                "Resolution: {0}x{0} over {1} stages",
                spec.final_resolution(),
                spec.stage_count()
            );
            println!("Latent dim: {}", spec.latent_dim);
            println!("lr_G: {}  lr_D: {}", spec.lr_g, spec.lr_d);
            println!("Batch per GPU: {}", spec.batch_per_gpu);
            println!("Max step: {}", spec.max_step);

            if spec.use_mgpu {
                println!("Multi-GPU: enabled");
            }
            if spec.is_resume() {
                println!("Resume: enabled");
            }
        }
        OutputFormat::Json => print_json(&spec)?,
        OutputFormat::Yaml => print_yaml(&spec)?,
    }

    Ok(())
}
