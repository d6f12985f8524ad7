//! Validate command implementation

use super::load_with_overrides;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{TrainSpec, ValidateArgs};
use crate::schedule::ProgressiveSchedule;

/// Format identity and dataset settings as a string
pub fn format_identity_info(spec: &TrainSpec) -> String {
    let mut lines = vec![
        format!("  Model id: {}", spec.model_id),
        format!("  Save root: {}", spec.save_root.display()),
        format!("  Multi-GPU: {}", spec.use_mgpu),
        format!("  W&B tracking: {}", spec.use_wandb),
        "  Dataset roots:".to_string(),
    ];
    lines.extend(
        spec.dataset_root_list
            .iter()
            .map(|root| format!("    {}", root.display())),
    );
    lines.join("\n")
}

/// Format optimizer and loss settings as a string
pub fn format_optimizer_info(spec: &TrainSpec) -> String {
    [
        format!("  lr_G: {}  lr_D: {}", spec.lr_g, spec.lr_d),
        format!("  Adam betas: ({}, {})", spec.beta1, spec.beta2),
        format!(
            "  Loss weights: adv={} gp={} drift_D={}",
            spec.w_adv, spec.w_gp, spec.w_drift_d
        ),
        format!("  Batch per GPU: {}", spec.batch_per_gpu),
    ]
    .join("\n")
}

/// Format architecture settings as a string
pub fn format_arch_info(spec: &TrainSpec) -> String {
    let mut lines = vec![
        format!("  Latent dim: {}", spec.latent_dim),
        format!("  Depths: {:?}", spec.depths),
        format!(
            "  Final resolution: {0}x{0}",
            spec.final_resolution()
        ),
        format!("  LReLU slope: {}", spec.lrelu_slope),
    ];
    let mut norms = Vec::new();
    if spec.apply_pixel_norm {
        norms.push("pixel");
    }
    if spec.apply_minibatch_norm {
        norms.push("minibatch-std");
    }
    if spec.equalized_lr {
        norms.push("equalized-lr");
    }
    if !norms.is_empty() {
        lines.push(format!("  Normalization: {}", norms.join(", ")));
    }
    if let Some(act) = spec.generator_last_activation {
        lines.push(format!("  Generator output activation: {act}"));
    }
    lines.join("\n")
}

/// Format the step budget as a string
pub fn format_schedule_info(spec: &TrainSpec) -> String {
    let schedule = ProgressiveSchedule::from_spec(spec);
    let mut lines = vec![
        format!("  Stages: {}", schedule.len()),
        format!("  Scheduled steps: {}", schedule.scheduled_steps()),
        format!("  max_step: {}", spec.max_step),
    ];
    let truncated: Vec<String> = schedule
        .truncated_stages()
        .map(|s| s.index.to_string())
        .collect();
    if !truncated.is_empty() {
        lines.push(format!(
            "  Stages cut short by max_step: {}",
            truncated.join(", ")
        ));
    }
    lines.push(format!(
        "  Log every {} / sample every {} / checkpoint every {} steps",
        spec.loss_cycle, spec.test_cycle, spec.ckpt_cycle
    ));
    lines.join("\n")
}

/// Format resume pointers as a string
pub fn format_resume_info(spec: &TrainSpec) -> Option<String> {
    spec.ckpt_id.as_ref().map(|id| {
        let step = spec
            .ckpt_step
            .map_or_else(|| "latest".to_string(), |s| s.to_string());
        format!("  Resume: {id} @ {step}")
    })
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &TrainSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_identity_info(spec));
    println!();
    println!("{}", format_optimizer_info(spec));
    println!();
    println!("{}", format_arch_info(spec));
    println!();
    println!("{}", format_schedule_info(spec));

    if let Some(resume) = format_resume_info(spec) {
        println!();
        println!("{resume}");
    }
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_with_overrides(&args.config, &args.overrides)?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&spec);
    }

    Ok(())
}
