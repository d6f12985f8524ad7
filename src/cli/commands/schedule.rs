//! Schedule command implementation

use super::{load_with_overrides, print_json, print_yaml};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{OutputFormat, ScheduleArgs};
use crate::schedule::{ProgressiveSchedule, SchedulePosition, StagePlan};

/// One row of the stage table
pub fn format_stage_row(stage: &StagePlan, total_steps: u64) -> String {
    let fade = match stage.fade.end() {
        Some(end) => format!(
            "{}..{} ({} x {})",
            stage.fade.start, end, stage.fade.n_jumps, stage.fade.interval
        ),
        None => format!("none (alpha={})", stage.fade.resting),
    };
    let cut = if stage.end_step > total_steps {
        "  [cut by max_step]"
    } else {
        ""
    };
    format!(
        "  {:>2}  {:>5}  {:>4}  {:>9}  {:>9}..{:<9}  {}{}",
        stage.index,
        format!("{0}x{0}", stage.resolution),
        stage.depth,
        stage.steps,
        stage.start_step,
        stage.end_step,
        fade,
        cut
    )
}

pub fn format_position(position: &SchedulePosition) -> String {
    format!(
        "Step {}: stage {} ({}x{}, depth {}), local step {}, alpha {:.4}",
        position.step,
        position.stage,
        position.resolution,
        position.resolution,
        position.depth,
        position.local_step,
        position.alpha
    )
}

pub fn run_schedule(args: ScheduleArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_with_overrides(&args.config, &args.overrides)?;
    let schedule = ProgressiveSchedule::from_spec(&spec);

    if let Some(step) = args.at {
        let position = schedule.position(step).ok_or_else(|| {
            format!(
                "Step {step} is past the end of the run ({} steps)",
                schedule.total_steps()
            )
        })?;
        return match args.format {
            OutputFormat::Text => {
                println!("{}", format_position(&position));
                Ok(())
            }
            OutputFormat::Json => print_json(&position),
            OutputFormat::Yaml => print_yaml(&position),
        };
    }

    match args.format {
        OutputFormat::Text => {
            log(
                level,
                LogLevel::Normal,
                &format!("Progressive schedule for {}:", spec.model_id),
            );
            println!();
            println!(
                "  {:>2}  {:>5}  {:>4}  {:>9}  {:>20}  fade",
                "#", "res", "ch", "steps", "global steps"
            );
            let total = schedule.total_steps();
            for stage in schedule.stages() {
                println!("{}", format_stage_row(stage, total));
            }
            println!();
            println!(
                "Total: {} steps (scheduled {}, max_step {})",
                total,
                schedule.scheduled_steps(),
                spec.max_step
            );
        }
        OutputFormat::Json => print_json(&schedule)?,
        OutputFormat::Yaml => print_yaml(&schedule)?,
    }

    Ok(())
}
