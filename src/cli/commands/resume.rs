//! Resume command implementation

use super::load_with_overrides;
use crate::checkpoint::{ResolvedCheckpoint, ResumePoint, ResumeState};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::ResumeArgs;
use crate::schedule::ProgressiveSchedule;

pub fn format_resume_state(state: &ResumeState) -> String {
    match &state.position {
        Some(p) => format!(
            "  Continues at step {} in stage {} ({}x{}), alpha {:.4}",
            state.step, p.stage, p.resolution, p.resolution, p.alpha
        ),
        None => format!(
            "  Step {} is past the end of the schedule; nothing left to train",
            state.step
        ),
    }
}

fn print_resolved(resolved: &ResolvedCheckpoint) {
    println!("  Run dir: {}", resolved.layout.run_dir().display());
    println!("  Step: {}", resolved.step);
    println!("  Generator: {}", resolved.generator.display());
    println!("  Discriminator: {}", resolved.discriminator.display());
}

pub fn run_resume(args: ResumeArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_with_overrides(&args.config, &args.overrides)?;

    let Some(point) = ResumePoint::from_spec(&spec) else {
        log(
            level,
            LogLevel::Normal,
            "No ckpt_id set: training starts fresh at step 0",
        );
        return Ok(());
    };

    let resolved = point.resolve(&spec.save_root);
    log(
        level,
        LogLevel::Normal,
        &format!("Resuming {} @ {}:", point.run_id, point.step),
    );
    print_resolved(&resolved);

    if args.check {
        resolved
            .verify()
            .map_err(|e| format!("Checkpoint error: {e}"))?;
        log(level, LogLevel::Normal, "  Checkpoint files present");
    }

    let step = resolved
        .resume_step()
        .map_err(|e| format!("Checkpoint error: {e}"))?;
    match step {
        Some(step) => {
            let schedule = ProgressiveSchedule::from_spec(&spec);
            println!("{}", format_resume_state(&ResumeState::at(&schedule, step)));
        }
        None => log(
            level,
            LogLevel::Verbose,
            "  No numbered checkpoints on disk; step is read from G_latest.pt at load time",
        ),
    }

    Ok(())
}
