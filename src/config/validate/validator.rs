//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::{SampleSpec, TrainSpec, MAX_STAGES};

/// Validate a training specification
///
/// Checks:
/// - Identity and dataset roots are present
/// - Numeric values are in valid ranges
/// - Per-stage lists line up with `depths`
/// - Every fade-in finishes inside its stage
/// - Resume pointers are consistent
///
/// A `max_step` below the summed stage budgets is legal (the run stops
/// early) and only logged.
pub fn validate_config(spec: &TrainSpec) -> Result<(), ValidationError> {
    if spec.model_id.trim().is_empty() {
        return Err(ValidationError::EmptyModelId);
    }

    if spec.dataset_root_list.is_empty() {
        return Err(ValidationError::EmptyDatasetRoots);
    }
    if let Some(idx) = spec
        .dataset_root_list
        .iter()
        .position(|root| root.as_os_str().is_empty())
    {
        return Err(ValidationError::EmptyDatasetRoot(idx));
    }

    for (name, value) in [("lr_G", spec.lr_g), ("lr_D", spec.lr_d)] {
        if !(value > 0.0 && value <= 1.0) {
            return Err(ValidationError::InvalidLearningRate { name, value });
        }
    }
    for (name, value) in [("beta1", spec.beta1), ("beta2", spec.beta2)] {
        if !(0.0..1.0).contains(&value) {
            return Err(ValidationError::InvalidBeta { name, value });
        }
    }

    for (name, value) in [
        ("W_adv", spec.w_adv),
        ("W_gp", spec.w_gp),
        ("W_drift_D", spec.w_drift_d),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidLossWeight { name, value });
        }
    }

    if spec.batch_per_gpu == 0 {
        return Err(ValidationError::InvalidBatchSize(spec.batch_per_gpu));
    }
    if spec.max_step == 0 {
        return Err(ValidationError::InvalidMaxStep(spec.max_step));
    }
    for (name, value) in [
        ("loss_cycle", spec.loss_cycle),
        ("test_cycle", spec.test_cycle),
        ("ckpt_cycle", spec.ckpt_cycle),
    ] {
        if value == 0 {
            return Err(ValidationError::InvalidCycle(name));
        }
    }

    for (name, value) in [
        ("latent_dim", spec.latent_dim),
        ("input_dim", spec.input_dim),
        ("output_dim", spec.output_dim),
        ("decision_layer_size", spec.decision_layer_size),
    ] {
        if value == 0 {
            return Err(ValidationError::InvalidDimension(name));
        }
    }

    validate_depths(&spec.depths)?;
    let stages = spec.depths.len();
    if spec.max_depths != stages {
        return Err(ValidationError::StageCountMismatch {
            max_depths: spec.max_depths,
            stages,
        });
    }

    for (field, list) in [
        ("max_step_at_scale", &spec.max_step_at_scale),
        ("alpha_jump_start", &spec.alpha_jump_start),
        ("alpha_jump_interval", &spec.alpha_jump_interval),
        ("alpha_jump_Ntimes", &spec.alpha_jump_ntimes),
    ] {
        if list.len() != stages {
            return Err(ValidationError::ScheduleLengthMismatch {
                field,
                expected: stages,
                actual: list.len(),
            });
        }
    }

    if let Some(idx) = spec.max_step_at_scale.iter().position(|&s| s == 0) {
        return Err(ValidationError::ZeroStageSteps(idx));
    }
    let Some(scheduled) = spec.scheduled_steps() else {
        return Err(ValidationError::ScheduleOverflow);
    };

    validate_fades(spec)?;

    if !(0.0..=1.0).contains(&spec.alpha) {
        return Err(ValidationError::InvalidAlpha(spec.alpha));
    }
    validate_slope(spec.lrelu_slope)?;

    match (&spec.ckpt_id, spec.ckpt_step) {
        (None, Some(step)) => return Err(ValidationError::OrphanCheckpointStep(step)),
        (Some(id), _) if id.trim().is_empty() => return Err(ValidationError::EmptyCheckpointId),
        _ => {}
    }

    if spec.max_step < scheduled {
        tracing::warn!(
            max_step = spec.max_step,
            scheduled,
            "max_step stops the run before the last stage budget is spent"
        );
    }

    Ok(())
}

fn validate_depths(depths: &[usize]) -> Result<(), ValidationError> {
    if depths.is_empty() {
        return Err(ValidationError::EmptyDepths);
    }
    if depths.len() > MAX_STAGES {
        return Err(ValidationError::TooManyStages {
            stages: depths.len(),
            max: MAX_STAGES,
        });
    }
    if let Some(idx) = depths.iter().position(|&d| d == 0) {
        return Err(ValidationError::ZeroDepth(idx));
    }
    Ok(())
}

fn validate_slope(slope: f64) -> Result<(), ValidationError> {
    if !(0.0..1.0).contains(&slope) {
        return Err(ValidationError::InvalidSlope(slope));
    }
    Ok(())
}

// Lengths are already checked, so the lists index in lockstep.
fn validate_fades(spec: &TrainSpec) -> Result<(), ValidationError> {
    if spec.alpha_jump_ntimes[0] != 0 {
        return Err(ValidationError::FirstStageFade(spec.alpha_jump_ntimes[0]));
    }

    for stage in 1..spec.depths.len() {
        let n_jumps = spec.alpha_jump_ntimes[stage];
        if n_jumps == 0 {
            continue;
        }
        let interval = spec.alpha_jump_interval[stage];
        if interval == 0 {
            return Err(ValidationError::ZeroFadeInterval(stage));
        }
        let fade_end = spec.alpha_jump_start[stage]
            .saturating_add(n_jumps.saturating_mul(interval));
        let budget = spec.max_step_at_scale[stage];
        if fade_end > budget {
            return Err(ValidationError::FadeExceedsStage {
                stage,
                fade_end,
                budget,
            });
        }
    }
    Ok(())
}

/// Validate a sampling specification
pub fn validate_sample_config(spec: &SampleSpec) -> Result<(), ValidationError> {
    if spec.ckpt_path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyCheckpointPath);
    }
    if spec.n_samples == 0 {
        return Err(ValidationError::InvalidSampleCount(spec.n_samples));
    }
    for (name, value) in [
        ("latent_dim", spec.latent_dim),
        ("input_dim", spec.input_dim),
        ("output_dim", spec.output_dim),
    ] {
        if value == 0 {
            return Err(ValidationError::InvalidDimension(name));
        }
    }
    validate_depths(&spec.depths)?;
    validate_slope(spec.lrelu_slope)
}
