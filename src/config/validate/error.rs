//! Validation error types
//!
//! One variant per rule, each naming the offending value and what is accepted.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("model_id cannot be empty")]
    EmptyModelId,

    #[error("dataset_root_list cannot be empty")]
    EmptyDatasetRoots,

    #[error("dataset_root_list[{0}] is an empty path")]
    EmptyDatasetRoot(usize),

    #[error("Invalid {name}: {value} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate { name: &'static str, value: f64 },

    #[error("Invalid {name}: {value} (must be in [0.0, 1.0))")]
    InvalidBeta { name: &'static str, value: f64 },

    #[error("Invalid loss weight {name}: {value} (must be finite and >= 0.0)")]
    InvalidLossWeight { name: &'static str, value: f64 },

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid max_step: {0} (must be > 0)")]
    InvalidMaxStep(u64),

    #[error("Invalid {0}: must be > 0")]
    InvalidCycle(&'static str),

    #[error("Invalid {0}: must be > 0")]
    InvalidDimension(&'static str),

    #[error("depths cannot be empty")]
    EmptyDepths,

    #[error("depths[{0}] is 0 (every stage needs at least one channel)")]
    ZeroDepth(usize),

    #[error("depths has {stages} entries, at most {max} stages are supported")]
    TooManyStages { stages: usize, max: usize },

    #[error("max_depths is {max_depths} but depths has {stages} entries")]
    StageCountMismatch { max_depths: usize, stages: usize },

    #[error("{field} has {actual} entries, expected one per stage ({expected})")]
    ScheduleLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("max_step_at_scale[{0}] is 0 (every stage needs at least one step)")]
    ZeroStageSteps(usize),

    #[error("max_step_at_scale sums to more than {} steps", u64::MAX)]
    ScheduleOverflow,

    #[error("stage 0 cannot fade in: alpha_jump_Ntimes[0] is {0}, must be 0")]
    FirstStageFade(u64),

    #[error("stage {0} fades in with alpha_jump_interval 0")]
    ZeroFadeInterval(usize),

    #[error("stage {stage} fade ends at local step {fade_end}, after the stage budget of {budget}")]
    FadeExceedsStage {
        stage: usize,
        fade_end: u64,
        budget: u64,
    },

    #[error("Invalid alpha: {0} (must be in [0.0, 1.0])")]
    InvalidAlpha(f64),

    #[error("Invalid LReLU_slope: {0} (must be in [0.0, 1.0))")]
    InvalidSlope(f64),

    #[error("ckpt_step {0} is set but ckpt_id is null")]
    OrphanCheckpointStep(u64),

    #[error("ckpt_id cannot be an empty string (use null to start fresh)")]
    EmptyCheckpointId,

    #[error("Invalid n_samples: {0} (must be > 0)")]
    InvalidSampleCount(usize),

    #[error("ckpt_path cannot be empty")]
    EmptyCheckpointPath,
}
