//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;
use std::path::PathBuf;

/// Valid specs with 1..=9 stages and fades that always fit their stage
fn arb_valid_spec() -> impl Strategy<Value = TrainSpec> {
    (1usize..=9)
        .prop_flat_map(|stages| {
            (
                proptest::collection::vec(1usize..=512, stages),
                proptest::collection::vec((0u64..1000, 1u64..64, 0u64..800), stages),
                1usize..64,
                1e-6f64..1.0,
                1e-6f64..1.0,
            )
        })
        .prop_map(|(depths, fades, batch_per_gpu, lr_g, lr_d)| {
            let stages = depths.len();
            let mut spec = TrainSpec::new("prop", vec![PathBuf::from("/data")]);
            spec.depths = depths;
            spec.max_depths = stages;
            spec.batch_per_gpu = batch_per_gpu;
            spec.lr_g = lr_g;
            spec.lr_d = lr_d;
            spec.alpha_jump_start = fades.iter().map(|f| f.0).collect();
            spec.alpha_jump_interval = fades.iter().map(|f| f.1).collect();
            spec.alpha_jump_ntimes = fades.iter().map(|f| f.2).collect();
            spec.alpha_jump_ntimes[0] = 0;
            spec.max_step_at_scale = fades
                .iter()
                .map(|(start, interval, n)| start + interval * n + 1)
                .collect();
            spec
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.batch_per_gpu = 0;
        prop_assert_eq!(validate_config(&spec), Err(ValidationError::InvalidBatchSize(0)));
    }

    #[test]
    fn prop_lr_above_one_fails(spec in arb_valid_spec(), high_lr in 1.01f64..10.0) {
        let mut spec = spec;
        spec.lr_g = high_lr;
        let is_lr_error = matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidLearningRate { .. })
        );
        prop_assert!(is_lr_error);
    }

    #[test]
    fn prop_extra_schedule_entry_fails(spec in arb_valid_spec(), extra in 1u64..100_000) {
        let mut spec = spec;
        spec.max_step_at_scale.push(extra);
        let expected = spec.depths.len();
        prop_assert_eq!(
            validate_config(&spec),
            Err(ValidationError::ScheduleLengthMismatch {
                field: "max_step_at_scale",
                expected,
                actual: expected + 1,
            })
        );
    }

    #[test]
    fn prop_shrunk_stage_budget_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        // Find a fading stage and cut its budget below the fade end.
        let fading = (1..spec.depths.len()).find(|&s| spec.alpha_jump_ntimes[s] > 0);
        if let Some(stage) = fading {
            let fade_end = spec.alpha_jump_start[stage]
                + spec.alpha_jump_interval[stage] * spec.alpha_jump_ntimes[stage];
            spec.max_step_at_scale[stage] = fade_end - 1;
            let is_fade_error = matches!(
                validate_config(&spec),
                Err(ValidationError::FadeExceedsStage { .. } | ValidationError::ZeroStageSteps(_))
            );
            prop_assert!(is_fade_error);
        }
    }

    #[test]
    fn prop_orphan_step_fails(spec in arb_valid_spec(), step in 0u64..10_000_000) {
        let mut spec = spec;
        spec.ckpt_id = None;
        spec.ckpt_step = Some(step);
        prop_assert_eq!(validate_config(&spec), Err(ValidationError::OrphanCheckpointStep(step)));
    }
}
