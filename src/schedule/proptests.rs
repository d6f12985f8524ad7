//! Property-based tests for the progressive schedule

use super::*;
use crate::config::TrainSpec;
use proptest::prelude::*;
use std::path::PathBuf;

fn arb_schedule() -> impl Strategy<Value = ProgressiveSchedule> {
    proptest::collection::vec((1u64..5000, 0u64..100, 1u64..20, 0u64..50), 1..9).prop_map(
        |stages| {
            let mut spec = TrainSpec::new("prop", vec![PathBuf::from("/data")]);
            spec.depths = vec![32; stages.len()];
            spec.max_depths = stages.len();
            spec.max_step_at_scale = stages.iter().map(|s| s.0).collect();
            spec.alpha_jump_start = stages.iter().map(|s| s.1).collect();
            spec.alpha_jump_interval = stages.iter().map(|s| s.2).collect();
            spec.alpha_jump_ntimes = stages.iter().map(|s| s.3).collect();
            ProgressiveSchedule::from_spec(&spec)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_stages_are_contiguous(schedule in arb_schedule()) {
        let stages = schedule.stages();
        prop_assert_eq!(stages[0].start_step, 0);
        for pair in stages.windows(2) {
            prop_assert_eq!(pair[0].end_step, pair[1].start_step);
        }
        let total: u64 = stages.iter().map(|s| s.steps).sum();
        prop_assert_eq!(schedule.scheduled_steps(), total);
    }

    #[test]
    fn prop_alpha_in_unit_interval(schedule in arb_schedule(), frac in 0.0f64..1.0) {
        let step = (schedule.total_steps() as f64 * frac) as u64;
        if let Some(p) = schedule.position(step) {
            prop_assert!((0.0..=1.0).contains(&p.alpha));
        }
    }

    #[test]
    fn prop_alpha_non_increasing_within_stage(
        start in 0u64..200,
        interval in 1u64..50,
        n_jumps in 1u64..100,
        t in 0u64..10_000,
    ) {
        let fade = AlphaFade::new(start, interval, n_jumps, 0.0);
        prop_assert!(fade.alpha_at(t + 1) <= fade.alpha_at(t));
    }

    #[test]
    fn prop_position_matches_stage(schedule in arb_schedule(), frac in 0.0f64..1.0) {
        let step = (schedule.total_steps() as f64 * frac) as u64;
        if let Some(p) = schedule.position(step) {
            let stage = schedule.stage(p.stage).unwrap();
            prop_assert!(stage.contains(step));
            prop_assert_eq!(p.resolution, 4usize << p.stage);
        }
    }
}
