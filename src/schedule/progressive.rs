//! Stage boundaries over a whole training run

use super::{AlphaFade, AlphaScheduler};
use crate::config::{stage_resolution, TrainSpec};
use serde::Serialize;

/// One resolution stage of the run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagePlan {
    pub index: usize,
    /// Channel depth of the block added for this stage
    pub depth: usize,
    /// Image side length, `4 * 2^index`
    pub resolution: usize,
    /// Step budget for this stage
    pub steps: u64,
    /// First global step of the stage
    pub start_step: u64,
    /// One past the last global step of the stage
    pub end_step: u64,
    pub fade: AlphaFade,
}

impl StagePlan {
    pub fn contains(&self, step: u64) -> bool {
        (self.start_step..self.end_step).contains(&step)
    }
}

/// Where the run is at a given global step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SchedulePosition {
    pub step: u64,
    pub stage: usize,
    pub local_step: u64,
    pub alpha: f64,
    pub resolution: usize,
    pub depth: usize,
}

/// Precomputed progressive-growing schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressiveSchedule {
    stages: Vec<StagePlan>,
    max_step: u64,
}

impl ProgressiveSchedule {
    /// Build the schedule from a spec
    ///
    /// Expects a validated spec; missing per-stage entries count as zero and
    /// stage boundaries saturate at `u64::MAX`.
    pub fn from_spec(spec: &TrainSpec) -> Self {
        fn entry(list: &[u64], i: usize) -> u64 {
            list.get(i).copied().unwrap_or(0)
        }

        let mut start_step = 0u64;
        let stages = spec
            .depths
            .iter()
            .enumerate()
            .map(|(index, &depth)| {
                let steps = entry(&spec.max_step_at_scale, index);
                let fade = if index == 0 {
                    AlphaFade::none(0.0)
                } else {
                    AlphaFade::new(
                        entry(&spec.alpha_jump_start, index),
                        entry(&spec.alpha_jump_interval, index),
                        entry(&spec.alpha_jump_ntimes, index),
                        spec.alpha,
                    )
                };
                let plan = StagePlan {
                    index,
                    depth,
                    resolution: stage_resolution(index),
                    steps,
                    start_step,
                    end_step: start_step.saturating_add(steps),
                    fade,
                };
                start_step = start_step.saturating_add(steps);
                plan
            })
            .collect();

        Self {
            stages,
            max_step: spec.max_step,
        }
    }

    pub fn stages(&self) -> &[StagePlan] {
        &self.stages
    }

    pub fn stage(&self, index: usize) -> Option<&StagePlan> {
        self.stages.get(index)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Sum of the per-stage budgets
    pub fn scheduled_steps(&self) -> u64 {
        self.stages.last().map_or(0, |s| s.end_step)
    }

    /// Steps the run actually takes: the stage budgets capped by `max_step`
    pub fn total_steps(&self) -> u64 {
        self.scheduled_steps().min(self.max_step)
    }

    /// Stage active at a global step, `None` once the run is over
    pub fn stage_at(&self, step: u64) -> Option<&StagePlan> {
        if step >= self.total_steps() {
            return None;
        }
        let idx = self.stages.partition_point(|s| s.end_step <= step);
        self.stages.get(idx)
    }

    /// Full position (stage, local step, alpha) at a global step
    pub fn position(&self, step: u64) -> Option<SchedulePosition> {
        self.stage_at(step).map(|stage| {
            let local_step = step - stage.start_step;
            SchedulePosition {
                step,
                stage: stage.index,
                local_step,
                alpha: stage.fade.alpha_at(local_step),
                resolution: stage.resolution,
                depth: stage.depth,
            }
        })
    }

    /// Stages that `max_step` cuts short or skips entirely
    pub fn truncated_stages(&self) -> impl Iterator<Item = &StagePlan> {
        let total = self.total_steps();
        self.stages.iter().filter(move |s| s.end_step > total)
    }

    pub fn cursor(&self, start_step: u64) -> ScheduleCursor<'_> {
        ScheduleCursor::new(self, start_step)
    }
}

/// Walks a [`ProgressiveSchedule`] one training step at a time
pub struct ScheduleCursor<'a> {
    schedule: &'a ProgressiveSchedule,
    step: u64,
}

impl<'a> ScheduleCursor<'a> {
    pub fn new(schedule: &'a ProgressiveSchedule, start_step: u64) -> Self {
        Self {
            schedule,
            step: start_step,
        }
    }

    pub fn global_step(&self) -> u64 {
        self.step
    }

    pub fn position(&self) -> Option<SchedulePosition> {
        self.schedule.position(self.step)
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.schedule.total_steps()
    }

    /// Advance one step; returns the new stage index when a stage boundary
    /// was crossed (the trainer grows both networks then).
    pub fn advance(&mut self) -> Option<usize> {
        let before = self.schedule.stage_at(self.step).map(|s| s.index);
        self.step += 1;
        let after = self.schedule.stage_at(self.step).map(|s| s.index);
        match (before, after) {
            (Some(b), Some(a)) if a != b => {
                tracing::debug!(step = self.step, stage = a, "entering stage");
                Some(a)
            }
            _ => None,
        }
    }
}

impl AlphaScheduler for ScheduleCursor<'_> {
    fn alpha(&self) -> f64 {
        self.position().map_or(0.0, |p| p.alpha)
    }

    fn step(&mut self) {
        self.advance();
    }
}
