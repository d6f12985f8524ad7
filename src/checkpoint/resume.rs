//! Resolving `ckpt_id` / `ckpt_step` into files and schedule state

use super::layout::{CheckpointLayout, CheckpointStep};
use crate::config::TrainSpec;
use crate::error::{Error, Result};
use crate::schedule::{ProgressiveSchedule, SchedulePosition};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Resume pointer read from a spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumePoint {
    pub run_id: String,
    pub step: CheckpointStep,
}

impl ResumePoint {
    /// `None` when the run starts fresh
    pub fn from_spec(spec: &TrainSpec) -> Option<Self> {
        spec.ckpt_id.as_ref().map(|run_id| Self {
            run_id: run_id.clone(),
            step: spec
                .ckpt_step
                .map_or(CheckpointStep::Latest, CheckpointStep::Step),
        })
    }

    pub fn resolve(&self, save_root: impl AsRef<Path>) -> ResolvedCheckpoint {
        let layout = CheckpointLayout::new(save_root, &self.run_id);
        ResolvedCheckpoint {
            generator: layout.generator_path(self.step),
            discriminator: layout.discriminator_path(self.step),
            step: self.step,
            layout,
        }
    }
}

/// Concrete checkpoint files for a resume pointer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCheckpoint {
    pub layout: CheckpointLayout,
    pub step: CheckpointStep,
    pub generator: PathBuf,
    pub discriminator: PathBuf,
}

impl ResolvedCheckpoint {
    /// Fail unless both network files exist
    pub fn verify(&self) -> Result<()> {
        for path in [&self.generator, &self.discriminator] {
            if !path.is_file() {
                return Err(Error::CheckpointNotFound { path: path.clone() });
            }
        }
        Ok(())
    }

    /// Global step training continues from
    ///
    /// A `latest` pointer maps to the highest numbered checkpoint on disk;
    /// `None` if there is none to read the step from.
    pub fn resume_step(&self) -> Result<Option<u64>> {
        match self.step {
            CheckpointStep::Step(step) => Ok(Some(step)),
            CheckpointStep::Latest => self.layout.latest_step(),
        }
    }
}

/// Where in the schedule a resumed run picks up
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResumeState {
    pub step: u64,
    /// `None` when the step is past the end of the schedule
    pub position: Option<SchedulePosition>,
}

impl ResumeState {
    pub fn at(schedule: &ProgressiveSchedule, step: u64) -> Self {
        Self {
            step,
            position: schedule.position(step),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position.is_none()
    }
}
