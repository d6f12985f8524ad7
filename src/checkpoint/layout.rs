//! On-disk layout of a training run

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Which checkpoint of a run to address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointStep {
    /// The rolling `*_latest.pt` pair
    Latest,
    Step(u64),
}

impl std::fmt::Display for CheckpointStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckpointStep::Latest => write!(f, "latest"),
            CheckpointStep::Step(step) => write!(f, "{step}"),
        }
    }
}

/// Directory layout of one run
///
/// ```text
/// <save_root>/<run_id>/
///   ckpt/G_<step>.pt  D_<step>.pt  G_latest.pt  D_latest.pt
///   imgs/
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckpointLayout {
    run_dir: PathBuf,
}

impl CheckpointLayout {
    pub fn new(save_root: impl AsRef<Path>, run_id: &str) -> Self {
        Self {
            run_dir: save_root.as_ref().join(run_id),
        }
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn ckpt_dir(&self) -> PathBuf {
        self.run_dir.join("ckpt")
    }

    /// Where sample grids are written every `test_cycle` steps
    pub fn image_dir(&self) -> PathBuf {
        self.run_dir.join("imgs")
    }

    pub fn generator_path(&self, step: CheckpointStep) -> PathBuf {
        self.ckpt_dir().join(format!("G_{step}.pt"))
    }

    pub fn discriminator_path(&self, step: CheckpointStep) -> PathBuf {
        self.ckpt_dir().join(format!("D_{step}.pt"))
    }

    /// Numbered generator checkpoints present on disk, ascending
    ///
    /// A missing checkpoint directory yields an empty list.
    pub fn discover_steps(&self) -> Result<Vec<u64>> {
        let dir = self.ckpt_dir();
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(format!("listing {}", dir.display()), e)),
        };

        let mut steps = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(format!("listing {}", dir.display()), e))?;
            if let Some(step) = entry.file_name().to_str().and_then(parse_generator_step) {
                steps.push(step);
            }
        }
        steps.sort_unstable();
        Ok(steps)
    }

    /// Highest numbered checkpoint, if any
    pub fn latest_step(&self) -> Result<Option<u64>> {
        Ok(self.discover_steps()?.last().copied())
    }
}

fn parse_generator_step(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix("G_")?
        .strip_suffix(".pt")?
        .parse()
        .ok()
}
