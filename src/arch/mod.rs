//! Structural plans of the progressive generator and discriminator
//!
//! Describes the layers a trainer builds from a configuration (channels,
//! parameter counts, equalized-lr scale) and the rules for growing a scale
//! and setting the blend factor. No tensors live here.

mod discriminator;
mod generator;
mod layer;


pub use discriminator::DiscriminatorPlan;
pub use generator::GeneratorPlan;
pub use layer::{BlockSpec, LayerKind, LayerSpec};

/// Architecture planning errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArchError {
    #[error("alpha must be in [0, 1], got {0}")]
    AlphaOutOfRange(f64),

    #[error("cannot blend with alpha > 0 while only scale 0 is defined")]
    NoPreviousScale,

    #[error("stage {stage} requested but the config defines {stages} stages")]
    StageOutOfRange { stage: usize, stages: usize },

    #[error("cannot add a scale with depth 0")]
    ZeroDepth,
}

/// Shared behaviour of both progressive networks
pub trait ProgressiveNet {
    /// Channel depth per scale, lowest resolution first
    fn depths(&self) -> &[usize];

    /// Add a scale, doubling the resolution
    fn grow(&mut self, depth: usize) -> Result<(), ArchError>;

    /// Current blend factor between the new scale and the upsampled previous one
    fn alpha(&self) -> f64;

    fn set_alpha(&mut self, alpha: f64) -> Result<(), ArchError>;

    /// Blocks in forward order
    fn blocks(&self) -> Vec<BlockSpec>;

    fn scale_count(&self) -> usize {
        self.depths().len()
    }

    /// Image side length handled at the current scale
    fn resolution(&self) -> usize {
        match self.scale_count() {
            0 => 0,
            n => crate::config::stage_resolution(n - 1),
        }
    }

    fn layers(&self) -> Vec<LayerSpec> {
        self.blocks().into_iter().flat_map(|b| b.layers).collect()
    }

    fn parameter_count(&self) -> usize {
        self.blocks().iter().map(BlockSpec::parameter_count).sum()
    }
}

pub(crate) fn check_alpha(alpha: f64, scales: usize) -> Result<(), ArchError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ArchError::AlphaOutOfRange(alpha));
    }
    if alpha > 0.0 && scales < 2 {
        return Err(ArchError::NoPreviousScale);
    }
    Ok(())
}

pub(crate) fn check_stage(stage: usize, stages: usize) -> Result<(), ArchError> {
    if stage >= stages {
        return Err(ArchError::StageOutOfRange { stage, stages });
    }
    Ok(())
}
