//! Progressive discriminator plan

use super::{check_alpha, check_stage, ArchError, BlockSpec, LayerSpec, ProgressiveNet};
use crate::config::TrainSpec;
use serde::Serialize;

/// Discriminator for a progressive GAN
///
/// Mirrors the generator: a 1x1 `from_rgb` per scale, two 3x3 convolutions
/// and a 2x downsample per added scale, then the scale-0 block (optional
/// minibatch standard deviation channel, 3x3 conv, dense) and the decision
/// layer. Blocks are explored from the highest scale down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscriminatorPlan {
    pub input_dim: usize,
    pub decision_layer_size: usize,
    pub apply_minibatch_norm: bool,
    pub equalized_lr: bool,
    pub init_bias_to_zero: bool,
    pub lrelu_slope: f64,
    depths: Vec<usize>,
    alpha: f64,
}

impl DiscriminatorPlan {
    /// Scale-0 discriminator for a training spec
    pub fn new(spec: &TrainSpec) -> Result<Self, ArchError> {
        let last_depth = spec.depths.first().copied().unwrap_or(0);
        if last_depth == 0 {
            return Err(ArchError::ZeroDepth);
        }
        Ok(Self {
            input_dim: spec.input_dim,
            decision_layer_size: spec.decision_layer_size,
            apply_minibatch_norm: spec.apply_minibatch_norm,
            equalized_lr: spec.equalized_lr,
            init_bias_to_zero: spec.init_bias_to_zero,
            lrelu_slope: spec.lrelu_slope,
            depths: vec![last_depth],
            alpha: 0.0,
        })
    }

    /// Discriminator grown to `stage` (0-based)
    pub fn for_stage(spec: &TrainSpec, stage: usize) -> Result<Self, ArchError> {
        check_stage(stage, spec.depths.len())?;
        let mut plan = Self::new(spec)?;
        for &depth in &spec.depths[1..=stage] {
            plan.grow(depth)?;
        }
        Ok(plan)
    }

    /// Indices of the `from_rgb` layers reading the input
    pub fn active_from_rgb(&self) -> Vec<usize> {
        let n = self.depths.len();
        if self.alpha > 0.0 && n >= 2 {
            vec![n - 2, n - 1]
        } else {
            vec![n - 1]
        }
    }
}

impl ProgressiveNet for DiscriminatorPlan {
    fn depths(&self) -> &[usize] {
        &self.depths
    }

    fn grow(&mut self, depth: usize) -> Result<(), ArchError> {
        if depth == 0 {
            return Err(ArchError::ZeroDepth);
        }
        self.depths.push(depth);
        Ok(())
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f64) -> Result<(), ArchError> {
        check_alpha(alpha, self.depths.len())?;
        self.alpha = alpha;
        Ok(())
    }

    fn blocks(&self) -> Vec<BlockSpec> {
        let eq = self.equalized_lr;
        let d0 = self.depths[0];
        let mut blocks = Vec::with_capacity(2 * self.depths.len() + 2);

        for (scale, &depth) in self.depths.iter().enumerate() {
            blocks.push(BlockSpec::new(
                format!("from_rgb_{scale}"),
                scale,
                vec![LayerSpec::conv(
                    format!("from_rgb_{scale}.conv"),
                    1,
                    self.input_dim,
                    depth,
                    eq,
                )],
            ));
        }

        // Highest scale first: conv at the scale's depth, then down to the previous one.
        for scale in (1..self.depths.len()).rev() {
            let (prev, new) = (self.depths[scale - 1], self.depths[scale]);
            blocks.push(BlockSpec::new(
                format!("scale_{scale}"),
                scale,
                vec![
                    LayerSpec::conv(format!("scale_{scale}.conv0"), 3, new, new, eq),
                    LayerSpec::conv(format!("scale_{scale}.conv1"), 3, new, prev, eq),
                ],
            ));
        }

        let mbstd = usize::from(self.apply_minibatch_norm);
        blocks.push(BlockSpec::new(
            "scale_0",
            0,
            vec![
                LayerSpec::conv("scale_0.conv", 3, d0 + mbstd, d0, eq),
                LayerSpec::linear("scale_0.linear", 16 * d0, d0, eq),
            ],
        ));
        blocks.push(BlockSpec::new(
            "decision",
            0,
            vec![LayerSpec::linear(
                "decision.linear",
                d0,
                self.decision_layer_size,
                eq,
            )],
        ));

        blocks
    }
}
