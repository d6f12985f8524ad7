//! Progressive generator plan

use super::{check_alpha, check_stage, ArchError, BlockSpec, LayerSpec, ProgressiveNet};
use crate::config::{GeneratorActivation, SampleSpec, TrainSpec};
use serde::Serialize;

/// Generator for a progressive GAN
///
/// The latent vector is projected to a `4 x 4 x depths[0]` map, refined by
/// the scale-0 block, then each added scale upsamples by 2 and applies two
/// 3x3 convolutions. Every scale owns a 1x1 `to_rgb` layer; while alpha > 0
/// the output blends the last two of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorPlan {
    pub latent_dim: usize,
    pub output_dim: usize,
    pub equalized_lr: bool,
    pub init_bias_to_zero: bool,
    pub apply_pixel_norm: bool,
    pub lrelu_slope: f64,
    pub last_activation: Option<GeneratorActivation>,
    depths: Vec<usize>,
    alpha: f64,
}

impl GeneratorPlan {
    /// Scale-0 generator for a training spec
    pub fn new(spec: &TrainSpec) -> Result<Self, ArchError> {
        Self::with_first_depth(
            spec.depths.first().copied().unwrap_or(0),
            spec.latent_dim,
            spec.output_dim,
            spec.equalized_lr,
        )
        .map(|plan| Self {
            init_bias_to_zero: spec.init_bias_to_zero,
            apply_pixel_norm: spec.apply_pixel_norm,
            lrelu_slope: spec.lrelu_slope,
            last_activation: spec.generator_last_activation,
            ..plan
        })
    }

    fn with_first_depth(
        first_depth: usize,
        latent_dim: usize,
        output_dim: usize,
        equalized_lr: bool,
    ) -> Result<Self, ArchError> {
        if first_depth == 0 {
            return Err(ArchError::ZeroDepth);
        }
        Ok(Self {
            latent_dim,
            output_dim,
            equalized_lr,
            init_bias_to_zero: true,
            apply_pixel_norm: true,
            lrelu_slope: 0.2,
            last_activation: None,
            depths: vec![first_depth],
            alpha: 0.0,
        })
    }

    /// Generator grown to `stage` (0-based)
    pub fn for_stage(spec: &TrainSpec, stage: usize) -> Result<Self, ArchError> {
        check_stage(stage, spec.depths.len())?;
        let mut plan = Self::new(spec)?;
        for &depth in &spec.depths[1..=stage] {
            plan.grow(depth)?;
        }
        Ok(plan)
    }

    /// Generator with every scale a sampling checkpoint was trained to
    pub fn for_sampling(spec: &SampleSpec) -> Result<Self, ArchError> {
        let mut plan = Self::with_first_depth(
            spec.depths.first().copied().unwrap_or(0),
            spec.latent_dim,
            spec.output_dim,
            spec.equalized_lr,
        )?;
        plan.init_bias_to_zero = spec.init_bias_to_zero;
        plan.apply_pixel_norm = spec.apply_pixel_norm;
        plan.lrelu_slope = spec.lrelu_slope;
        plan.last_activation = spec.generator_last_activation;
        for &depth in spec.depths.iter().skip(1) {
            plan.grow(depth)?;
        }
        Ok(plan)
    }

    /// Indices of the `to_rgb` layers feeding the output
    ///
    /// Two while blending (the upsampled previous scale first), one otherwise.
    pub fn active_to_rgb(&self) -> Vec<usize> {
        let n = self.depths.len();
        if self.alpha > 0.0 && n >= 2 {
            vec![n - 2, n - 1]
        } else {
            vec![n - 1]
        }
    }

    /// `(side, side)` of the generated image
    pub fn output_size(&self) -> (usize, usize) {
        let side = self.resolution();
        (side, side)
    }
}

impl ProgressiveNet for GeneratorPlan {
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

        let mut blocks = vec![
            BlockSpec::new(
                "latent_format",
                0,
                vec![LayerSpec::linear(
                    "latent_format.linear",
                    self.latent_dim,
                    16 * d0,
                    eq,
                )],
            ),
            BlockSpec::new(
                "scale_0",
                0,
                vec![LayerSpec::conv("scale_0.conv", 3, d0, d0, eq)],
            ),
        ];

        for (scale, pair) in self.depths.windows(2).enumerate() {
            let scale = scale + 1;
            let (prev, new) = (pair[0], pair[1]);
            blocks.push(BlockSpec::new(
                format!("scale_{scale}"),
                scale,
                vec![
                    LayerSpec::conv(format!("scale_{scale}.conv0"), 3, prev, new, eq),
                    LayerSpec::conv(format!("scale_{scale}.conv1"), 3, new, new, eq),
                ],
            ));
        }

        for (scale, &depth) in self.depths.iter().enumerate() {
            blocks.push(BlockSpec::new(
                format!("to_rgb_{scale}"),
                scale,
                vec![LayerSpec::conv(
                    format!("to_rgb_{scale}.conv"),
                    1,
                    depth,
                    self.output_dim,
                    eq,
                )],
            ));
        }

        blocks
    }
}
