//! Layer and block descriptions

use serde::Serialize;

/// Kind of weight layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerKind {
    Linear,
    Conv { kernel: usize },
}

impl LayerKind {
    fn kernel_area(&self) -> usize {
        match self {
            LayerKind::Linear => 1,
            LayerKind::Conv { kernel } => kernel * kernel,
        }
    }
}

/// One weight layer with its bias
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub name: String,
    pub kind: LayerKind,
    pub in_channels: usize,
    pub out_channels: usize,
    /// Runtime weight multiplier: He's constant `sqrt(2 / fan_in)` under
    /// equalized learning rate, 1.0 otherwise
    pub he_scale: f64,
}

impl LayerSpec {
    pub fn linear(
        name: impl Into<String>,
        in_features: usize,
        out_features: usize,
        equalized: bool,
    ) -> Self {
        Self::build(
            name.into(),
            LayerKind::Linear,
            in_features,
            out_features,
            equalized,
        )
    }

    pub fn conv(
        name: impl Into<String>,
        kernel: usize,
        in_channels: usize,
        out_channels: usize,
        equalized: bool,
    ) -> Self {
        Self::build(
            name.into(),
            LayerKind::Conv { kernel },
            in_channels,
            out_channels,
            equalized,
        )
    }

    fn build(
        name: String,
        kind: LayerKind,
        in_channels: usize,
        out_channels: usize,
        equalized: bool,
    ) -> Self {
        let fan_in = in_channels * kind.kernel_area();
        let he_scale = if equalized && fan_in > 0 {
            (2.0 / fan_in as f64).sqrt()
        } else {
            1.0
        };
        Self {
            name,
            kind,
            in_channels,
            out_channels,
            he_scale,
        }
    }

    pub fn fan_in(&self) -> usize {
        self.in_channels * self.kind.kernel_area()
    }

    /// Weights plus biases
    pub fn parameter_count(&self) -> usize {
        self.fan_in() * self.out_channels + self.out_channels
    }
}

/// A named group of layers added together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSpec {
    pub name: String,
    /// Stage the block belongs to
    pub scale: usize,
    pub layers: Vec<LayerSpec>,
}

impl BlockSpec {
    pub fn new(name: impl Into<String>, scale: usize, layers: Vec<LayerSpec>) -> Self {
        Self {
            name: name.into(),
            scale,
            layers,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(LayerSpec::parameter_count).sum()
    }
}
