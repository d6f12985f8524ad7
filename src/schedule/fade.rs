//! Alpha fade-in within a single stage

use super::AlphaScheduler;
use serde::Serialize;

/// Step-wise alpha decay for one stage
///
/// Alpha starts at 1.0 (only the upsampled previous-resolution output) and
/// drops by `1 / n_jumps` every `interval` steps once `start` is reached.
///
/// Formula: alpha_t = 1 - min(n_jumps, floor((t - start) / interval)) / n_jumps
///
/// A stage with `n_jumps == 0` does not fade and holds `resting` throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlphaFade {
    pub start: u64,
    pub interval: u64,
    pub n_jumps: u64,
    pub resting: f64,
}

impl AlphaFade {
    pub fn new(start: u64, interval: u64, n_jumps: u64, resting: f64) -> Self {
        Self {
            start,
            interval,
            n_jumps,
            resting,
        }
    }

    /// A stage that never blends
    pub fn none(resting: f64) -> Self {
        Self::new(0, 0, 0, resting)
    }

    pub fn is_fading(&self) -> bool {
        self.n_jumps > 0
    }

    /// Alpha at a step local to the stage
    pub fn alpha_at(&self, local_step: u64) -> f64 {
        if self.n_jumps == 0 {
            return self.resting;
        }
        if local_step < self.start {
            return 1.0;
        }
        if self.interval == 0 {
            return 0.0;
        }
        let jumps = ((local_step - self.start) / self.interval).min(self.n_jumps);
        1.0 - jumps as f64 / self.n_jumps as f64
    }

    /// First local step at which alpha reaches 0
    pub fn end(&self) -> Option<u64> {
        self.is_fading()
            .then(|| self.start.saturating_add(self.n_jumps.saturating_mul(self.interval)))
    }
}

/// Stateful wrapper that walks an [`AlphaFade`] one step at a time
pub struct StageFader {
    fade: AlphaFade,
    local_step: u64,
}

impl StageFader {
    pub fn new(fade: AlphaFade) -> Self {
        Self {
            fade,
            local_step: 0,
        }
    }

    /// Start partway into the stage, e.g. when resuming
    pub fn starting_at(fade: AlphaFade, local_step: u64) -> Self {
        Self { fade, local_step }
    }

    pub fn local_step(&self) -> u64 {
        self.local_step
    }
}

impl AlphaScheduler for StageFader {
    fn alpha(&self) -> f64 {
        self.fade.alpha_at(self.local_step)
    }

    fn step(&mut self) {
        self.local_step += 1;
    }
}
