//! Progressive-growing schedule
//!
//! Derives, from a validated [`TrainSpec`](crate::config::TrainSpec), which
//! resolution stage is active at any global step and what alpha the networks
//! blend with:
//! - [`AlphaFade`] - Step-wise alpha decay inside one stage
//! - [`ProgressiveSchedule`] - Stage boundaries over the whole run
//! - [`ScheduleCursor`] - Walks the schedule one step at a time

mod fade;
mod progressive;

#[cfg(test)]
mod proptests;

pub use fade::{AlphaFade, StageFader};
pub use progressive::{ProgressiveSchedule, ScheduleCursor, SchedulePosition, StagePlan};

/// Alpha scheduler trait
///
/// Same contract as a learning-rate scheduler: read the current value, then
/// advance by one training step.
pub trait AlphaScheduler {
    /// Get the current blending factor
    fn alpha(&self) -> f64;

    /// Step the scheduler (called once per training iteration)
    fn step(&mut self);
}
