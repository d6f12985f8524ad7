//! # pggan
//!
//! Configuration tooling for progressive-growing GAN training.
//!
//! A training run is described by one flat YAML document. This crate turns
//! that document into a validated [`TrainSpec`](config::TrainSpec) and derives
//! everything a trainer needs from it:
//!
//! - [`config`]: schema, loading, validation and CLI argument types
//! - [`schedule`]: stage boundaries and alpha blending per global step
//! - [`arch`]: generator / discriminator layer plans per stage
//! - [`checkpoint`]: checkpoint locations and resume state
//!
//! ```no_run
//! use pggan::config::load_config;
//! use pggan::schedule::ProgressiveSchedule;
//!
//! let spec = load_config("configs/celeba_hq_256.yaml")?;
//! let schedule = ProgressiveSchedule::from_spec(&spec);
//! if let Some(pos) = schedule.position(150_000) {
//!     println!("stage {} at {}px, alpha {:.3}", pos.stage, pos.resolution, pos.alpha);
//! }
//! # Ok::<(), pggan::Error>(())
//! ```

pub mod arch;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod error;
pub mod schedule;

pub use error::{Error, Result};
