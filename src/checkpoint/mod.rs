//! Checkpoint locations and resume resolution
//!
//! The trainer owns the checkpoint format; this module only knows where the
//! files live and what schedule state a resumed run continues in.

mod layout;
mod resume;

pub use layout::{CheckpointLayout, CheckpointStep};
pub use resume::{ResolvedCheckpoint, ResumePoint, ResumeState};
