//! Configuration validation
//!
//! Validates training and sampling specifications before a trainer consumes them.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::{validate_config, validate_sample_config};
