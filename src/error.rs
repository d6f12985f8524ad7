//! Crate error type with actionable diagnostics.
//!
//! Every user-facing variant carries enough context to fix the problem
//! without reading the source: the offending path or value plus a `→` hint.

use std::path::PathBuf;
use thiserror::Error;

use crate::arch::ArchError;
use crate::config::ValidationError;

/// Result type alias for pggan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading, validating or interpreting a configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found at the given path.
    #[error("Configuration file not found: {path}\n  → Create one with `pggan init` or check the path")]
    ConfigNotFound { path: PathBuf },

    /// Configuration document is malformed or does not match the schema.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax and field types at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// Configuration parsed but failed validation.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// Architecture planning rejected a request.
    #[error("Architecture error: {0}")]
    Arch(#[from] ArchError),

    /// A checkpoint referenced by the resume pointers is missing.
    #[error("Checkpoint not found: {path}\n  → Check ckpt_id / ckpt_step or the save_root directory")]
    CheckpointNotFound { path: PathBuf },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error while writing YAML or JSON.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the user can fix this by editing the config or the command line.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParsing { .. }
                | Self::Validation(_)
                | Self::Arch(_)
                | Self::CheckpointNotFound { .. }
        )
    }

    /// Stable error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "E001",
            Self::ConfigParsing { .. } => "E002",
            Self::Validation(_) => "E003",
            Self::Arch(_) => "E010",
            Self::CheckpointNotFound { .. } => "E020",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}
