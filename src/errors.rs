// src/errors.rs

//! Crate-wide error type and result alias.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    /// The OS process could not be created.
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A command exited non-zero under a throwing error policy.
    ///
    /// `message` has the shape `'<tool> <args>' returned exit code <n>`.
    #[error("{message}")]
    NonZeroExit {
        message: String,
        exit_code: i32,
        command: String,
        output: String,
    },

    /// Output collection did not finish within the long bound.
    ///
    /// The child process is left running.
    #[error("timed out after {timeout:?} waiting for output of '{command}' to close")]
    OutputTimeout { command: String, timeout: Duration },

    /// The drain worker failed, panicked or was cancelled.
    #[error("collecting output of '{command}' failed: {reason}")]
    OutputCollection { command: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposeError {
    /// Exit code carried by a `NonZeroExit`, if any.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ComposeError::NonZeroExit { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;
