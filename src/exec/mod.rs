// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] holds the immutable argument list of one invocation.
//! - [`launcher`] starts OS processes (`ProcessLauncher`, `CliLauncher`).
//! - [`synchronous`] runs one command to completion with a concurrent output
//!   drain and two bounded waits.
//! - [`result`] is the exit code + output pair produced per run.

pub mod command;
pub mod launcher;
pub mod result;
pub mod synchronous;

pub use command::ComposeCommand;
pub use launcher::{CliLauncher, ProcessLauncher};
pub use result::ProcessResult;
pub use synchronous::{
    ExecTimeouts, LINE_SEPARATOR, LogSink, SynchronousExecutable, UNKNOWN_EXIT_CODE,
    tracing_log_sink,
};
