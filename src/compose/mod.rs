// src/compose/mod.rs

//! Compose-tool dispatch and teardown.
//!
//! - [`docker_compose`] issues subcommands through the synchronous executor.
//! - [`error_handler`] holds the per-call non-zero-exit policies.
//! - [`operations`] abstracts the environment and docker handles.
//! - [`docker`] is the handle on the plain container CLI.
//! - [`shutdown`] selects which operations run during teardown.

pub mod docker;
pub mod docker_compose;
pub mod error_handler;
pub mod operations;
pub mod shutdown;

pub use docker::Docker;
pub use docker_compose::{Container, DockerCompose};
pub use error_handler::{swallowing_down_command_does_not_exist, throwing_on_error};
pub use operations::{BoxFuture, ComposeOperations, DockerOperations};
pub use shutdown::{ComposeStep, DockerStep, ShutdownStrategy};
