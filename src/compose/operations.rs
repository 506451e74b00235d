// src/compose/operations.rs

//! Environment-facing operation traits.
//!
//! Shutdown strategies only talk to these traits, so tests can hand them a
//! recording fake instead of a real [`DockerCompose`](super::DockerCompose).

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::parse::ContainerNames;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Operations of one compose environment.
pub trait ComposeOperations: Send + Sync {
    fn build(&self) -> BoxFuture<'_, Result<()>>;
    fn up(&self) -> BoxFuture<'_, Result<()>>;
    fn down(&self) -> BoxFuture<'_, Result<()>>;
    fn kill(&self) -> BoxFuture<'_, Result<()>>;
    fn rm(&self) -> BoxFuture<'_, Result<()>>;
    fn ps(&self) -> BoxFuture<'_, Result<ContainerNames>>;
}

/// Operations of the plain container CLI that outlive one environment.
pub trait DockerOperations: Send + Sync {
    /// Remove networks no longer used by any container.
    fn prune_networks(&self) -> BoxFuture<'_, Result<()>>;
}
