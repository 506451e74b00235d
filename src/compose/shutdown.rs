// src/compose/shutdown.rs

//! Teardown policies.
//!
//! Each strategy is a fixed pair of step lists: what `stop` runs and what
//! `shutdown` runs. The steps are plain data; running a strategy just walks
//! its lists in order and stops at the first error.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::compose::operations::{ComposeOperations, DockerOperations};
use crate::errors::Result;

/// One call on the compose environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeStep {
    Kill,
    Down,
    Rm,
}

impl ComposeStep {
    async fn apply<E: ComposeOperations + ?Sized>(self, env: &E) -> Result<()> {
        match self {
            ComposeStep::Kill => env.kill().await,
            ComposeStep::Down => env.down().await,
            ComposeStep::Rm => env.rm().await,
        }
    }
}

/// One call on the container CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockerStep {
    PruneNetworks,
}

impl DockerStep {
    async fn apply<D: DockerOperations + ?Sized>(self, docker: &D) -> Result<()> {
        match self {
            DockerStep::PruneNetworks => docker.prune_networks().await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownStrategy {
    /// `stop` kills, `shutdown` runs `down`.
    #[default]
    KillDown,
    /// `stop` runs `down`; nothing is left for `shutdown`.
    Graceful,
    /// `stop` kills, `shutdown` force-removes the containers.
    Aggressive,
    /// As `Aggressive`, then prunes unused networks.
    AggressiveWithNetworkCleanup,
    /// Leave everything running.
    Skip,
}

impl ShutdownStrategy {
    pub fn stop_steps(self) -> &'static [ComposeStep] {
        match self {
            ShutdownStrategy::KillDown => &[ComposeStep::Kill],
            ShutdownStrategy::Graceful => &[ComposeStep::Down],
            ShutdownStrategy::Aggressive => &[ComposeStep::Kill],
            ShutdownStrategy::AggressiveWithNetworkCleanup => &[ComposeStep::Kill],
            ShutdownStrategy::Skip => &[],
        }
    }

    /// Compose steps, then docker steps.
    pub fn shutdown_steps(self) -> (&'static [ComposeStep], &'static [DockerStep]) {
        match self {
            ShutdownStrategy::KillDown => (&[ComposeStep::Down], &[]),
            ShutdownStrategy::Graceful => (&[], &[]),
            ShutdownStrategy::Aggressive => (&[ComposeStep::Rm], &[]),
            ShutdownStrategy::AggressiveWithNetworkCleanup => {
                (&[ComposeStep::Rm], &[DockerStep::PruneNetworks])
            }
            ShutdownStrategy::Skip => (&[], &[]),
        }
    }

    pub async fn stop<E>(self, env: &E) -> Result<()>
    where
        E: ComposeOperations + ?Sized,
    {
        debug!(strategy = %self, "stopping environment");
        for step in self.stop_steps() {
            step.apply(env).await?;
        }
        Ok(())
    }

    pub async fn shutdown<E, D>(self, env: &E, docker: &D) -> Result<()>
    where
        E: ComposeOperations + ?Sized,
        D: DockerOperations + ?Sized,
    {
        debug!(strategy = %self, "shutting down environment");
        let (compose_steps, docker_steps) = self.shutdown_steps();
        for step in compose_steps {
            step.apply(env).await?;
        }
        for step in docker_steps {
            step.apply(docker).await?;
        }
        Ok(())
    }
}

impl fmt::Display for ShutdownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShutdownStrategy::KillDown => "kill_down",
            ShutdownStrategy::Graceful => "graceful",
            ShutdownStrategy::Aggressive => "aggressive",
            ShutdownStrategy::AggressiveWithNetworkCleanup => "aggressive_with_network_cleanup",
            ShutdownStrategy::Skip => "skip",
        };
        f.write_str(name)
    }
}

impl FromStr for ShutdownStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "kill_down" => Ok(ShutdownStrategy::KillDown),
            "graceful" => Ok(ShutdownStrategy::Graceful),
            "aggressive" => Ok(ShutdownStrategy::Aggressive),
            "aggressive_with_network_cleanup" => Ok(ShutdownStrategy::AggressiveWithNetworkCleanup),
            "skip" => Ok(ShutdownStrategy::Skip),
            other => Err(format!(
                "invalid shutdown strategy: {other} (expected \"kill_down\", \"graceful\", \
                 \"aggressive\", \"aggressive_with_network_cleanup\" or \"skip\")"
            )),
        }
    }
}
