// src/lib.rs

//! Harness for driving a docker-compose style CLI from test code.
//!
//! The layers, bottom up:
//! - [`exec`]: launch one process, drain its output concurrently, wait with
//!   bounds, return a [`ProcessResult`](exec::ProcessResult).
//! - [`compose`]: named subcommands with per-call error policies, plus the
//!   teardown strategies.
//! - [`parse`]: turn `ps` output into service names and ports.

pub mod cli;
pub mod compose;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod parse;

use anyhow::Result;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::cli::{Action, CliArgs};
use crate::compose::{Docker, DockerCompose};
use crate::config::{ConfigFile, default_config_path, load_and_validate};
use crate::exec::CliLauncher;

/// High-level entry point used by `main.rs`.
///
/// Loads the config, builds the compose and docker handles, and runs the one
/// requested action.
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let cfg = load_and_validate(&config_path)?;
    info!(config = %config_path.display(), strategy = %cfg.shutdown, "configuration loaded");

    let compose = compose_from_config(&cfg);

    match args.action {
        Action::Build => compose.build().await?,
        Action::Up => compose.up().await?,
        Action::Down => compose.down().await?,
        Action::Kill => compose.kill().await?,
        Action::Rm => compose.rm().await?,
        Action::Ps => {
            for name in compose.ps().await?.iter() {
                println!("{name}");
            }
        }
        Action::Ports { service } => {
            for port in compose.ports(&service).await?.iter() {
                println!("{}:{}->{}", port.ip, port.external, port.internal);
            }
        }
        Action::Logs { container } => {
            let mut stdout = tokio::io::stdout();
            let finished = compose.logs(&container, &mut stdout).await?;
            stdout.flush().await?;
            if !finished {
                tracing::warn!(container = %container, "logs process had not exited when collection ended");
            }
        }
        Action::Stop => cfg.shutdown.stop(&compose).await?,
        Action::Shutdown => {
            let docker = docker_from_config(&cfg);
            cfg.shutdown.shutdown(&compose, &docker).await?;
        }
    }

    Ok(())
}

/// Dispatcher for the compose tool described by `cfg`.
pub fn compose_from_config(cfg: &ConfigFile) -> DockerCompose<CliLauncher> {
    DockerCompose::new(CliLauncher::compose(&cfg.compose), cfg.host_ip, cfg.timeouts)
}

/// Handle on the container CLI described by `cfg`.
pub fn docker_from_config(cfg: &ConfigFile) -> Docker<CliLauncher> {
    Docker::new(CliLauncher::docker(&cfg.docker, &cfg.compose), cfg.timeouts)
}
