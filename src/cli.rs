// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `compose-harness`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "compose-harness",
    version,
    about = "Drive a docker-compose environment: bring it up, inspect it, tear it down.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `$COMPOSE_HARNESS_CONFIG`, else `ComposeHarness.toml`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COMPOSE_HARNESS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Build images.
    Build,
    /// Start the environment detached.
    Up,
    /// Stop and remove the environment.
    Down,
    /// Kill all containers.
    Kill,
    /// Force-remove stopped containers.
    Rm,
    /// List service names.
    Ps,
    /// Show the published ports of one service.
    Ports {
        service: String,
    },
    /// Print the logs of one container to stdout.
    Logs {
        container: String,
    },
    /// Run the configured strategy's stop steps.
    Stop,
    /// Run the configured strategy's shutdown steps.
    Shutdown,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
