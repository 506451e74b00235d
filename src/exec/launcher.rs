// src/exec/launcher.rs

//! Process launcher abstraction.
//!
//! The executor talks to a `ProcessLauncher` instead of building
//! `tokio::process::Command`s itself. Production code uses [`CliLauncher`];
//! tests can provide a launcher that runs shell scripts instead of the real
//! compose tool.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::debug;

use crate::config::{ComposeSection, DockerSection};
use crate::errors::{ComposeError, Result};
use crate::exec::ComposeCommand;

/// Starts one OS process per command.
///
/// The returned child must have its stdout and stderr piped; the executor
/// takes both handles and drains them.
pub trait ProcessLauncher: Send + Sync {
    /// Name of the tool as shown in error messages, e.g. `docker-compose`.
    fn tool_name(&self) -> &str;

    fn launch(&self, command: &ComposeCommand) -> Result<Child>;
}

/// Launches `<program> <prefix args...> <command args...>`.
#[derive(Debug, Clone)]
pub struct CliLauncher {
    program: String,
    prefix_args: Vec<String>,
    working_dir: Option<PathBuf>,
    env: BTreeMap<String, String>,
}

impl CliLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }

    /// Launcher for the compose tool: every compose file becomes a
    /// `--file <path>` argument, followed by `--project-name` if set.
    pub fn compose(section: &ComposeSection) -> Self {
        let mut prefix = Vec::new();
        for file in &section.files {
            prefix.push("--file".to_string());
            prefix.push(file.clone());
        }
        if let Some(name) = &section.project_name {
            prefix.push("--project-name".to_string());
            prefix.push(name.clone());
        }

        Self {
            program: section.executable.clone(),
            prefix_args: prefix,
            working_dir: section.working_dir.clone(),
            env: section.env.clone(),
        }
    }

    /// Launcher for the plain container CLI, sharing the compose working
    /// directory and environment.
    pub fn docker(section: &DockerSection, compose: &ComposeSection) -> Self {
        Self {
            program: section.executable.clone(),
            prefix_args: Vec::new(),
            working_dir: compose.working_dir.clone(),
            env: compose.env.clone(),
        }
    }

    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn prefix_args(&self) -> &[String] {
        &self.prefix_args
    }
}

impl ProcessLauncher for CliLauncher {
    fn tool_name(&self) -> &str {
        &self.program
    }

    fn launch(&self, command: &ComposeCommand) -> Result<Child> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args)
            .args(command.args())
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(program = %self.program, command = %command, "launching process");

        cmd.spawn().map_err(|source| ComposeError::Launch {
            command: format!("{} {}", self.program, command),
            source,
        })
    }
}
