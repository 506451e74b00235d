// src/config/model.rs

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::PathBuf;

use serde::Deserialize;

use crate::compose::ShutdownStrategy;
use crate::exec::ExecTimeouts;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [compose]
/// files = ["docker-compose.yml"]
/// project_name = "itest"
///
/// [timeouts]
/// output_wait = "12h"
/// reap_wait = "1m"
///
/// [shutdown]
/// strategy = "kill_down"
/// ```
///
/// All sections are optional and have defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub compose: ComposeSection,

    #[serde(default)]
    pub docker: DockerSection,

    #[serde(default)]
    pub timeouts: TimeoutsSection,

    #[serde(default)]
    pub shutdown: ShutdownSection,
}

/// `[compose]` section: how to invoke the compose tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ComposeSection {
    #[serde(default = "default_compose_executable")]
    pub executable: String,

    /// Each entry is passed as `--file <path>`, in order.
    #[serde(default = "default_compose_files")]
    pub files: Vec<String>,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Substituted for `0.0.0.0` when reading published ports.
    #[serde(default = "default_host_ip")]
    pub host_ip: String,

    /// Extra environment variables for every launched process.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn default_compose_executable() -> String {
    "docker-compose".to_string()
}

fn default_compose_files() -> Vec<String> {
    vec!["docker-compose.yml".to_string()]
}

fn default_host_ip() -> String {
    "127.0.0.1".to_string()
}

impl Default for ComposeSection {
    fn default() -> Self {
        Self {
            executable: default_compose_executable(),
            files: default_compose_files(),
            project_name: None,
            working_dir: None,
            host_ip: default_host_ip(),
            env: BTreeMap::new(),
        }
    }
}

/// `[docker]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DockerSection {
    #[serde(default = "default_docker_executable")]
    pub executable: String,
}

fn default_docker_executable() -> String {
    "docker".to_string()
}

impl Default for DockerSection {
    fn default() -> Self {
        Self {
            executable: default_docker_executable(),
        }
    }
}

/// `[timeouts]` section. Values are duration strings like `"90s"`.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutsSection {
    #[serde(default = "default_output_wait")]
    pub output_wait: String,

    #[serde(default = "default_reap_wait")]
    pub reap_wait: String,
}

fn default_output_wait() -> String {
    "12h".to_string()
}

fn default_reap_wait() -> String {
    "1m".to_string()
}

impl Default for TimeoutsSection {
    fn default() -> Self {
        Self {
            output_wait: default_output_wait(),
            reap_wait: default_reap_wait(),
        }
    }
}

/// `[shutdown]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShutdownSection {
    #[serde(default)]
    pub strategy: ShutdownStrategy,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>`, so every instance
/// has passed validation.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub compose: ComposeSection,
    pub docker: DockerSection,
    pub timeouts: ExecTimeouts,
    pub shutdown: ShutdownStrategy,
    pub host_ip: IpAddr,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        compose: ComposeSection,
        docker: DockerSection,
        timeouts: ExecTimeouts,
        shutdown: ShutdownStrategy,
        host_ip: IpAddr,
    ) -> Self {
        Self {
            compose,
            docker,
            timeouts,
            shutdown,
            host_ip,
        }
    }
}
