// src/config/validate.rs

use std::net::IpAddr;

use crate::config::duration::parse_duration;
use crate::config::model::{ConfigFile, RawConfigFile, TimeoutsSection};
use crate::errors::{ComposeError, Result};
use crate::exec::ExecTimeouts;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ComposeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_compose(&raw)?;
        let timeouts = validate_timeouts(&raw.timeouts)?;
        let host_ip = validate_host_ip(&raw.compose.host_ip)?;

        Ok(ConfigFile::new_unchecked(
            raw.compose,
            raw.docker,
            timeouts,
            raw.shutdown.strategy,
            host_ip,
        ))
    }
}

fn validate_compose(cfg: &RawConfigFile) -> Result<()> {
    if cfg.compose.executable.trim().is_empty() {
        return Err(ComposeError::ConfigError(
            "[compose].executable must not be empty".to_string(),
        ));
    }

    if cfg.compose.files.is_empty() {
        return Err(ComposeError::ConfigError(
            "[compose].files must name at least one compose file".to_string(),
        ));
    }

    if cfg.docker.executable.trim().is_empty() {
        return Err(ComposeError::ConfigError(
            "[docker].executable must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_timeouts(section: &TimeoutsSection) -> Result<ExecTimeouts> {
    let output_wait = parse_duration(&section.output_wait)
        .map_err(|e| ComposeError::ConfigError(format!("[timeouts].output_wait: {e}")))?;
    let reap_wait = parse_duration(&section.reap_wait)
        .map_err(|e| ComposeError::ConfigError(format!("[timeouts].reap_wait: {e}")))?;

    if output_wait.is_zero() || reap_wait.is_zero() {
        return Err(ComposeError::ConfigError(
            "[timeouts] durations must be greater than zero".to_string(),
        ));
    }

    if reap_wait > output_wait {
        return Err(ComposeError::ConfigError(format!(
            "[timeouts].reap_wait ({}) must not exceed output_wait ({})",
            section.reap_wait, section.output_wait
        )));
    }

    Ok(ExecTimeouts {
        output_wait,
        reap_wait,
    })
}

fn validate_host_ip(host_ip: &str) -> Result<IpAddr> {
    host_ip.trim().parse().map_err(|e| {
        ComposeError::ConfigError(format!("[compose].host_ip '{host_ip}' is not an IP address: {e}"))
    })
}
