// tests/config_loading.rs

use std::io::Write;
use std::net::IpAddr;
use std::time::Duration;

use tempfile::NamedTempFile;

use compose_harness::compose::ShutdownStrategy;
use compose_harness::config::{ConfigFile, load_and_validate, load_from_str};
use compose_harness::errors::ComposeError;
use compose_harness::exec::{CliLauncher, ExecTimeouts, ProcessLauncher};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn expect_config_error(contents: &str) -> String {
    let raw = load_from_str(contents).unwrap();
    match ConfigFile::try_from(raw) {
        Err(ComposeError::ConfigError(msg)) => msg,
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_file_uses_defaults() {
    let file = write_config("");

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.compose.executable, "docker-compose");
    assert_eq!(cfg.compose.files, vec!["docker-compose.yml"]);
    assert_eq!(cfg.docker.executable, "docker");
    assert_eq!(cfg.timeouts, ExecTimeouts::default());
    assert_eq!(cfg.shutdown, ShutdownStrategy::KillDown);
    assert_eq!(cfg.host_ip, "127.0.0.1".parse::<IpAddr>().unwrap());
}

#[test]
fn full_config_is_typed() {
    let file = write_config(
        r#"
[compose]
executable = "podman-compose"
files = ["base.yml", "ci.yml"]
project_name = "itest"
working_dir = "/srv/app"
host_ip = "192.168.99.100"
env = { COMPOSE_HTTP_TIMEOUT = "200" }

[timeouts]
output_wait = "30m"
reap_wait = "5s"

[shutdown]
strategy = "aggressive_with_network_cleanup"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(
        cfg.timeouts,
        ExecTimeouts {
            output_wait: Duration::from_secs(30 * 60),
            reap_wait: Duration::from_secs(5),
        }
    );
    assert_eq!(cfg.shutdown, ShutdownStrategy::AggressiveWithNetworkCleanup);
    assert_eq!(cfg.host_ip, "192.168.99.100".parse::<IpAddr>().unwrap());
    assert_eq!(cfg.compose.env.get("COMPOSE_HTTP_TIMEOUT").map(String::as_str), Some("200"));

    let launcher = CliLauncher::compose(&cfg.compose);
    assert_eq!(launcher.tool_name(), "podman-compose");
    assert_eq!(
        launcher.prefix_args(),
        ["--file", "base.yml", "--file", "ci.yml", "--project-name", "itest"]
    );
}

#[test]
fn unknown_strategy_is_a_toml_error() {
    let file = write_config("[shutdown]\nstrategy = \"nuke\"\n");

    let err = load_and_validate(file.path()).unwrap_err();

    assert!(matches!(err, ComposeError::TomlError(_)), "got {err:?}");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_and_validate("/definitely/not/here/ComposeHarness.toml").unwrap_err();

    assert!(matches!(err, ComposeError::IoError(_)), "got {err:?}");
}

#[test]
fn empty_file_list_is_rejected() {
    let msg = expect_config_error("[compose]\nfiles = []\n");
    assert!(msg.contains("[compose].files"));
}

#[test]
fn empty_executable_is_rejected() {
    let msg = expect_config_error("[compose]\nexecutable = \"  \"\n");
    assert!(msg.contains("[compose].executable"));
}

#[test]
fn bad_duration_is_rejected() {
    let msg = expect_config_error("[timeouts]\nreap_wait = \"soon\"\n");
    assert!(msg.contains("[timeouts].reap_wait"));
}

#[test]
fn overflowing_duration_is_a_config_error() {
    let msg = expect_config_error("[timeouts]\noutput_wait = \"6000000000000000h\"\n");
    assert!(msg.contains("[timeouts].output_wait"));
    assert!(msg.contains("too large"));
}

#[test]
fn zero_duration_is_rejected() {
    let msg = expect_config_error("[timeouts]\noutput_wait = \"0s\"\n");
    assert!(msg.contains("greater than zero"));
}

#[test]
fn reap_wait_longer_than_output_wait_is_rejected() {
    let msg = expect_config_error("[timeouts]\noutput_wait = \"10s\"\nreap_wait = \"1m\"\n");
    assert!(msg.contains("must not exceed"));
}

#[test]
fn bad_host_ip_is_rejected() {
    let msg = expect_config_error("[compose]\nhost_ip = \"docker.local\"\n");
    assert!(msg.contains("[compose].host_ip"));
}
