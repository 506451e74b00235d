// tests/teardown_with_processes.rs

#![cfg(unix)]

mod common;
use crate::common::{compose, init_tracing, test_timeouts, with_timeout};

use compose_harness::compose::{Docker, ShutdownStrategy};
use compose_harness_test_utils::ShellLauncher;

#[tokio::test]
async fn kill_down_runs_kill_then_down_processes() {
    init_tracing();

    let compose_launcher = ShellLauncher::new();
    let compose_launched = compose_launcher.launched();
    let compose = compose(compose_launcher);

    let docker_launcher = ShellLauncher::new().tool("docker");
    let docker_launched = docker_launcher.launched();
    let docker = Docker::new(docker_launcher, test_timeouts());

    with_timeout(async {
        ShutdownStrategy::KillDown.stop(&compose).await.unwrap();
        ShutdownStrategy::KillDown.shutdown(&compose, &docker).await.unwrap();
    })
    .await;

    assert_eq!(*compose_launched.lock().unwrap(), vec!["kill", "down"]);
    assert!(docker_launched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn kill_down_survives_compose_without_down() {
    init_tracing();

    let compose = compose(
        ShellLauncher::new().on("down", "echo 'No such command: down' 1>&2; exit 1"),
    );
    let docker = Docker::new(ShellLauncher::new().tool("docker"), test_timeouts());

    with_timeout(ShutdownStrategy::KillDown.shutdown(&compose, &docker))
        .await
        .unwrap();
}

#[tokio::test]
async fn network_cleanup_prunes_through_docker() {
    init_tracing();

    let compose_launcher = ShellLauncher::new();
    let compose_launched = compose_launcher.launched();
    let compose = compose(compose_launcher);

    let docker_launcher = ShellLauncher::new().tool("docker");
    let docker_launched = docker_launcher.launched();
    let docker = Docker::new(docker_launcher, test_timeouts());

    with_timeout(ShutdownStrategy::AggressiveWithNetworkCleanup.shutdown(&compose, &docker))
        .await
        .unwrap();

    assert_eq!(*compose_launched.lock().unwrap(), vec!["rm -f"]);
    assert_eq!(*docker_launched.lock().unwrap(), vec!["network prune --force"]);
}

#[tokio::test]
async fn failed_prune_is_reported_with_docker_tool_name() {
    init_tracing();

    let docker = Docker::new(
        ShellLauncher::new().tool("docker").on("network", "echo 'daemon unreachable' 1>&2; exit 1"),
        test_timeouts(),
    );

    let err = with_timeout(docker.prune_networks()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "'docker network prune --force' returned exit code 1"
    );
}
