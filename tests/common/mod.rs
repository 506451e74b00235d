#![allow(dead_code)]

pub use compose_harness_test_utils::{init_tracing, with_timeout};

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use compose_harness::compose::DockerCompose;
use compose_harness::exec::{ExecTimeouts, LogSink};
use compose_harness_test_utils::ShellLauncher;

pub const HOST_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 99, 100));

/// Timeouts short enough that a wrong wait fails the test quickly.
pub fn test_timeouts() -> ExecTimeouts {
    ExecTimeouts {
        output_wait: Duration::from_secs(10),
        reap_wait: Duration::from_secs(2),
    }
}

pub fn compose(launcher: ShellLauncher) -> DockerCompose<ShellLauncher> {
    DockerCompose::new(launcher, HOST_IP, test_timeouts())
}

/// A dispatcher whose log sink records every drained line.
pub fn recording_compose(
    launcher: ShellLauncher,
) -> (DockerCompose<ShellLauncher>, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&seen);
    let sink: LogSink = Arc::new(move |line: &str| {
        captured.lock().unwrap().push(line.to_string());
    });
    (
        DockerCompose::with_log_sink(launcher, sink, HOST_IP, test_timeouts()),
        seen,
    )
}
