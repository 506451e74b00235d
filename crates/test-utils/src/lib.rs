pub mod launcher;
pub mod recording;

pub use launcher::ShellLauncher;
pub use recording::{RecordingCompose, RecordingDocker};

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

/// Upper bound for any single test future; the harness itself uses shorter
/// per-command waits, so hitting this means a hang.
pub const TEST_DEADLINE: Duration = Duration::from_secs(10);

static TRACING: OnceLock<()> = OnceLock::new();

/// Route `tracing` output into the test harness's captured output.
///
/// `RUST_LOG` applies; drained command lines are logged under
/// `compose_harness::output` at debug level.
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));
        // The test binary may already have installed a global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `f`, panicking if it outlives [`TEST_DEADLINE`].
pub async fn with_timeout<F: Future>(f: F) -> F::Output {
    match tokio::time::timeout(TEST_DEADLINE, f).await {
        Ok(out) => out,
        Err(_) => panic!("test future still pending after {TEST_DEADLINE:?}"),
    }
}
