use std::sync::{Arc, Mutex};

use compose_harness::compose::{BoxFuture, ComposeOperations, DockerOperations};
use compose_harness::errors::{ComposeError, Result};
use compose_harness::parse::ContainerNames;

type CallLog = Arc<Mutex<Vec<&'static str>>>;

fn record(calls: &CallLog, fail_on: Option<&'static str>, name: &'static str) -> Result<()> {
    calls.lock().unwrap().push(name);
    if fail_on == Some(name) {
        return Err(ComposeError::Validation(format!("{name} failed")));
    }
    Ok(())
}

/// Fake environment that records which operations were called, in order.
#[derive(Default)]
pub struct RecordingCompose {
    calls: CallLog,
    fail_on: Option<&'static str>,
}

impl RecordingCompose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named operation record itself and then fail.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn op(&self, name: &'static str) -> BoxFuture<'_, Result<()>> {
        let result = record(&self.calls, self.fail_on, name);
        Box::pin(async move { result })
    }
}

impl ComposeOperations for RecordingCompose {
    fn build(&self) -> BoxFuture<'_, Result<()>> {
        self.op("build")
    }

    fn up(&self) -> BoxFuture<'_, Result<()>> {
        self.op("up")
    }

    fn down(&self) -> BoxFuture<'_, Result<()>> {
        self.op("down")
    }

    fn kill(&self) -> BoxFuture<'_, Result<()>> {
        self.op("kill")
    }

    fn rm(&self) -> BoxFuture<'_, Result<()>> {
        self.op("rm")
    }

    fn ps(&self) -> BoxFuture<'_, Result<ContainerNames>> {
        let result = record(&self.calls, self.fail_on, "ps").map(|()| ContainerNames::default());
        Box::pin(async move { result })
    }
}

/// Fake docker handle that records calls.
#[derive(Default)]
pub struct RecordingDocker {
    calls: CallLog,
}

impl RecordingDocker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl DockerOperations for RecordingDocker {
    fn prune_networks(&self) -> BoxFuture<'_, Result<()>> {
        let result = record(&self.calls, None, "prune_networks");
        Box::pin(async move { result })
    }
}
