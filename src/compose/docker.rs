// src/compose/docker.rs

use crate::compose::error_handler::throwing_on_error;
use crate::compose::operations::{BoxFuture, DockerOperations};
use crate::errors::Result;
use crate::exec::{
    ComposeCommand, ExecTimeouts, LogSink, ProcessLauncher, SynchronousExecutable,
    tracing_log_sink,
};

/// Handle on the plain container CLI (`docker`).
pub struct Docker<L> {
    executable: SynchronousExecutable<L>,
}

impl<L: ProcessLauncher> Docker<L> {
    pub fn new(launcher: L, timeouts: ExecTimeouts) -> Self {
        Self::with_log_sink(launcher, tracing_log_sink(), timeouts)
    }

    pub fn with_log_sink(launcher: L, log_sink: LogSink, timeouts: ExecTimeouts) -> Self {
        Self {
            executable: SynchronousExecutable::new(launcher, log_sink, timeouts),
        }
    }

    /// `docker network prune --force`
    pub async fn prune_networks(&self) -> Result<()> {
        let command = ComposeCommand::from(["network", "prune", "--force"]);
        let result = self.executable.run(&command).await?;
        if !result.success() {
            throwing_on_error(self.executable.launcher().tool_name())(
                result.exit_code(),
                result.output(),
                &command,
            )?;
        }
        Ok(())
    }
}

impl<L: ProcessLauncher> DockerOperations for Docker<L> {
    fn prune_networks(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(Docker::prune_networks(self))
    }
}
