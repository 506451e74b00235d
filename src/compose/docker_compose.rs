// src/compose/docker_compose.rs

//! The command dispatcher.
//!
//! Every subcommand goes through [`DockerCompose::execute_command`], which
//! runs it on the synchronous executor and hands non-zero exits to the
//! policy chosen at the call site.

use std::net::IpAddr;

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::compose::error_handler::{swallowing_down_command_does_not_exist, throwing_on_error};
use crate::compose::operations::{BoxFuture, ComposeOperations};
use crate::errors::{ComposeError, Result};
use crate::exec::{
    ComposeCommand, ExecTimeouts, LogSink, ProcessLauncher, SynchronousExecutable,
    tracing_log_sink,
};
use crate::parse::{ContainerNames, Ports};

pub struct DockerCompose<L> {
    executable: SynchronousExecutable<L>,
    host_ip: IpAddr,
}

impl<L: ProcessLauncher> DockerCompose<L> {
    /// Dispatcher whose output lines go to `tracing` at debug level.
    pub fn new(launcher: L, host_ip: IpAddr, timeouts: ExecTimeouts) -> Self {
        Self::with_log_sink(launcher, tracing_log_sink(), host_ip, timeouts)
    }

    pub fn with_log_sink(
        launcher: L,
        log_sink: LogSink,
        host_ip: IpAddr,
        timeouts: ExecTimeouts,
    ) -> Self {
        Self {
            executable: SynchronousExecutable::new(launcher, log_sink, timeouts),
            host_ip,
        }
    }

    pub fn tool_name(&self) -> &str {
        self.executable.launcher().tool_name()
    }

    pub fn host_ip(&self) -> IpAddr {
        self.host_ip
    }

    pub async fn build(&self) -> Result<()> {
        self.execute_command(throwing_on_error(self.tool_name()), ["build"])
            .await?;
        Ok(())
    }

    pub async fn up(&self) -> Result<()> {
        self.execute_command(throwing_on_error(self.tool_name()), ["up", "-d"])
            .await?;
        Ok(())
    }

    pub async fn down(&self) -> Result<()> {
        self.execute_command(
            swallowing_down_command_does_not_exist(self.tool_name()),
            ["down"],
        )
        .await?;
        Ok(())
    }

    pub async fn kill(&self) -> Result<()> {
        self.execute_command(throwing_on_error(self.tool_name()), ["kill"])
            .await?;
        Ok(())
    }

    pub async fn rm(&self) -> Result<()> {
        self.execute_command(throwing_on_error(self.tool_name()), ["rm", "-f"])
            .await?;
        Ok(())
    }

    pub async fn ps(&self) -> Result<ContainerNames> {
        let output = self
            .execute_command(throwing_on_error(self.tool_name()), ["ps"])
            .await?;
        Ok(ContainerNames::parse_from_ps(&output))
    }

    /// Published ports of `service`. Fails if `ps <service>` prints nothing.
    pub async fn ports(&self, service: &str) -> Result<Ports> {
        let output = self
            .execute_command(
                throwing_on_error(self.tool_name()),
                ComposeCommand::new(["ps", service]),
            )
            .await?;

        if output.is_empty() {
            return Err(ComposeError::Validation(format!(
                "No container with name '{service}' found"
            )));
        }

        Ok(Ports::parse_from_ps(&output, self.host_ip))
    }

    /// Stream the logs of `container` into `sink` until the log stream closes.
    ///
    /// Returns whether the process then exited within the reap bound. Log
    /// collection is best-effort: a process that does not exit in time, or
    /// whose status cannot be read, yields `false` rather than an error.
    /// The reap bound only starts once stdout closes; a stream that never
    /// closes (e.g. a followed log) keeps this call waiting.
    pub async fn logs<W>(&self, container: &str, sink: &mut W) -> Result<bool>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let command = ComposeCommand::new(["logs", "--no-color", container]);
        let mut child = self.executable.launcher().launch(&command)?;

        // Keep stderr flowing so the child never blocks on it.
        if let Some(stderr) = child.stderr.take() {
            let container = container.to_string();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(container = %container, "logs stderr: {}", line);
                }
            });
        }

        if let Some(mut stdout) = child.stdout.take() {
            tokio::io::copy(&mut stdout, sink).await?;
        }
        sink.flush().await?;

        let reap_wait = self.executable.timeouts().reap_wait;
        match timeout(reap_wait, child.wait()).await {
            Ok(Ok(status)) => {
                debug!(container, exit_code = ?status.code(), "log collection finished");
                Ok(true)
            }
            Ok(Err(e)) => {
                warn!(container, error = %e, "could not read status of logs process");
                Ok(false)
            }
            Err(_elapsed) => {
                warn!(container, timeout = ?reap_wait, "logs process did not exit in time");
                Ok(false)
            }
        }
    }

    /// Convenience handle for one service of this environment.
    pub fn container(&self, name: impl Into<String>) -> Container<'_, L> {
        Container {
            compose: self,
            name: name.into(),
        }
    }

    /// Run `command`; on a non-zero exit, pass exit code, output and command
    /// to `handler` before returning the output.
    pub async fn execute_command<H, C>(&self, handler: H, command: C) -> Result<String>
    where
        H: Fn(i32, &str, &ComposeCommand) -> Result<()>,
        C: Into<ComposeCommand>,
    {
        let command = command.into();
        let result = self.executable.run(&command).await?;

        if !result.success() {
            handler(result.exit_code(), result.output(), &command)?;
        }

        Ok(result.into_output())
    }
}

impl<L: ProcessLauncher> ComposeOperations for DockerCompose<L> {
    fn build(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(DockerCompose::build(self))
    }

    fn up(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(DockerCompose::up(self))
    }

    fn down(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(DockerCompose::down(self))
    }

    fn kill(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(DockerCompose::kill(self))
    }

    fn rm(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(DockerCompose::rm(self))
    }

    fn ps(&self) -> BoxFuture<'_, Result<ContainerNames>> {
        Box::pin(DockerCompose::ps(self))
    }
}

/// One named service of a [`DockerCompose`] environment.
pub struct Container<'a, L> {
    compose: &'a DockerCompose<L>,
    name: String,
}

impl<L: ProcessLauncher> Container<'_, L> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn ports(&self) -> Result<Ports> {
        self.compose.ports(&self.name).await
    }

    pub async fn write_logs<W>(&self, sink: &mut W) -> Result<bool>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.compose.logs(&self.name, sink).await
    }
}
