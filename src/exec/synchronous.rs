// src/exec/synchronous.rs

//! Bounded-time execution of a single command.
//!
//! `run` launches the process, hands both output pipes to a dedicated Tokio
//! task that drains them line by line, and then waits on two bounds:
//!
//! 1. the long `output_wait` for the drain task to return the full output,
//! 2. the short `reap_wait` for the OS to report the exit status once the
//!    pipes have closed.
//!
//! The pipes are owned by the drain task for their whole life; the caller
//! only ever touches the child handle for waiting and killing.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::errors::{ComposeError, Result};
use crate::exec::{ComposeCommand, ProcessLauncher, ProcessResult};

/// Separator used to join captured output lines.
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Exit code reported when the OS gives no code (e.g. killed by a signal).
pub const UNKNOWN_EXIT_CODE: i32 = -1;

pub const DEFAULT_OUTPUT_WAIT: Duration = Duration::from_secs(12 * 60 * 60);
pub const DEFAULT_REAP_WAIT: Duration = Duration::from_secs(60);

/// Receives every output line, in emission order.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Log sink that forwards each line to `tracing` at debug level.
pub fn tracing_log_sink() -> LogSink {
    Arc::new(|line: &str| debug!(target: "compose_harness::output", "{}", line))
}

/// The two waits performed by [`SynchronousExecutable::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecTimeouts {
    /// Upper bound on output collection. Exceeding it is fatal.
    pub output_wait: Duration,
    /// Bound on process reaping after output closes. Exceeding it is not.
    pub reap_wait: Duration,
}

impl Default for ExecTimeouts {
    fn default() -> Self {
        Self {
            output_wait: DEFAULT_OUTPUT_WAIT,
            reap_wait: DEFAULT_REAP_WAIT,
        }
    }
}

pub struct SynchronousExecutable<L> {
    launcher: L,
    log_sink: LogSink,
    timeouts: ExecTimeouts,
}

impl<L: ProcessLauncher> SynchronousExecutable<L> {
    pub fn new(launcher: L, log_sink: LogSink, timeouts: ExecTimeouts) -> Self {
        Self {
            launcher,
            log_sink,
            timeouts,
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn timeouts(&self) -> ExecTimeouts {
        self.timeouts
    }

    /// Run `command` to completion and return its exit code and output.
    ///
    /// Launch failures, drain failures and an elapsed `output_wait` are
    /// returned as errors. An elapsed `reap_wait` is logged, the child is
    /// killed, and whatever status it then reports is used.
    pub async fn run(&self, command: &ComposeCommand) -> Result<ProcessResult> {
        info!(
            tool = %self.launcher.tool_name(),
            command = %command,
            "running command"
        );

        let mut child = self.launcher.launch(command)?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let sink = Arc::clone(&self.log_sink);
        let drain = tokio::spawn(drain_output(stdout, stderr, sink));

        let output = self.wait_for_output(command, drain).await?;
        let exit_code = self.reap(command, &mut child).await?;

        info!(
            tool = %self.launcher.tool_name(),
            command = %command,
            exit_code,
            "command finished"
        );

        Ok(ProcessResult::new(exit_code, output))
    }

    async fn wait_for_output(
        &self,
        command: &ComposeCommand,
        drain: JoinHandle<io::Result<String>>,
    ) -> Result<String> {
        match timeout(self.timeouts.output_wait, drain).await {
            Ok(Ok(Ok(output))) => Ok(output),
            Ok(Ok(Err(e))) => Err(ComposeError::OutputCollection {
                command: self.describe(command),
                reason: format!("reading process output: {e}"),
            }),
            Ok(Err(join_err)) => Err(ComposeError::OutputCollection {
                command: self.describe(command),
                reason: join_err.to_string(),
            }),
            Err(_elapsed) => {
                // The child keeps running and the drain task is detached.
                error!(
                    command = %command,
                    timeout = ?self.timeouts.output_wait,
                    "output did not close in time; treating environment as hung"
                );
                Err(ComposeError::OutputTimeout {
                    command: self.describe(command),
                    timeout: self.timeouts.output_wait,
                })
            }
        }
    }

    async fn reap(&self, command: &ComposeCommand, child: &mut Child) -> Result<i32> {
        let status = match timeout(self.timeouts.reap_wait, child.wait()).await {
            Ok(status) => status?,
            Err(_elapsed) => {
                warn!(
                    command = %command,
                    timeout = ?self.timeouts.reap_wait,
                    "process still running after its output closed; killing it"
                );
                if let Err(e) = child.kill().await {
                    warn!(command = %command, error = %e, "failed to kill process");
                }
                match child.try_wait()? {
                    Some(status) => status,
                    None => return Ok(UNKNOWN_EXIT_CODE),
                }
            }
        };

        Ok(status.code().unwrap_or(UNKNOWN_EXIT_CODE))
    }

    fn describe(&self, command: &ComposeCommand) -> String {
        format!("{} {}", self.launcher.tool_name(), command)
    }
}

/// Drain stdout and stderr until both close, forwarding each line to `sink`
/// and returning all lines joined by [`LINE_SEPARATOR`].
///
/// Lines from the two streams are merged in the order they arrive.
async fn drain_output(
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    sink: LogSink,
) -> io::Result<String> {
    let mut out = stdout.map(BufReader::new);
    let mut err = stderr.map(BufReader::new);
    let mut out_buf = Vec::new();
    let mut err_buf = Vec::new();
    let mut lines = Vec::new();

    while out.is_some() || err.is_some() {
        tokio::select! {
            biased;

            line = next_line(&mut out, &mut out_buf), if out.is_some() => {
                match line? {
                    Some(line) => {
                        sink(&line);
                        lines.push(line);
                    }
                    None => out = None,
                }
            }

            line = next_line(&mut err, &mut err_buf), if err.is_some() => {
                match line? {
                    Some(line) => {
                        sink(&line);
                        lines.push(line);
                    }
                    None => err = None,
                }
            }
        }
    }

    Ok(lines.join(LINE_SEPARATOR))
}

/// Read the next line from `reader`, or `None` at end of stream.
///
/// `buf` must persist across calls: `read_until` may be cancelled by the
/// surrounding `select!` after appending a partial line to it.
async fn next_line<R>(reader: &mut Option<R>, buf: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let Some(reader) = reader.as_mut() else {
        return std::future::pending().await;
    };

    let read = reader.read_until(b'\n', buf).await?;
    if read == 0 && buf.is_empty() {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    let line = String::from_utf8_lossy(buf).into_owned();
    buf.clear();
    Ok(Some(line))
}
