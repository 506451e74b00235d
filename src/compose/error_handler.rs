// src/compose/error_handler.rs

//! Error-handling policies applied to non-zero exits.
//!
//! A policy is any `Fn(exit_code, output, command) -> Result<()>`. Returning
//! an error fails the command; returning `Ok(())` swallows the exit and lets
//! the captured output through.

use tracing::warn;

use crate::errors::{ComposeError, Result};
use crate::exec::ComposeCommand;

/// Marker the compose tool prints for an unknown subcommand.
pub const NO_SUCH_COMMAND: &str = "No such command";

/// `'<tool> <args>' returned exit code <n>`
pub fn non_zero_exit_message(tool: &str, exit_code: i32, command: &ComposeCommand) -> String {
    format!("'{tool} {command}' returned exit code {exit_code}")
}

/// Fail on any non-zero exit, logging the message and full output first.
pub fn throwing_on_error(
    tool: &str,
) -> impl Fn(i32, &str, &ComposeCommand) -> Result<()> + Send + Sync + '_ {
    move |exit_code, output, command| {
        let message = non_zero_exit_message(tool, exit_code, command);
        warn!("{}", message);
        warn!("The output was:");
        warn!("{}", output);
        Err(ComposeError::NonZeroExit {
            message,
            exit_code,
            command: format!("{tool} {command}"),
            output: output.to_string(),
        })
    }
}

/// Like [`throwing_on_error`], except when the output says the subcommand
/// does not exist. Older compose releases have no `down`; that case is
/// logged and swallowed.
pub fn swallowing_down_command_does_not_exist(
    tool: &str,
) -> impl Fn(i32, &str, &ComposeCommand) -> Result<()> + Send + Sync + '_ {
    move |exit_code, output, command| {
        if down_command_was_present(output) {
            return throwing_on_error(tool)(exit_code, output, command);
        }

        warn!("It looks like `{tool} down` didn't work.");
        warn!("This probably means your version of {tool} doesn't support the `down` command");
        warn!("Updating to version 1.6+ of docker-compose is likely to fix this issue.");
        Ok(())
    }
}

fn down_command_was_present(output: &str) -> bool {
    !output.contains(NO_SUCH_COMMAND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throwing_policy_reports_exit_code_and_joined_args() {
        let handler = throwing_on_error("docker-compose");
        let command = ComposeCommand::from(["rm", "-f"]);

        let err = handler(2, "boom", &command).unwrap_err();

        match err {
            ComposeError::NonZeroExit {
                message,
                exit_code,
                command,
                output,
            } => {
                assert_eq!(message, "'docker-compose rm -f' returned exit code 2");
                assert_eq!(exit_code, 2);
                assert_eq!(command, "docker-compose rm -f");
                assert_eq!(output, "boom");
            }
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
    }

    #[test]
    fn down_policy_swallows_unknown_subcommand() {
        let handler = swallowing_down_command_does_not_exist("docker-compose");
        let output = "No such command: down\n\nCommands:\n  build\n  kill";

        assert!(handler(1, output, &ComposeCommand::from(["down"])).is_ok());
    }

    #[test]
    fn down_policy_throws_on_genuine_failure() {
        let handler = swallowing_down_command_does_not_exist("docker-compose");

        let err = handler(1, "network in use", &ComposeCommand::from(["down"])).unwrap_err();

        assert_eq!(
            err.to_string(),
            "'docker-compose down' returned exit code 1"
        );
        assert_eq!(err.exit_code(), Some(1));
    }
}
