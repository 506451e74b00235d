// src/main.rs

use std::process::ExitCode;

use compose_harness::errors::ComposeError;
use compose_harness::{cli, logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("compose-harness: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("compose-harness: {err:#}");
            exit_code_for(&err)
        }
    }
}

/// Pass a failing tool's own exit code through when it fits in a byte.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<ComposeError>()
        .and_then(ComposeError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .map_or(ExitCode::FAILURE, ExitCode::from)
}
