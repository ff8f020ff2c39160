//! Command-line layer over the locale store.

use std::process::ExitCode;

use anyhow::Result;

mod args;
pub mod commands;
mod exit_status;
pub mod report;

pub use args::{Arguments, CheckCommand, Command, CommonArgs, GetCommand, InitCommand};
pub use exit_status::ExitStatus;

use commands::{check::check, get::get, init::init};

/// Run the parsed command and map its outcome to a process exit code.
pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success.into());
    };

    let status = match command {
        Command::Check(cmd) => check(cmd)?,
        Command::Get(cmd) => get(cmd)?,
        Command::Init(cmd) => init(cmd)?,
    };
    Ok(status.into())
}
