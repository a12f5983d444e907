mod cli;
mod commands;

use hiring_state::error::AppError;
use std::process::ExitCode;

pub fn run() -> Result<ExitCode, AppError> {
    cli::run()
}
