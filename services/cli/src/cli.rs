use crate::commands::{
    run_sample, run_summary, run_validate, SampleArgs, SummaryArgs, ValidateArgs,
};
use clap::{Parser, Subcommand};
use hiring_state::config::AppConfig;
use hiring_state::error::AppError;
use hiring_state::telemetry;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "hiring-state",
    about = "Validate and inspect hiring workflow-state documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a workflow-state document and report every violation
    Validate(ValidateArgs),
    /// Print a plain-text summary of a workflow-state document
    Summary(SummaryArgs),
    /// Emit a sample workflow-state document for job-42
    Sample(SampleArgs),
}

pub(crate) fn run() -> Result<ExitCode, AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, command = ?cli.command, "starting");

    let outcome = match cli.command {
        Command::Validate(args) => run_validate(args, &config),
        Command::Summary(args) => run_summary(args),
        Command::Sample(args) => run_sample(args),
    }?;
    Ok(outcome.into())
}
