use clap::Args;
use hiring_state::config::AppConfig;
use hiring_state::error::AppError;
use hiring_state::workflow::{
    decode_state, encode_state, encode_state_pretty, read_state, CandidateInterview,
    ScreeningDecision, ScreeningResult, State, ValidationPolicy, Validator, WorkflowSummary,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Clean,
    Violations,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Clean => ExitCode::SUCCESS,
            Outcome::Violations => ExitCode::FAILURE,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Path to a JSON workflow-state document
    pub(crate) file: PathBuf,
    /// Enable every opt-in consistency check regardless of configuration
    #[arg(long)]
    pub(crate) strict: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// Path to a JSON workflow-state document
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SampleArgs {
    /// Pretty-print the document
    #[arg(long)]
    pub(crate) pretty: bool,
}

pub(crate) fn run_validate(
    args: ValidateArgs,
    config: &AppConfig,
) -> Result<Outcome, AppError> {
    let policy = if args.strict {
        ValidationPolicy::strict()
    } else {
        config.validation
    };

    let raw = fs::read_to_string(&args.file)?;
    let state = match decode_state(&raw) {
        Ok(state) => state,
        Err(violation) => {
            println!("{}: {violation}", args.file.display());
            return Ok(Outcome::Violations);
        }
    };

    let violations = Validator::new(policy).violations(&state);
    info!(
        job_id = %state.job_id,
        violations = violations.len(),
        "validated workflow state"
    );

    if violations.is_empty() {
        println!("{}: ok", args.file.display());
        return Ok(Outcome::Clean);
    }

    for violation in &violations {
        println!("{}: {violation}", args.file.display());
    }
    Ok(Outcome::Violations)
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<Outcome, AppError> {
    let state = read_state(&args.file)?;
    print!("{}", WorkflowSummary::from_state(&state).render());
    Ok(Outcome::Clean)
}

pub(crate) fn run_sample(args: SampleArgs) -> Result<Outcome, AppError> {
    let state = sample_state();
    let encoded = if args.pretty {
        encode_state_pretty(&state)?
    } else {
        encode_state(&state)?
    };
    println!("{encoded}");
    Ok(Outcome::Clean)
}

fn sample_state() -> State {
    let mut state = State::new("job-42", "Backend engineer for the hiring platform");
    state.resumes = vec!["r1.pdf".to_string(), "r2.pdf".to_string()];
    state.screening_results.push(ScreeningResult::new(
        "c1",
        0.82,
        ScreeningDecision::Shortlist,
        "strong match",
    ));
    state
        .interviews
        .push(CandidateInterview::not_yet_interviewed("c1"));
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiring_state::config::{AppEnvironment, TelemetryConfig};
    use hiring_state::workflow::{write_state, InterviewRound, InterviewStatus, RoundDecision};
    use std::path::Path;

    fn config(validation: ValidationPolicy) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            validation,
        }
    }

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hiring-state-cli-{}-{name}", std::process::id()))
    }

    /// Structurally valid, but the offer was recorded without feedback.
    fn offer_without_feedback() -> State {
        let mut state = sample_state();
        let interview = &mut state.interviews[0];
        interview.status = InterviewStatus::OfferMade;
        interview.history.push(InterviewRound {
            round_number: 1,
            slot: "2024-05-01T10:00".to_string(),
            feedback: None,
            decision: Some(RoundDecision::Offer),
        });
        state
    }

    fn validate(file: &Path, strict: bool, policy: ValidationPolicy) -> Outcome {
        let args = ValidateArgs {
            file: file.to_path_buf(),
            strict,
        };
        run_validate(args, &config(policy)).expect("validate runs")
    }

    #[test]
    fn sample_state_is_strictly_valid_and_decodes_back() {
        let state = sample_state();
        Validator::strict().validate(&state).expect("strictly valid");
        let encoded = encode_state(&state).expect("encodes");
        assert_eq!(decode_state(&encoded).expect("decodes"), state);
    }

    #[test]
    fn validate_reports_clean_sample() {
        let path = scratch_file("clean.json");
        write_state(&path, &sample_state()).expect("writes state");

        assert_eq!(
            validate(&path, false, ValidationPolicy::structural()),
            Outcome::Clean
        );
        assert_eq!(
            validate(&path, true, ValidationPolicy::structural()),
            Outcome::Clean
        );
        std::fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn strict_flag_overrides_configured_policy() {
        let path = scratch_file("offer.json");
        write_state(&path, &offer_without_feedback()).expect("writes state");

        assert_eq!(
            validate(&path, false, ValidationPolicy::structural()),
            Outcome::Clean
        );
        assert_eq!(
            validate(&path, true, ValidationPolicy::structural()),
            Outcome::Violations
        );
        assert_eq!(
            validate(&path, false, ValidationPolicy::strict()),
            Outcome::Violations
        );
        std::fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn validate_flags_undecodable_documents() {
        let path = scratch_file("bad.json");
        std::fs::write(&path, r#"{"job_id":"job-42","status":"hired"}"#).expect("writes");

        assert_eq!(
            validate(&path, false, ValidationPolicy::structural()),
            Outcome::Violations
        );
        std::fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn summary_reads_documents_and_surfaces_io_errors() {
        let path = scratch_file("summary.json");
        write_state(&path, &sample_state()).expect("writes state");
        let outcome = run_summary(SummaryArgs { file: path.clone() }).expect("summary runs");
        assert_eq!(outcome, Outcome::Clean);
        std::fs::remove_file(&path).expect("cleanup");

        match run_summary(SummaryArgs { file: path }) {
            Err(AppError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn outcomes_map_to_process_exit_codes() {
        assert_eq!(
            format!("{:?}", ExitCode::from(Outcome::Clean)),
            format!("{:?}", ExitCode::SUCCESS)
        );
        assert_eq!(
            format!("{:?}", ExitCode::from(Outcome::Violations)),
            format!("{:?}", ExitCode::FAILURE)
        );
    }
}
