//! End-to-end checks of the workflow-state contract through the public API: construct a state
//! the way an orchestrating agent would, validate it, and move it through the JSON wire format.

use std::path::PathBuf;

use hiring_state::error::AppError;
use hiring_state::workflow::{
    decode_state, encode_state, read_state, write_state, CandidateInterview, InterviewRound,
    InterviewStatus, RoundDecision, SchemaViolation, ScreeningDecision, ScreeningResult, State,
    ValidationPolicy, Validator, WorkflowSummary,
};

fn job_42() -> State {
    let mut state = State::new("job-42", "Platform engineer");
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

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hiring-state-{}-{name}", std::process::id()))
}

#[test]
fn scenario_job_42_constructs_validates_and_round_trips() {
    let state = job_42();
    Validator::default().validate(&state).expect("valid state");

    let encoded = encode_state(&state).expect("encodes");
    let decoded = decode_state(&encoded).expect("decodes");
    assert_eq!(decoded, state);

    let interview = decoded
        .interview_for(&"c1".into())
        .expect("c1 interview present");
    assert_eq!(interview.status, InterviewStatus::PendingFirstRound);
    assert_eq!(interview.current_round, 1);
    assert!(interview.history.is_empty());
    assert!(decoded
        .screening_for(&"c1".into())
        .is_some_and(ScreeningResult::is_shortlisted));
}

#[test]
fn agent_progression_stays_valid_under_strict_policy() {
    let mut state = job_42();
    let validator = Validator::strict();

    let interview = &mut state.interviews[0];
    interview
        .history
        .push(InterviewRound::scheduled(1, "2024-05-01T10:00"));
    interview.status = InterviewStatus::WaitingFeedback;
    validator.validate(&state).expect("first round scheduled");

    let interview = &mut state.interviews[0];
    interview.history[0].feedback = Some("clear communicator".to_string());
    interview.history[0].decision = Some(RoundDecision::NextRound);
    interview.status = InterviewStatus::NextRoundPending;
    interview.current_round = 2;
    validator.validate(&state).expect("second round pending");

    let interview = &mut state.interviews[0];
    interview.history.push(InterviewRound {
        round_number: 2,
        slot: "2024-05-08T14:30".to_string(),
        feedback: Some("excellent system design".to_string()),
        decision: Some(RoundDecision::Offer),
    });
    interview.status = InterviewStatus::OfferMade;
    validator.validate(&state).expect("offer made");

    state.hr_report = WorkflowSummary::from_state(&state).render();
    assert!(state.hr_report.contains("offer_made: 1"));
    assert_eq!(
        decode_state(&encode_state(&state).expect("encodes")).expect("decodes"),
        state
    );
}

#[test]
fn undecided_and_offer_without_feedback_rounds_validate_structurally() {
    let mut state = job_42();
    state.interviews[0].history.push(InterviewRound {
        round_number: 1,
        slot: "2024-05-01T10:00".to_string(),
        feedback: None,
        decision: None,
    });
    Validator::new(ValidationPolicy::structural())
        .validate(&state)
        .expect("undecided round");

    state.interviews[0].history[0].decision = Some(RoundDecision::Offer);
    Validator::default()
        .validate(&state)
        .expect("co-occurrence is opt-in");
    assert!(Validator::strict().validate(&state).is_err());
}

#[test]
fn files_round_trip_and_bad_documents_surface_as_schema_errors() {
    let path = scratch_file("state.json");
    let state = job_42();
    write_state(&path, &state).expect("writes state");
    assert_eq!(read_state(&path).expect("reads state"), state);

    std::fs::write(&path, r#"{"job_id":"job-42"}"#).expect("writes partial document");
    match read_state(&path) {
        Err(AppError::Schema(SchemaViolation::MissingField { path })) => {
            assert_eq!(path, "job_description")
        }
        other => panic!("expected missing field, got {other:?}"),
    }

    std::fs::remove_file(&path).expect("cleanup");
    assert!(matches!(read_state(&path), Err(AppError::Io(_))));
}
