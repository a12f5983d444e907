use crate::workflow::domain::{
    CandidateInterview, InterviewRound, InterviewStatus, RoundDecision, ScreeningDecision,
    ScreeningResult, State,
};

/// The `job-42` document: two resumes, one shortlisted candidate awaiting a first round.
pub(super) fn job_42_state() -> State {
    let mut state = State::new("job-42", "Senior backend engineer, payments platform");
    state.resumes = vec!["r1.pdf".to_string(), "r2.pdf".to_string()];
    state.screening_results = vec![ScreeningResult::new(
        "c1",
        0.82,
        ScreeningDecision::Shortlist,
        "strong match",
    )];
    state.interviews = vec![CandidateInterview::not_yet_interviewed("c1")];
    state
}

pub(super) fn decided_round(round_number: u32, decision: RoundDecision) -> InterviewRound {
    InterviewRound {
        round_number,
        slot: format!("2024-05-0{round_number}T10:00"),
        feedback: Some(format!("round {round_number} went well")),
        decision: Some(decision),
    }
}

/// A fully populated state where every opt-in invariant holds.
pub(super) fn progressed_state() -> State {
    let mut state = job_42_state();
    state.screening_results.push(ScreeningResult::new(
        "c2",
        0.64,
        ScreeningDecision::Shortlist,
        "solid fundamentals",
    ));
    state.screening_results.push(ScreeningResult::new(
        "c3",
        0.21,
        ScreeningDecision::Reject,
        "missing required experience",
    ));

    state.interviews[0] = CandidateInterview {
        candidate_id: "c1".into(),
        status: InterviewStatus::WaitingFeedback,
        current_round: 2,
        history: vec![
            decided_round(1, RoundDecision::NextRound),
            InterviewRound::scheduled(2, "2024-05-08T14:30"),
        ],
    };
    state.interviews.push(CandidateInterview {
        candidate_id: "c2".into(),
        status: InterviewStatus::OfferMade,
        current_round: 2,
        history: vec![
            decided_round(1, RoundDecision::NextRound),
            decided_round(2, RoundDecision::Offer),
        ],
    });
    state.hr_report = "c1 in second round; offer extended to c2".to_string();
    state
}
