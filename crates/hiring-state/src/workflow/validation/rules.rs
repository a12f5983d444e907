use std::collections::HashSet;

use super::super::domain::{CandidateInterview, InterviewStatus, RoundDecision, State, FIRST_ROUND};
use super::policy::ValidationPolicy;
use super::{field_path, index_path, SchemaViolation};

pub(crate) fn apply(
    policy: &ValidationPolicy,
    state: &State,
    violations: &mut Vec<SchemaViolation>,
) {
    if policy.require_non_empty_identifiers {
        non_empty_identifiers(state, violations);
    }
    if policy.require_unique_candidates {
        unique_candidates(state, violations);
    }
    if policy.require_screening_reference {
        screening_references(state, violations);
    }

    for (index, interview) in state.interviews.iter().enumerate() {
        let path = index_path("", "interviews", index);
        if policy.require_feedback_with_decision {
            feedback_with_decision(&path, interview, violations);
        }
        if policy.require_round_consistency {
            round_consistency(&path, interview, violations);
        }
        if policy.require_status_consistency {
            status_consistency(&path, interview, violations);
        }
    }
}

fn inconsistent(path: String, detail: impl Into<String>) -> SchemaViolation {
    SchemaViolation::Inconsistent {
        path,
        detail: detail.into(),
    }
}

fn non_empty_identifiers(state: &State, violations: &mut Vec<SchemaViolation>) {
    if state.job_id.as_str().trim().is_empty() {
        violations.push(inconsistent("job_id".to_string(), "identifier is blank"));
    }

    let screening = state
        .screening_results
        .iter()
        .enumerate()
        .map(|(index, result)| (index_path("", "screening_results", index), &result.candidate_id));
    let interviews = state
        .interviews
        .iter()
        .enumerate()
        .map(|(index, interview)| (index_path("", "interviews", index), &interview.candidate_id));

    for (path, candidate_id) in screening.chain(interviews) {
        if candidate_id.as_str().trim().is_empty() {
            violations.push(inconsistent(
                field_path(&path, "candidate_id"),
                "identifier is blank",
            ));
        }
    }
}

fn unique_candidates(state: &State, violations: &mut Vec<SchemaViolation>) {
    let mut seen = HashSet::new();
    for (index, result) in state.screening_results.iter().enumerate() {
        if !seen.insert(&result.candidate_id) {
            violations.push(inconsistent(
                field_path(&index_path("", "screening_results", index), "candidate_id"),
                format!("duplicate screening result for candidate `{}`", result.candidate_id),
            ));
        }
    }

    let mut seen = HashSet::new();
    for (index, interview) in state.interviews.iter().enumerate() {
        if !seen.insert(&interview.candidate_id) {
            violations.push(inconsistent(
                field_path(&index_path("", "interviews", index), "candidate_id"),
                format!("duplicate interview record for candidate `{}`", interview.candidate_id),
            ));
        }
    }
}

fn screening_references(state: &State, violations: &mut Vec<SchemaViolation>) {
    let screened: HashSet<_> = state
        .screening_results
        .iter()
        .map(|result| &result.candidate_id)
        .collect();

    for (index, interview) in state.interviews.iter().enumerate() {
        if !screened.contains(&interview.candidate_id) {
            violations.push(inconsistent(
                field_path(&index_path("", "interviews", index), "candidate_id"),
                format!("candidate `{}` has no screening result", interview.candidate_id),
            ));
        }
    }
}

fn feedback_with_decision(
    path: &str,
    interview: &CandidateInterview,
    violations: &mut Vec<SchemaViolation>,
) {
    for (index, round) in interview.history.iter().enumerate() {
        if let (Some(decision), None) = (round.decision, &round.feedback) {
            violations.push(inconsistent(
                field_path(&index_path(path, "history", index), "feedback"),
                format!("decision `{decision}` recorded without feedback"),
            ));
        }
    }
}

fn round_consistency(
    path: &str,
    interview: &CandidateInterview,
    violations: &mut Vec<SchemaViolation>,
) {
    for (index, round) in interview.history.iter().enumerate() {
        let expected = FIRST_ROUND + index as u32;
        if round.round_number != expected {
            violations.push(inconsistent(
                field_path(&index_path(path, "history", index), "round_number"),
                format!("expected round {expected}, found {}", round.round_number),
            ));
        }
    }

    let current_path = field_path(path, "current_round");
    match interview.history.iter().map(|round| round.round_number).max() {
        None if interview.current_round != FIRST_ROUND => violations.push(inconsistent(
            current_path,
            format!(
                "no rounds recorded, expected {FIRST_ROUND}, found {}",
                interview.current_round
            ),
        )),
        Some(highest)
            if interview.current_round != highest
                && interview.current_round != highest.saturating_add(1) =>
        {
            violations.push(inconsistent(
                current_path,
                format!(
                    "highest recorded round is {highest}, found {}",
                    interview.current_round
                ),
            ))
        }
        _ => {}
    }
}

fn status_consistency(
    path: &str,
    interview: &CandidateInterview,
    violations: &mut Vec<SchemaViolation>,
) {
    let allowed: &[InterviewStatus] = match interview.latest_round() {
        None => &[InterviewStatus::PendingFirstRound],
        Some(round) => match round.decision {
            Some(RoundDecision::Reject) => &[InterviewStatus::Rejected],
            Some(RoundDecision::Offer) => &[InterviewStatus::OfferMade],
            Some(RoundDecision::NextRound) => &[InterviewStatus::NextRoundPending],
            None if round.round_number == FIRST_ROUND => &[
                InterviewStatus::PendingFirstRound,
                InterviewStatus::WaitingFeedback,
            ],
            None => &[
                InterviewStatus::WaitingFeedback,
                InterviewStatus::NextRoundPending,
            ],
        },
    };

    if !allowed.contains(&interview.status) {
        let expected = allowed
            .iter()
            .map(|status| status.label())
            .collect::<Vec<_>>()
            .join(" or ");
        violations.push(inconsistent(
            field_path(path, "status"),
            format!(
                "`{}` does not match the latest round, expected {expected}",
                interview.status
            ),
        ));
    }
}
