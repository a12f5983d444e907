//! Conformance checks for workflow-state values.
//!
//! Structural conformance (closed literal sets, score range, positive round numbers) always
//! applies. The looser invariants the schema leaves to the orchestrating agent, such as
//! feedback accompanying a decision or `current_round` tracking `history`, only run when
//! enabled on the `ValidationPolicy`.

mod policy;
mod rules;

pub use policy::ValidationPolicy;

use tracing::{debug, warn};

use super::domain::{CandidateInterview, InterviewRound, ScreeningResult, State, SCORE_RANGE};

/// The single error kind raised when a value does not satisfy the workflow-state contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("missing required field `{path}`")]
    MissingField { path: String },
    #[error("`{path}` holds `{value}`, expected one of: {expected}")]
    InvalidLiteral {
        path: String,
        value: String,
        expected: String,
    },
    #[error("`{path}` out of range: {detail}")]
    OutOfRange { path: String, detail: String },
    #[error("`{path}` is inconsistent: {detail}")]
    Inconsistent { path: String, detail: String },
    #[error("malformed document at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },
}

impl SchemaViolation {
    /// Field path the violation points at, when it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            SchemaViolation::MissingField { path }
            | SchemaViolation::InvalidLiteral { path, .. }
            | SchemaViolation::OutOfRange { path, .. }
            | SchemaViolation::Inconsistent { path, .. } => Some(path),
            SchemaViolation::Malformed { .. } => None,
        }
    }
}

pub(crate) fn field_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

pub(crate) fn index_path(prefix: &str, field: &str, index: usize) -> String {
    format!("{}[{index}]", field_path(prefix, field))
}

/// Structural conformance of a record and everything nested inside it.
pub trait Conform {
    /// Append every structural violation found under `path`.
    fn check(&self, path: &str, violations: &mut Vec<SchemaViolation>);

    /// All-or-nothing conformance: the first violation rejects the whole record.
    fn conform(&self) -> Result<(), SchemaViolation> {
        let mut violations = Vec::new();
        self.check("", &mut violations);
        match violations.into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}

impl Conform for ScreeningResult {
    fn check(&self, path: &str, violations: &mut Vec<SchemaViolation>) {
        let (min, max) = SCORE_RANGE;
        if !self.score.is_finite() || self.score < min || self.score > max {
            violations.push(SchemaViolation::OutOfRange {
                path: field_path(path, "score"),
                detail: format!("{} is not within {min:.1}..={max:.1}", self.score),
            });
        }
    }
}

impl Conform for InterviewRound {
    fn check(&self, path: &str, violations: &mut Vec<SchemaViolation>) {
        if self.round_number == 0 {
            violations.push(SchemaViolation::OutOfRange {
                path: field_path(path, "round_number"),
                detail: "round numbers start at 1".to_string(),
            });
        }
    }
}

impl Conform for CandidateInterview {
    fn check(&self, path: &str, violations: &mut Vec<SchemaViolation>) {
        for (index, round) in self.history.iter().enumerate() {
            round.check(&index_path(path, "history", index), violations);
        }
    }
}

impl Conform for State {
    fn check(&self, path: &str, violations: &mut Vec<SchemaViolation>) {
        for (index, result) in self.screening_results.iter().enumerate() {
            result.check(&index_path(path, "screening_results", index), violations);
        }
        for (index, interview) in self.interviews.iter().enumerate() {
            interview.check(&index_path(path, "interviews", index), violations);
        }
    }
}

/// Applies structural conformance plus whichever opt-in checks the policy enables.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn strict() -> Self {
        Self::new(ValidationPolicy::strict())
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Reject the state on its first violation.
    pub fn validate(&self, state: &State) -> Result<(), SchemaViolation> {
        match self.violations(state).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every violation found, structural ones first.
    pub fn violations(&self, state: &State) -> Vec<SchemaViolation> {
        debug!(job_id = %state.job_id, policy = ?self.policy, "validating workflow state");

        let mut violations = Vec::new();
        state.check("", &mut violations);
        rules::apply(&self.policy, state, &mut violations);

        if !violations.is_empty() {
            warn!(
                job_id = %state.job_id,
                count = violations.len(),
                first = %violations[0],
                "workflow state failed validation"
            );
        }

        violations
    }
}
