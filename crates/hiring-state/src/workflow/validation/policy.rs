use serde::{Deserialize, Serialize};

/// Opt-in invariants layered over structural conformance. Everything is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// A round carrying a decision must also carry feedback.
    pub require_feedback_with_decision: bool,
    /// Round numbers run 1, 2, 3... in `history` order and `current_round` tracks them.
    pub require_round_consistency: bool,
    /// At most one screening result and one interview record per candidate.
    pub require_unique_candidates: bool,
    /// Every interviewed candidate has a screening result for the same job.
    pub require_screening_reference: bool,
    /// `status` agrees with the latest round in `history`.
    pub require_status_consistency: bool,
    /// Job and candidate identifiers are not blank.
    pub require_non_empty_identifiers: bool,
}

impl ValidationPolicy {
    pub const fn structural() -> Self {
        Self {
            require_feedback_with_decision: false,
            require_round_consistency: false,
            require_unique_candidates: false,
            require_screening_reference: false,
            require_status_consistency: false,
            require_non_empty_identifiers: false,
        }
    }

    pub const fn strict() -> Self {
        Self {
            require_feedback_with_decision: true,
            require_round_consistency: true,
            require_unique_candidates: true,
            require_screening_reference: true,
            require_status_consistency: true,
            require_non_empty_identifiers: true,
        }
    }

    pub fn is_structural(&self) -> bool {
        *self == Self::structural()
    }
}
