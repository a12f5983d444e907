use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::validation::SchemaViolation;

/// Round number assigned to the first interview of every candidate.
pub const FIRST_ROUND: u32 = 1;

/// Inclusive bounds of `ScreeningResult::score`.
pub const SCORE_RANGE: (f64, f64) = (0.0, 1.0);

const SLOT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Opaque candidate identifier shared by screening results and interviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque identifier of the job opening a `State` belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Terminal outcome of resume screening. There is no pending state at this stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningDecision {
    Shortlist,
    Reject,
}

impl ScreeningDecision {
    pub const fn label(self) -> &'static str {
        match self {
            ScreeningDecision::Shortlist => "shortlist",
            ScreeningDecision::Reject => "reject",
        }
    }

    pub const fn ordered() -> [Self; 2] {
        [ScreeningDecision::Shortlist, ScreeningDecision::Reject]
    }
}

/// Outcome recorded against a single interview round once it has been evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundDecision {
    NextRound,
    Reject,
    Offer,
}

impl RoundDecision {
    pub const fn label(self) -> &'static str {
        match self {
            RoundDecision::NextRound => "next_round",
            RoundDecision::Reject => "reject",
            RoundDecision::Offer => "offer",
        }
    }

    pub const fn ordered() -> [Self; 3] {
        [
            RoundDecision::NextRound,
            RoundDecision::Reject,
            RoundDecision::Offer,
        ]
    }
}

/// Pipeline stage of a candidate.
///
/// The expected progression is `pending_first_round -> waiting_feedback -> next_round_pending`,
/// looping back to `waiting_feedback` for every further round, and ending in `rejected` or
/// `offer_made`. Transitions are driven by the orchestrating agent; nothing here enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    PendingFirstRound,
    WaitingFeedback,
    NextRoundPending,
    Rejected,
    OfferMade,
}

impl InterviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewStatus::PendingFirstRound => "pending_first_round",
            InterviewStatus::WaitingFeedback => "waiting_feedback",
            InterviewStatus::NextRoundPending => "next_round_pending",
            InterviewStatus::Rejected => "rejected",
            InterviewStatus::OfferMade => "offer_made",
        }
    }

    pub const fn ordered() -> [Self; 5] {
        [
            InterviewStatus::PendingFirstRound,
            InterviewStatus::WaitingFeedback,
            InterviewStatus::NextRoundPending,
            InterviewStatus::Rejected,
            InterviewStatus::OfferMade,
        ]
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, InterviewStatus::Rejected | InterviewStatus::OfferMade)
    }
}

fn parse_literal<T: Copy>(
    raw: &str,
    field: &str,
    variants: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, SchemaViolation> {
    variants
        .iter()
        .copied()
        .find(|variant| label(*variant) == raw)
        .ok_or_else(|| SchemaViolation::InvalidLiteral {
            path: field.to_string(),
            value: raw.to_string(),
            expected: variants
                .iter()
                .map(|variant| label(*variant))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

impl FromStr for ScreeningDecision {
    type Err = SchemaViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_literal(raw, "decision", &Self::ordered(), Self::label)
    }
}

impl FromStr for RoundDecision {
    type Err = SchemaViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_literal(raw, "decision", &Self::ordered(), Self::label)
    }
}

impl FromStr for InterviewStatus {
    type Err = SchemaViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_literal(raw, "status", &Self::ordered(), Self::label)
    }
}

impl fmt::Display for ScreeningDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for RoundDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Nullable fields must still be present on the wire; `null` is the only way to express absence.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Outcome of screening one candidate's resume against the job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreeningResult {
    pub candidate_id: CandidateId,
    /// Normalised score within `SCORE_RANGE`.
    pub score: f64,
    pub decision: ScreeningDecision,
    pub reasons: String,
}

impl ScreeningResult {
    pub fn new(
        candidate_id: impl Into<String>,
        score: f64,
        decision: ScreeningDecision,
        reasons: impl Into<String>,
    ) -> Self {
        Self {
            candidate_id: CandidateId::new(candidate_id),
            score,
            decision,
            reasons: reasons.into(),
        }
    }

    pub fn is_shortlisted(&self) -> bool {
        self.decision == ScreeningDecision::Shortlist
    }
}

/// A single scheduled or conducted interview round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterviewRound {
    pub round_number: u32,
    /// Free-text scheduling token, kept exactly as supplied.
    pub slot: String,
    #[serde(deserialize_with = "nullable")]
    pub feedback: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub decision: Option<RoundDecision>,
}

impl InterviewRound {
    /// An undecided round with neither feedback nor decision recorded.
    pub fn scheduled(round_number: u32, slot: impl Into<String>) -> Self {
        Self {
            round_number,
            slot: slot.into(),
            feedback: None,
            decision: None,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.feedback.is_some() || self.decision.is_some()
    }

    /// Best-effort reading of the slot as a wall-clock timestamp.
    ///
    /// Offsets in RFC 3339 slots are dropped, keeping the local time as written. Slots that are
    /// not timestamps (e.g. `"tuesday-am"`) yield `None`.
    pub fn slot_start(&self) -> Option<NaiveDateTime> {
        let raw = self.slot.trim();
        if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(stamp.naive_local());
        }

        SLOT_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    }
}

/// A candidate's interview trajectory; `history` is kept in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateInterview {
    pub candidate_id: CandidateId,
    pub status: InterviewStatus,
    pub current_round: u32,
    pub history: Vec<InterviewRound>,
}

impl CandidateInterview {
    /// The "not yet interviewed" representation: round one pending, empty history.
    pub fn not_yet_interviewed(candidate_id: impl Into<String>) -> Self {
        Self {
            candidate_id: CandidateId::new(candidate_id),
            status: InterviewStatus::PendingFirstRound,
            current_round: FIRST_ROUND,
            history: Vec::new(),
        }
    }

    pub fn latest_round(&self) -> Option<&InterviewRound> {
        self.history.last()
    }
}

/// Aggregate workflow state for one job opening. Every nested record is owned by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct State {
    pub job_id: JobId,
    pub job_description: String,
    /// Resume references (file paths or identifiers), in intake order.
    pub resumes: Vec<String>,
    pub screening_results: Vec<ScreeningResult>,
    pub interviews: Vec<CandidateInterview>,
    pub hr_report: String,
}

impl State {
    pub fn new(job_id: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            job_id: JobId::new(job_id),
            job_description: job_description.into(),
            resumes: Vec::new(),
            screening_results: Vec::new(),
            interviews: Vec::new(),
            hr_report: String::new(),
        }
    }

    pub fn screening_for(&self, candidate_id: &CandidateId) -> Option<&ScreeningResult> {
        self.screening_results
            .iter()
            .find(|result| &result.candidate_id == candidate_id)
    }

    pub fn interview_for(&self, candidate_id: &CandidateId) -> Option<&CandidateInterview> {
        self.interviews
            .iter()
            .find(|interview| &interview.candidate_id == candidate_id)
    }
}
