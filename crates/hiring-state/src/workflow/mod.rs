//! Workflow-state contract exchanged between hiring agents.
//!
//! `State` is the aggregate root for one job opening. Screening results and interview records
//! are owned by value inside it; populating and transitioning them is the orchestrator's job.

pub mod codec;
pub mod domain;
pub mod summary;
pub mod validation;

#[cfg(test)]
mod tests;

pub use codec::{decode_state, encode_state, encode_state_pretty, read_state, write_state};
pub use domain::{
    CandidateId, CandidateInterview, InterviewRound, InterviewStatus, JobId, RoundDecision,
    ScreeningDecision, ScreeningResult, State, FIRST_ROUND, SCORE_RANGE,
};
pub use summary::{StatusCountEntry, WorkflowSummary};
pub use validation::{Conform, SchemaViolation, ValidationPolicy, Validator};

/// Alias for call sites where `State` alone would be ambiguous.
pub type WorkflowState = State;
