use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::domain::{InterviewStatus, ScreeningDecision, State};

/// Count of interview records sitting in one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCountEntry {
    pub status: InterviewStatus,
    pub status_label: &'static str,
    pub candidates: usize,
}

/// Read-only digest of a workflow state, suitable as an intermediate HR report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSummary {
    pub job_id: String,
    pub resumes: usize,
    pub shortlisted: usize,
    pub rejected_at_screening: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_screening_score: Option<f64>,
    pub interview_status: Vec<StatusCountEntry>,
    pub undecided_rounds: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_slot: Option<NaiveDateTime>,
}

impl WorkflowSummary {
    pub fn from_state(state: &State) -> Self {
        let mut screening: HashMap<ScreeningDecision, usize> = HashMap::new();
        for result in &state.screening_results {
            *screening.entry(result.decision).or_default() += 1;
        }

        let mean_screening_score = if state.screening_results.is_empty() {
            None
        } else {
            let total: f64 = state.screening_results.iter().map(|result| result.score).sum();
            Some(total / state.screening_results.len() as f64)
        };

        let mut by_status: HashMap<InterviewStatus, usize> = HashMap::new();
        for interview in &state.interviews {
            *by_status.entry(interview.status).or_default() += 1;
        }

        let interview_status = InterviewStatus::ordered()
            .into_iter()
            .filter_map(|status| {
                by_status.get(&status).map(|&candidates| StatusCountEntry {
                    status,
                    status_label: status.label(),
                    candidates,
                })
            })
            .collect();

        let rounds = || state.interviews.iter().flat_map(|interview| &interview.history);
        let undecided_rounds = rounds().filter(|round| round.decision.is_none()).count();
        let latest_slot = rounds().filter_map(|round| round.slot_start()).max();

        Self {
            job_id: state.job_id.to_string(),
            resumes: state.resumes.len(),
            shortlisted: screening
                .get(&ScreeningDecision::Shortlist)
                .copied()
                .unwrap_or(0),
            rejected_at_screening: screening
                .get(&ScreeningDecision::Reject)
                .copied()
                .unwrap_or(0),
            mean_screening_score,
            interview_status,
            undecided_rounds,
            latest_slot,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Hiring summary for {}", self.job_id);
        let _ = writeln!(out, "  resumes received: {}", self.resumes);
        let _ = writeln!(
            out,
            "  screening: {} shortlisted, {} rejected",
            self.shortlisted, self.rejected_at_screening
        );
        if let Some(mean) = self.mean_screening_score {
            let _ = writeln!(out, "  mean screening score: {mean:.2}");
        }

        if self.interview_status.is_empty() {
            let _ = writeln!(out, "  interviews: none");
        } else {
            let _ = writeln!(out, "  interviews:");
            for entry in &self.interview_status {
                let _ = writeln!(out, "    {}: {}", entry.status_label, entry.candidates);
            }
        }

        let _ = writeln!(out, "  undecided rounds: {}", self.undecided_rounds);
        if let Some(slot) = self.latest_slot {
            let _ = writeln!(out, "  latest scheduled slot: {}", slot.format("%Y-%m-%d %H:%M"));
        }
        out
    }
}
