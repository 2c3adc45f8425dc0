//! Terminal result of one reviewer task on one chunk.

use super::state::{EscalationReason, ReviewState};
use super::verdict::{Verdict, VerdictShape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion status of a rubric entry or a whole chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewStatus {
    Complete,
    Pending,
}

impl ReviewStatus {
    /// `Complete` only for a consistent verdict that needs no human review.
    pub fn evaluate(verdict: &Verdict, human_review: bool) -> Self {
        if !human_review && verdict.shape() == VerdictShape::Consistent {
            Self::Complete
        } else {
            Self::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Pending => "Pending",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What one reviewer concluded about one chunk.
///
/// Built once, when the reviewer's state machine reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerOutcome {
    rubric: String,
    verdict: Verdict,
    confidence: u8,
    retries: u32,
    human_review: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    escalation: Option<EscalationReason>,
    status: ReviewStatus,
}

impl ReviewerOutcome {
    /// Outcome of a task that reached [`ReviewState::Done`].
    pub fn accepted(
        rubric: impl Into<String>,
        verdict: Verdict,
        confidence: u8,
        retries: u32,
    ) -> Self {
        let status = ReviewStatus::evaluate(&verdict, false);
        Self {
            rubric: rubric.into(),
            verdict,
            confidence,
            retries,
            human_review: false,
            escalation: None,
            status,
        }
    }

    /// Outcome of a task that reached [`ReviewState::HumanReview`].
    pub fn escalated(
        rubric: impl Into<String>,
        verdict: Verdict,
        confidence: u8,
        retries: u32,
        reason: EscalationReason,
    ) -> Self {
        Self {
            rubric: rubric.into(),
            verdict,
            confidence,
            retries,
            human_review: true,
            escalation: Some(reason),
            status: ReviewStatus::Pending,
        }
    }

    /// Placeholder for a rubric whose task produced no outcome.
    pub fn task_failed(rubric: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::escalated(
            rubric,
            Verdict::error(reason),
            0,
            0,
            EscalationReason::TaskFailed,
        )
    }

    pub fn rubric(&self) -> &str {
        &self.rubric
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn human_review(&self) -> bool {
        self.human_review
    }

    pub fn escalation(&self) -> Option<EscalationReason> {
        self.escalation
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn final_state(&self) -> ReviewState {
        if self.human_review {
            ReviewState::HumanReview
        } else {
            ReviewState::Done
        }
    }
}
