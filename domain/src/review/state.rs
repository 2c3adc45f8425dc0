//! Reviewer task state machine.
//!
//! States and routing are plain data. [`next`] is a pure function of the
//! current state and the latest attempt; the application layer performs
//! the I/O for each state and feeds the result back in.

use super::verdict::Verdict;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of generation attempts per reviewer task.
///
/// Shared by all rubrics. The counter is incremented on every entry into
/// [`ReviewState::Generate`], including the first.
pub const MAX_RETRIES: u32 = 3;

/// A reviewer task's position in its review loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    /// Produce a verdict from the chunk, rubric and reference material
    Generate,
    /// Score confidence in the latest verdict
    SelfEvaluate,
    /// Decide between accept, retry and escalation
    Route,
    /// Terminal: flagged for a human reviewer
    HumanReview,
    /// Terminal: verdict accepted
    Done,
}

impl ReviewState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::HumanReview | Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::SelfEvaluate => "self_evaluate",
            Self::Route => "route",
            Self::HumanReview => "human_review",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a reviewer task ended in [`ReviewState::HumanReview`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    /// Generation output could not be parsed, or a collaborator failed
    MalformedOutput,
    /// Every attempt produced the null verdict
    NullVerdictExhausted,
    /// Confidence stayed below the rubric threshold for every attempt
    LowConfidenceExhausted,
    /// The task deadline elapsed before a terminal state
    TimedOut,
    /// The task panicked or was aborted
    TaskFailed,
}

impl EscalationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedOutput => "malformed_output",
            Self::NullVerdictExhausted => "null_verdict_exhausted",
            Self::LowConfidenceExhausted => "low_confidence_exhausted",
            Self::TimedOut => "timed_out",
            Self::TaskFailed => "task_failed",
        }
    }
}

impl fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of [`route`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Retry,
    Accept,
    Escalate(EscalationReason),
}

impl RouteDecision {
    /// State the task moves to after this decision.
    pub fn target(&self) -> ReviewState {
        match self {
            Self::Retry => ReviewState::Generate,
            Self::Accept => ReviewState::Done,
            Self::Escalate(_) => ReviewState::HumanReview,
        }
    }
}

/// Everything routing needs to know about the latest attempt.
#[derive(Debug, Clone, Copy)]
pub struct AttemptContext<'a> {
    pub verdict: &'a Verdict,
    pub confidence: u8,
    pub retries_used: u32,
    pub threshold: u8,
    pub max_retries: u32,
}

impl<'a> AttemptContext<'a> {
    pub fn new(verdict: &'a Verdict, confidence: u8, retries_used: u32, threshold: u8) -> Self {
        Self {
            verdict,
            confidence,
            retries_used,
            threshold,
            max_retries: MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn retries_left(&self) -> bool {
        self.retries_used < self.max_retries
    }
}

/// Decide what follows an attempt. The first matching rule wins:
///
/// 1. error verdict → escalate ([`EscalationReason::MalformedOutput`])
/// 2. null verdict with retries left → retry
/// 3. null verdict without retries left → escalate
/// 4. confidence at or above threshold → accept
/// 5. retries left → retry
/// 6. escalate ([`EscalationReason::LowConfidenceExhausted`])
pub fn route(ctx: &AttemptContext<'_>) -> RouteDecision {
    if ctx.verdict.is_error() {
        return RouteDecision::Escalate(EscalationReason::MalformedOutput);
    }

    if ctx.verdict.is_null() {
        return if ctx.retries_left() {
            RouteDecision::Retry
        } else {
            RouteDecision::Escalate(EscalationReason::NullVerdictExhausted)
        };
    }

    if ctx.confidence >= ctx.threshold {
        RouteDecision::Accept
    } else if ctx.retries_left() {
        RouteDecision::Retry
    } else {
        RouteDecision::Escalate(EscalationReason::LowConfidenceExhausted)
    }
}

/// Transition function of the reviewer state machine.
///
/// `ctx` describes the attempt produced while in `state`. Error verdicts
/// skip self-evaluation. Terminal states are absorbing.
pub fn next(state: ReviewState, ctx: &AttemptContext<'_>) -> ReviewState {
    match state {
        ReviewState::Generate if ctx.verdict.is_error() => ReviewState::Route,
        ReviewState::Generate => ReviewState::SelfEvaluate,
        ReviewState::SelfEvaluate => ReviewState::Route,
        ReviewState::Route => route(ctx).target(),
        ReviewState::HumanReview | ReviewState::Done => state,
    }
}
