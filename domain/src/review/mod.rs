//! Review domain: the per-rubric reviewer state machine and its results.
//!
//! # Flow
//!
//! ```text
//!            ┌──────────── Retry ─────────────┐
//!            ▼                                │
//!       ┌──────────┐   ┌──────────────┐   ┌───────┐   Accept    ┌──────┐
//! ───▶  │ Generate │──▶│ SelfEvaluate │──▶│ Route │───────────▶ │ Done │
//!       └──────────┘   └──────────────┘   └───────┘             └──────┘
//!            │  error verdict                 ▲  │  Escalate   ┌─────────────┐
//!            └────────────────────────────────┘  └───────────▶ │ HumanReview │
//!                                                              └─────────────┘
//! ```
//!
//! - [`verdict`] - typed generation output with the null-verdict predicate
//! - [`parsing`] - wire-format parsing of verdicts and confidence scores
//! - [`state`] - states, routing precedence and the pure transition function
//! - [`outcome`] - terminal result of one reviewer on one chunk
//! - [`report`] - aggregation of all outcomes for one chunk

pub mod outcome;
pub mod parsing;
pub mod report;
pub mod state;
pub mod verdict;

pub use outcome::{ReviewStatus, ReviewerOutcome};
pub use parsing::{parse_confidence, parse_verdict};
pub use report::ChunkReport;
pub use state::{
    AttemptContext, EscalationReason, MAX_RETRIES, ReviewState, RouteDecision, next, route,
};
pub use verdict::{Assessment, Recommendation, Verdict, VerdictError, VerdictShape};
