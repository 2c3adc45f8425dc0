//! Domain layer for review-panel
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Review Panel
//!
//! Every text [`Chunk`] is reviewed by a panel of independent reviewers, one
//! per [`RubricConfig`]. Each reviewer runs a small state machine
//! ([`ReviewState`]): generate a [`Verdict`], score its own confidence, then
//! accept, retry, or escalate to human review.
//!
//! ## Aggregation
//!
//! The per-rubric [`ReviewerOutcome`]s of one chunk are combined into a
//! [`ChunkReport`]. A chunk is `Complete` only when every reviewer produced
//! a consistent verdict without asking for human review.

pub mod chunk;
pub mod core;
pub mod knowledge;
pub mod prompt;
pub mod review;
pub mod rubric;

// Re-export commonly used types
pub use chunk::{
    Chunk, ChunkLocator, DEFAULT_CANDIDATE_LABELS, DEFAULT_HYPOTHESIS_TEMPLATE, LabelPrediction,
    UNRELATED_LABEL,
};
pub use core::error::DomainError;
pub use knowledge::{KnowledgeItem, ReferenceMaterial, rank_items};
pub use prompt::ReviewPromptTemplate;
pub use review::{
    Assessment, AttemptContext, ChunkReport, EscalationReason, MAX_RETRIES, Recommendation,
    ReviewState, ReviewStatus, ReviewerOutcome, RouteDecision, Verdict, VerdictError,
    VerdictShape, parse_confidence, parse_verdict,
};
pub use rubric::{MAX_CONFIDENCE, RubricConfig, RubricIssue, RubricIssueCode, RubricRecord};
