//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No rubrics configured for the review panel")]
    NoRubrics,

    #[error("Duplicate rubric name: {0}")]
    DuplicateRubric(String),

    #[error("Invalid rubric '{name}': {}", issues.join(", "))]
    InvalidRubric { name: String, issues: Vec<String> },

    #[error("Invalid chunk: {0}")]
    InvalidChunk(String),
}

impl DomainError {
    /// Whether this error must stop a run before any chunk is processed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::NoRubrics)
    }
}
