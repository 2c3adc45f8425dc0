//! Rubric record validation issues.

use std::fmt;

/// Identifies a specific rubric record problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricIssueCode {
    MissingName,
    MissingCriteria,
    MissingGuidelines,
    MissingThreshold,
    /// Threshold outside 0..=100
    ThresholdOutOfRange,
}

/// A detected problem in one rubric record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubricIssue {
    pub code: RubricIssueCode,
    pub message: String,
}

impl RubricIssue {
    pub fn new(code: RubricIssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for RubricIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
