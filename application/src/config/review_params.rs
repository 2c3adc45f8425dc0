//! Review parameters - reviewer task control.
//!
//! [`ReviewParams`] groups the static parameters shared by every reviewer
//! task of a run. These are application-layer concerns, not domain policy.

use panel_domain::{MAX_RETRIES, UNRELATED_LABEL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reviewer task control parameters.
///
/// Used by [`ReviewerTask`](crate::use_cases::run_reviewer::ReviewerTask)
/// and [`ProcessChunksUseCase`](crate::use_cases::process_chunks::ProcessChunksUseCase).
/// Chunks are always reviewed one at a time; reviewers within a chunk run
/// concurrently without limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewParams {
    /// Maximum generation attempts per reviewer task.
    pub max_retries: u32,
    /// Deadline for a whole reviewer task, across all attempts.
    pub reviewer_timeout: Option<Duration>,
    /// Label marking chunks unrelated to any policy topic.
    pub unrelated_label: String,
}

impl Default for ReviewParams {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            reviewer_timeout: Some(Duration::from_secs(300)),
            unrelated_label: UNRELATED_LABEL.to_string(),
        }
    }
}

impl ReviewParams {
    // ==================== Builder Methods ====================

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_reviewer_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.reviewer_timeout = timeout;
        self
    }

    pub fn with_unrelated_label(mut self, label: impl Into<String>) -> Self {
        self.unrelated_label = label.into();
        self
    }
}
