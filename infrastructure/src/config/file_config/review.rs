//! Review configuration from TOML (`[review]` section)

use panel_application::ReviewParams;
use panel_domain::{MAX_RETRIES, UNRELATED_LABEL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw review configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    /// Generation attempts per reviewer task.
    pub max_retries: u32,
    /// Deadline per reviewer task. No deadline when unset.
    pub reviewer_timeout_seconds: Option<u64>,
    /// Label for chunks unrelated to any policy topic.
    pub unrelated_label: String,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            reviewer_timeout_seconds: Some(300),
            unrelated_label: UNRELATED_LABEL.to_string(),
        }
    }
}

impl FileReviewConfig {
    pub fn to_review_params(&self) -> ReviewParams {
        ReviewParams::default()
            .with_max_retries(self.max_retries)
            .with_reviewer_timeout(self.reviewer_timeout_seconds.map(Duration::from_secs))
            .with_unrelated_label(self.unrelated_label.clone())
    }
}
