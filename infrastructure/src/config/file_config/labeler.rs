//! Zero-shot labeler configuration from TOML (`[labeler]` section)

use panel_domain::{DEFAULT_CANDIDATE_LABELS, DEFAULT_HYPOTHESIS_TEMPLATE};
use serde::{Deserialize, Serialize};

const DEFAULT_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

/// Raw labeler configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLabelerConfig {
    /// Label unlabeled chunks before review.
    pub enabled: bool,
    pub url: String,
    pub api_key_env: Option<String>,
    pub api_key: Option<String>,
    /// Candidate labels; must include the review's unrelated label.
    pub labels: Vec<String>,
    /// Hypothesis with a `{}` placeholder for the label.
    pub hypothesis_template: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for FileLabelerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: DEFAULT_URL.to_string(),
            api_key_env: Some("HF_TOKEN".to_string()),
            api_key: None,
            labels: DEFAULT_CANDIDATE_LABELS
                .iter()
                .map(|l| l.to_string())
                .collect(),
            hypothesis_template: DEFAULT_HYPOTHESIS_TEMPLATE.to_string(),
            timeout_seconds: Some(60),
        }
    }
}
