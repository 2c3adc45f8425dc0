//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod generation;
mod knowledge_base;
mod labeler;
mod review;
mod storage;

pub use generation::FileGenerationConfig;
pub use knowledge_base::FileKnowledgeBaseConfig;
pub use labeler::FileLabelerConfig;
pub use review::FileReviewConfig;
pub use storage::FileStorageConfig;

use panel_domain::RubricRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration problem that prevents a run from starting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("[{section}] timeout must be greater than zero")]
    InvalidTimeout { section: String },

    #[error("[{section}] model name cannot be empty")]
    EmptyModelName { section: String },

    #[error("[{section}] base URL cannot be empty")]
    EmptyBaseUrl { section: String },

    #[error("[review] max_retries must be at least 1")]
    NoAttempts,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Verdict generation service
    pub generator: FileGenerationConfig,
    /// Confidence self-evaluation service
    pub evaluator: FileGenerationConfig,
    /// Zero-shot chunk labeler
    pub labeler: FileLabelerConfig,
    /// Reference knowledge
    pub knowledge_base: FileKnowledgeBaseConfig,
    /// Reviewer task control
    pub review: FileReviewConfig,
    /// Chunk and result files
    pub storage: FileStorageConfig,
    /// Rubric records, in registration order
    pub rubrics: Vec<RubricRecord>,
}

fn check_timeout(section: &str, seconds: Option<u64>, errors: &mut Vec<ConfigValidationError>) {
    if seconds == Some(0) {
        errors.push(ConfigValidationError::InvalidTimeout {
            section: section.to_string(),
        });
    }
}

fn check_generation(
    section: &str,
    config: &FileGenerationConfig,
    errors: &mut Vec<ConfigValidationError>,
) {
    if config.base_url.trim().is_empty() {
        errors.push(ConfigValidationError::EmptyBaseUrl {
            section: section.to_string(),
        });
    }
    if config.model.trim().is_empty() {
        errors.push(ConfigValidationError::EmptyModelName {
            section: section.to_string(),
        });
    }
    check_timeout(section, config.timeout_seconds, errors);
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected errors.
    ///
    /// Rubric records are not checked here; the reviewer pool skips
    /// invalid ones and fails only when none remain.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        check_generation("generator", &self.generator, &mut errors);
        check_generation("evaluator", &self.evaluator, &mut errors);

        if self.labeler.enabled {
            if self.labeler.url.trim().is_empty() {
                errors.push(ConfigValidationError::EmptyBaseUrl {
                    section: "labeler".to_string(),
                });
            }
            check_timeout("labeler", self.labeler.timeout_seconds, &mut errors);
        }

        check_timeout("review", self.review.reviewer_timeout_seconds, &mut errors);
        if self.review.max_retries == 0 {
            errors.push(ConfigValidationError::NoAttempts);
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[generator]
base_url = "https://api.groq.com/openai/v1"
model = "llama-3.1-8b-instant"
api_key_env = "GROQ_API_KEY"

[evaluator]
model = "llama-3.3-70b"
temperature = 0.2

[labeler]
enabled = true
labels = ["history", "general or unrelated text"]

[knowledge_base]
path = "kb.json"
limit = 5

[review]
reviewer_timeout_seconds = 60

[storage]
chunks = "data/chunks.jsonl"

[[rubrics]]
name = "FactCheck"
criteria = "Flag statements contradicting established facts."
guidelines = "Quote the exact sentence."
confidence_threshold = 85
always_consult = true

[[rubrics]]
name = "Tone"
enabled = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generator.api_key_env.as_deref(), Some("GROQ_API_KEY"));
        assert_eq!(config.evaluator.model, "llama-3.3-70b");
        assert!((config.evaluator.temperature - 0.2).abs() < f32::EPSILON);
        assert!(config.labeler.enabled);
        assert_eq!(config.labeler.labels.len(), 2);
        assert_eq!(config.knowledge_base.limit, 5);
        assert_eq!(config.review.reviewer_timeout_seconds, Some(60));
        assert_eq!(config.review.max_retries, 3);
        assert_eq!(
            config.storage.chunks,
            std::path::PathBuf::from("data/chunks.jsonl")
        );
        assert_eq!(
            config.storage.results,
            std::path::PathBuf::from("results.jsonl")
        );

        assert_eq!(config.rubrics.len(), 2);
        assert_eq!(config.rubrics[0].confidence_threshold, Some(85));
        assert!(config.rubrics[0].always_consult);
        assert!(config.rubrics[0].enabled);
        assert!(!config.rubrics[1].enabled);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.rubrics.is_empty());
        assert!(!config.labeler.enabled);
        assert!(config.knowledge_base.path.is_none());
        assert_eq!(config.generator, config.evaluator);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_error() {
        let mut config = FileConfig::default();
        config.generator.model = "  ".to_string();
        config.evaluator.base_url = String::new();
        config.evaluator.timeout_seconds = Some(0);
        config.review.reviewer_timeout_seconds = Some(0);
        config.review.max_retries = 0;

        let errors = config.validate();
        assert_eq!(
            errors,
            vec![
                ConfigValidationError::EmptyModelName {
                    section: "generator".to_string()
                },
                ConfigValidationError::EmptyBaseUrl {
                    section: "evaluator".to_string()
                },
                ConfigValidationError::InvalidTimeout {
                    section: "evaluator".to_string()
                },
                ConfigValidationError::InvalidTimeout {
                    section: "review".to_string()
                },
                ConfigValidationError::NoAttempts,
            ]
        );
    }

    #[test]
    fn test_disabled_labeler_not_validated() {
        let mut config = FileConfig::default();
        config.labeler.url = String::new();
        assert!(config.validate().is_empty());

        config.labeler.enabled = true;
        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::EmptyBaseUrl {
                section: "labeler".to_string()
            }]
        );
    }

    #[test]
    fn test_error_display() {
        let err = ConfigValidationError::InvalidTimeout {
            section: "generator".to_string(),
        };
        assert_eq!(err.to_string(), "[generator] timeout must be greater than zero");
    }
}
