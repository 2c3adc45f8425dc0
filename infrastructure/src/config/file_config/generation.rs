//! Generation service configuration from TOML (`[generator]` and `[evaluator]` sections)

use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/v1";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use `api_key_env` instead).
    pub api_key: Option<String>,
    pub temperature: f32,
    /// Per-request timeout.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: None,
            api_key: None,
            temperature: 0.0,
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let toml_str = r#"
[generator]
model = "qwen2.5-7b"
api_key_env = "GROQ_API_KEY"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generator.model, "qwen2.5-7b");
        assert_eq!(config.generator.api_key_env.as_deref(), Some("GROQ_API_KEY"));
        assert_eq!(config.generator.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.evaluator, FileGenerationConfig::default());
    }
}
