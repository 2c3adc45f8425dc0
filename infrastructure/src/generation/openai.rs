//! OpenAI-compatible chat completions client
//!
//! Works against any server exposing `POST <base_url>/chat/completions`
//! (OpenAI, vLLM, llama.cpp server, Groq, ...).

use crate::config::FileGenerationConfig;
use crate::http::{HttpClientError, build_client, resolve_api_key, validate_url};
use async_trait::async_trait;
use panel_application::ports::generation::{GenerationClient, GenerationError};
use panel_domain::core::string::truncate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Result<String, GenerationError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerationError::BadResponse("response has no message content".into()))
    }
}

/// Generation client for OpenAI-compatible chat completion endpoints
pub struct OpenAiGenerationClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl OpenAiGenerationClient {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
        temperature: f32,
        timeout: Option<Duration>,
    ) -> Result<Self, HttpClientError> {
        validate_url(base_url)?;
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: Self::endpoint(base_url),
            model: model.into(),
            api_key,
            temperature,
        })
    }

    /// Build a client from a `[generator]` or `[evaluator]` section.
    pub fn from_config(config: &FileGenerationConfig) -> Result<Self, HttpClientError> {
        Self::new(
            &config.base_url,
            config.model.clone(),
            resolve_api_key(config.api_key.as_deref(), config.api_key_env.as_deref()),
            config.temperature,
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    fn endpoint(base_url: &str) -> String {
        format!("{}/chat/completions", base_url.trim().trim_end_matches('/'))
    }

    fn map_transport_error(e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout
        } else if e.is_connect() {
            GenerationError::ConnectionError(e.to_string())
        } else {
            GenerationError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl GenerationClient for OpenAiGenerationClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(model = %self.model, bytes = prompt.len(), "POST {}", self.endpoint);
        let response = request.send().await.map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::RequestFailed(format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                truncate(text.trim(), ERROR_BODY_PREVIEW)
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::BadResponse(e.to_string()))?;
        parsed.into_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joining() {
        assert_eq!(
            OpenAiGenerationClient::endpoint("http://localhost:8000/v1"),
            "http://localhost:8000/v1/chat/completions"
        );
        assert_eq!(
            OpenAiGenerationClient::endpoint("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "llama-3.1-8b-instant",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.0,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert_eq!(json["temperature"], 0.0);
    }

    #[test]
    fn test_response_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"id": "x", "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"confidence\": 80}"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_content().unwrap(), r#"{"confidence": 80}"#);
    }

    #[test]
    fn test_response_without_content() {
        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            empty.into_content(),
            Err(GenerationError::BadResponse(_))
        ));

        let null: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(null.into_content().is_err());
    }

    #[test]
    fn test_from_config() {
        let config = FileGenerationConfig::default();
        let client = OpenAiGenerationClient::from_config(&config).unwrap();
        assert_eq!(client.model(), config.model);

        let bad = FileGenerationConfig {
            base_url: "not a url".to_string(),
            ..FileGenerationConfig::default()
        };
        assert!(OpenAiGenerationClient::from_config(&bad).is_err());
    }
}
