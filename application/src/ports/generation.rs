//! Generation client port
//!
//! Defines the interface for calling a text-generation service.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while calling a generation service
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Bad response: {0}")]
    BadResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Client for a text-generation service
///
/// Reviewers hold two of these: one produces verdicts, the other grades
/// them. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Model label, for logs
    fn model(&self) -> &str;

    /// Send `prompt` and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
