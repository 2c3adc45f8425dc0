//! Shared HTTP client construction for the service adapters.

use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while building an HTTP adapter
#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Build a `reqwest` client with an optional request timeout.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, HttpClientError> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        "review-panel/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Resolve an API key: an explicit key wins over the environment variable.
///
/// A named but unset variable is logged and treated as no key, since
/// local OpenAI-compatible servers commonly need none.
pub fn resolve_api_key(api_key: Option<&str>, api_key_env: Option<&str>) -> Option<String> {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        return Some(key.to_string());
    }

    let var = api_key_env.filter(|v| !v.trim().is_empty())?;
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Some(key),
        _ => {
            warn!("API key variable {} is not set, sending requests without a key", var);
            None
        }
    }
}

/// Reject URLs that are not http(s).
pub fn validate_url(url: &str) -> Result<(), HttpClientError> {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(())
    } else {
        Err(HttpClientError::InvalidUrl(url.to_string()))
    }
}
