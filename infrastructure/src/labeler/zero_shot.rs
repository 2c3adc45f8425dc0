//! HTTP zero-shot classification client
//!
//! Speaks the Hugging Face inference API shape for zero-shot
//! classification pipelines:
//!
//! ```text
//! POST {"inputs": text, "parameters": {"candidate_labels": [..],
//!       "hypothesis_template": "This text is about {}.", "multi_label": false}}
//! <- {"sequence": text, "labels": [..], "scores": [..]}
//! ```

use crate::config::FileLabelerConfig;
use crate::http::{HttpClientError, build_client, resolve_api_key, validate_url};
use async_trait::async_trait;
use panel_application::ports::labeler::{LabelerError, TextLabeler};
use panel_domain::LabelPrediction;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    parameters: ClassifyParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ClassifyParameters<'a> {
    candidate_labels: &'a [String],
    hypothesis_template: &'a str,
    multi_label: bool,
}

#[derive(Debug, Deserialize)]
struct Classification {
    labels: Vec<String>,
    scores: Vec<f64>,
}

/// Some deployments wrap the result in a one-element list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Single(Classification),
    Batch(Vec<Classification>),
}

impl ClassifyResponse {
    fn into_prediction(self) -> Result<LabelPrediction, LabelerError> {
        let classification = match self {
            Self::Single(c) => c,
            Self::Batch(batch) => batch
                .into_iter()
                .next()
                .ok_or_else(|| LabelerError::BadResponse("empty result list".to_string()))?,
        };

        if classification.labels.len() != classification.scores.len() {
            return Err(LabelerError::BadResponse(format!(
                "{} labels but {} scores",
                classification.labels.len(),
                classification.scores.len()
            )));
        }

        LabelPrediction::from_ranked(&classification.labels, &classification.scores)
            .ok_or_else(|| LabelerError::BadResponse("no label scores".to_string()))
    }
}

/// Zero-shot labeler backed by an HTTP inference endpoint
pub struct HttpZeroShotLabeler {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    labels: Vec<String>,
    hypothesis_template: String,
}

impl HttpZeroShotLabeler {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        labels: Vec<String>,
        hypothesis_template: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, HttpClientError> {
        let url = url.into();
        validate_url(&url)?;
        Ok(Self {
            client: build_client(timeout)?,
            url,
            api_key,
            labels,
            hypothesis_template: hypothesis_template.into(),
        })
    }

    /// Build a labeler from the `[labeler]` section.
    pub fn from_config(config: &FileLabelerConfig) -> Result<Self, HttpClientError> {
        Self::new(
            config.url.clone(),
            resolve_api_key(config.api_key.as_deref(), config.api_key_env.as_deref()),
            config.labels.clone(),
            config.hypothesis_template.clone(),
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[async_trait]
impl TextLabeler for HttpZeroShotLabeler {
    async fn classify(&self, text: &str) -> Result<Option<LabelPrediction>, LabelerError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let body = ClassifyRequest {
            inputs: text,
            parameters: ClassifyParameters {
                candidate_labels: &self.labels,
                hypothesis_template: &self.hypothesis_template,
                multi_label: false,
            },
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LabelerError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LabelerError::Unavailable(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let parsed: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| LabelerError::BadResponse(e.to_string()))?;
        let prediction = parsed.into_prediction()?;
        debug!("Labeled '{}' ({:.3})", prediction.label, prediction.score);
        Ok(Some(prediction))
    }
}
