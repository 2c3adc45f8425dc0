//! Text labeler port
//!
//! Defines the interface for zero-shot topical classification of chunks.

use async_trait::async_trait;
use panel_domain::LabelPrediction;
use thiserror::Error;

/// Errors that can occur during classification
#[derive(Error, Debug)]
pub enum LabelerError {
    #[error("Labeler unavailable: {0}")]
    Unavailable(String),

    #[error("Bad labeler response: {0}")]
    BadResponse(String),
}

/// Topical classifier for chunk text
#[async_trait]
pub trait TextLabeler: Send + Sync {
    /// Classify `text`. `Ok(None)` means no prediction was made.
    async fn classify(&self, text: &str) -> Result<Option<LabelPrediction>, LabelerError>;
}

/// Labeler that never predicts, leaving chunk labels untouched
pub struct NoLabeler;

#[async_trait]
impl TextLabeler for NoLabeler {
    async fn classify(&self, _text: &str) -> Result<Option<LabelPrediction>, LabelerError> {
        Ok(None)
    }
}
