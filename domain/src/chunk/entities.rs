//! Chunk entity

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Page / paragraph position of a chunk inside its document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkLocator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<String>,
}

/// A unit of text under review
///
/// # Example
///
/// ```
/// use panel_domain::Chunk;
///
/// let chunk = Chunk::new("c-1", "doc-1", 0, "Dates are disputed")
///     .unwrap()
///     .with_title("Annual History")
///     .with_predicted_label("specific date, timelines or year");
///
/// assert_eq!(chunk.predicted_label(), Some("specific date, timelines or year"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub document_id: String,
    pub index: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<ChunkLocator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_label: Option<String>,
}

impl Chunk {
    /// Create a chunk. The identifier must not be blank.
    pub fn new(
        id: impl Into<String>,
        document_id: impl Into<String>,
        index: u32,
        text: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidChunk("chunk id cannot be empty".to_string()));
        }
        Ok(Self {
            id,
            document_id: document_id.into(),
            index,
            text: text.into(),
            title: None,
            locator: None,
            predicted_label: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_locator(mut self, locator: ChunkLocator) -> Self {
        self.locator = Some(locator);
        self
    }

    pub fn with_predicted_label(mut self, label: impl Into<String>) -> Self {
        self.predicted_label = Some(label.into());
        self
    }

    pub fn predicted_label(&self) -> Option<&str> {
        self.predicted_label.as_deref()
    }

    /// Whether the chunk was labeled with the given "unrelated" category.
    pub fn is_labeled(&self, label: &str) -> bool {
        self.predicted_label() == Some(label)
    }

    pub fn page(&self) -> Option<&str> {
        self.locator.as_ref().and_then(|l| l.page.as_deref())
    }

    pub fn paragraph(&self) -> Option<&str> {
        self.locator.as_ref().and_then(|l| l.paragraph.as_deref())
    }
}
