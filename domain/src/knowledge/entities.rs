//! Knowledge item and reference material value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One topical entry of the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub topic: String,
    pub official_narrative: String,
    pub key_points: Vec<String>,
    #[serde(default)]
    pub sensitive_aspects: Vec<String>,
    /// Discouraged term -> recommended term
    #[serde(default)]
    pub recommended_terminology: BTreeMap<String, String>,
    #[serde(default)]
    pub authoritative_sources: Vec<String>,
}

impl KnowledgeItem {
    pub fn new(
        topic: impl Into<String>,
        official_narrative: impl Into<String>,
        key_points: Vec<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            official_narrative: official_narrative.into(),
            key_points,
            sensitive_aspects: Vec::new(),
            recommended_terminology: BTreeMap::new(),
            authoritative_sources: Vec::new(),
        }
    }
}

/// Reference material resolved for one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceMaterial {
    /// Best matching knowledge item
    Found(KnowledgeItem),
    /// Lookup ran but nothing relevant came back
    NotFound,
    /// Lookup skipped because the chunk carries the given unrelated label
    NotApplicable(String),
}

impl ReferenceMaterial {
    pub fn official_narrative(&self) -> String {
        match self {
            Self::Found(item) => item.official_narrative.clone(),
            Self::NotFound => "No relevant official narrative found.".to_string(),
            Self::NotApplicable(label) => not_applicable(label),
        }
    }

    pub fn key_points(&self) -> String {
        match self {
            Self::Found(item) if !item.key_points.is_empty() => item.key_points.join(", "),
            Self::Found(_) | Self::NotFound => "No relevant key points found.".to_string(),
            Self::NotApplicable(label) => not_applicable(label),
        }
    }

    pub fn sensitive_aspects(&self) -> String {
        match self {
            Self::Found(item) if !item.sensitive_aspects.is_empty() => {
                item.sensitive_aspects.join("; ")
            }
            Self::Found(_) | Self::NotFound => "No relevant sensitive aspects found.".to_string(),
            Self::NotApplicable(label) => not_applicable(label),
        }
    }

    pub fn recommended_terminology(&self) -> String {
        match self {
            Self::Found(item) if !item.recommended_terminology.is_empty() => item
                .recommended_terminology
                .iter()
                .map(|(avoid, prefer)| format!("\"{}\" -> \"{}\"", avoid, prefer))
                .collect::<Vec<_>>()
                .join(", "),
            Self::Found(_) | Self::NotFound => {
                "No relevant recommended terminology found.".to_string()
            }
            Self::NotApplicable(label) => not_applicable(label),
        }
    }

    pub fn authoritative_sources(&self) -> String {
        match self {
            Self::Found(item) if !item.authoritative_sources.is_empty() => {
                item.authoritative_sources.join(", ")
            }
            Self::Found(_) | Self::NotFound => {
                "No relevant authoritative sources found.".to_string()
            }
            Self::NotApplicable(label) => not_applicable(label),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

fn not_applicable(label: &str) -> String {
    format!("N/A (Text classified as {})", label)
}
