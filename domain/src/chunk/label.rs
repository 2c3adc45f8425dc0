//! Topical labels assigned to chunks by the zero-shot labeler.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label that marks a chunk as off-topic for reference lookups.
pub const UNRELATED_LABEL: &str = "general or unrelated text";

/// Hypothesis template for zero-shot classification.
pub const DEFAULT_HYPOTHESIS_TEMPLATE: &str = "This text is about {}.";

/// Candidate labels used when the configuration does not name its own.
pub const DEFAULT_CANDIDATE_LABELS: &[&str] = &[
    "historical or military event",
    "name of army unit or regiment",
    "military operation",
    "specific date, timelines or year",
    "military rank or officer name",
    "martyrdom or sacrifice story",
    "weapon, vehicle, or equipment mention",
    "award, medal, or decoration",
    "military training or exercise",
    "operational statistics or mission facts",
    "bilateral relations",
    "institutions",
    UNRELATED_LABEL,
];

/// Result of labeling one chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPrediction {
    /// Highest scoring label
    pub label: String,
    /// Score of `label` (0.0 to 1.0)
    pub score: f64,
    /// All candidate labels with their scores
    #[serde(default)]
    pub all_scores: BTreeMap<String, f64>,
}

impl LabelPrediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score: score.clamp(0.0, 1.0),
            all_scores: BTreeMap::new(),
        }
    }

    /// Build a prediction from parallel label/score lists, picking the best.
    ///
    /// Returns `None` when the lists are empty.
    pub fn from_ranked(labels: &[String], scores: &[f64]) -> Option<Self> {
        let all_scores: BTreeMap<String, f64> = labels
            .iter()
            .zip(scores.iter())
            .map(|(l, s)| (l.clone(), round3(*s)))
            .collect();

        let (label, score) = labels
            .iter()
            .zip(scores.iter())
            .max_by(|a, b| a.1.total_cmp(b.1))?;

        Some(Self {
            label: label.clone(),
            score: round3(*score).clamp(0.0, 1.0),
            all_scores,
        })
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
