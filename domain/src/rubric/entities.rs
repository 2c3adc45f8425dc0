//! Rubric configuration entities

use super::validation::{RubricIssue, RubricIssueCode};
use crate::knowledge::KnowledgeItem;
use serde::{Deserialize, Serialize};

/// Upper bound of every confidence value and threshold.
pub const MAX_CONFIDENCE: u8 = 100;

/// Static description of one reviewer's policy.
///
/// Read-only for the lifetime of a run and shared across all concurrent
/// reviewer tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricConfig {
    /// Unique key of the rubric (e.g. "FactCheckingReview")
    pub name: String,
    /// What the reviewer should flag
    pub criteria: String,
    /// Policy guidelines the reviewer applies
    pub guidelines: String,
    /// Minimum self-evaluated confidence (0-100) to accept a verdict
    pub confidence_threshold: u8,
    /// Consult the knowledge base even for chunks labeled unrelated
    #[serde(default)]
    pub always_consult: bool,
    /// Rubric-scoped reference material, used when the knowledge base has nothing
    #[serde(default)]
    pub reference: Vec<KnowledgeItem>,
}

impl RubricConfig {
    pub fn new(
        name: impl Into<String>,
        criteria: impl Into<String>,
        guidelines: impl Into<String>,
        confidence_threshold: u8,
    ) -> Self {
        Self {
            name: name.into(),
            criteria: criteria.into(),
            guidelines: guidelines.into(),
            confidence_threshold: confidence_threshold.min(MAX_CONFIDENCE),
            always_consult: false,
            reference: Vec::new(),
        }
    }

    pub fn always_consulting(mut self) -> Self {
        self.always_consult = true;
        self
    }

    pub fn with_reference(mut self, items: Vec<KnowledgeItem>) -> Self {
        self.reference = items;
        self
    }
}

/// Raw rubric record as read from a configuration source.
///
/// Every field is optional so that incomplete records can be reported
/// and skipped instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricRecord {
    pub name: Option<String>,
    pub criteria: Option<String>,
    pub guidelines: Option<String>,
    pub confidence_threshold: Option<i64>,
    pub always_consult: bool,
    pub enabled: bool,
    pub reference: Vec<KnowledgeItem>,
}

impl Default for RubricRecord {
    fn default() -> Self {
        Self {
            name: None,
            criteria: None,
            guidelines: None,
            confidence_threshold: None,
            always_consult: false,
            enabled: true,
            reference: Vec::new(),
        }
    }
}

impl RubricRecord {
    /// Name for diagnostics, even when the record has none.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("<unnamed>")
    }

    /// Validate the record and build a [`RubricConfig`].
    pub fn validate(&self) -> Result<RubricConfig, Vec<RubricIssue>> {
        let mut issues = Vec::new();

        let name = present(&self.name);
        if name.is_none() {
            issues.push(RubricIssue::new(RubricIssueCode::MissingName, "missing name"));
        }
        let criteria = present(&self.criteria);
        if criteria.is_none() {
            issues.push(RubricIssue::new(
                RubricIssueCode::MissingCriteria,
                "missing criteria",
            ));
        }
        let guidelines = present(&self.guidelines);
        if guidelines.is_none() {
            issues.push(RubricIssue::new(
                RubricIssueCode::MissingGuidelines,
                "missing guidelines",
            ));
        }

        let threshold = match self.confidence_threshold {
            None => {
                issues.push(RubricIssue::new(
                    RubricIssueCode::MissingThreshold,
                    "missing confidence_threshold",
                ));
                None
            }
            Some(t) if !(0..=MAX_CONFIDENCE as i64).contains(&t) => {
                issues.push(RubricIssue::new(
                    RubricIssueCode::ThresholdOutOfRange,
                    format!("confidence_threshold {} is outside 0..=100", t),
                ));
                None
            }
            Some(t) => Some(t as u8),
        };

        match (name, criteria, guidelines, threshold) {
            (Some(name), Some(criteria), Some(guidelines), Some(threshold)) => {
                Ok(RubricConfig {
                    name: name.to_string(),
                    criteria: criteria.to_string(),
                    guidelines: guidelines.to_string(),
                    confidence_threshold: threshold,
                    always_consult: self.always_consult,
                    reference: self.reference.clone(),
                })
            }
            _ => Err(issues),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> RubricRecord {
        RubricRecord {
            name: Some("FactCheck".to_string()),
            criteria: Some("- Contains factual inaccuracies".to_string()),
            guidelines: Some("1. Ensure factual accuracy".to_string()),
            confidence_threshold: Some(80),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record() {
        let rubric = complete_record().validate().unwrap();
        assert_eq!(rubric.name, "FactCheck");
        assert_eq!(rubric.confidence_threshold, 80);
        assert!(!rubric.always_consult);
        assert!(rubric.reference.is_empty());
    }

    #[test]
    fn test_missing_fields_reported() {
        let record = RubricRecord {
            name: Some("FactCheck".to_string()),
            ..Default::default()
        };
        let issues = record.validate().unwrap_err();
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                RubricIssueCode::MissingCriteria,
                RubricIssueCode::MissingGuidelines,
                RubricIssueCode::MissingThreshold,
            ]
        );
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let record = RubricRecord {
            guidelines: Some("   ".to_string()),
            ..complete_record()
        };
        let issues = record.validate().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, RubricIssueCode::MissingGuidelines);
    }

    #[test]
    fn test_threshold_out_of_range() {
        let record = RubricRecord {
            confidence_threshold: Some(120),
            ..complete_record()
        };
        let issues = record.validate().unwrap_err();
        assert_eq!(issues[0].code, RubricIssueCode::ThresholdOutOfRange);

        let record = RubricRecord {
            confidence_threshold: Some(-1),
            ..complete_record()
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_zero_threshold_is_valid() {
        let record = RubricRecord {
            confidence_threshold: Some(0),
            ..complete_record()
        };
        assert_eq!(record.validate().unwrap().confidence_threshold, 0);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(complete_record().display_name(), "FactCheck");
        assert_eq!(RubricRecord::default().display_name(), "<unnamed>");
    }

    #[test]
    fn test_new_clamps_threshold() {
        let rubric = RubricConfig::new("a", "b", "c", 250);
        assert_eq!(rubric.confidence_threshold, 100);
    }

    #[test]
    fn test_record_defaults_to_enabled() {
        let record: RubricRecord = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert!(record.enabled);
        assert!(!record.always_consult);
    }
}
