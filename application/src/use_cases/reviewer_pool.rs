//! Reviewer pool construction
//!
//! Turns raw rubric records into the validated, ordered set of rubrics that
//! every chunk is reviewed against.

use crate::ports::rubric_source::{RubricSource, RubricSourceError};
use panel_domain::{DomainError, RubricConfig, RubricRecord};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while building the pool
#[derive(Error, Debug)]
pub enum ReviewerPoolError {
    #[error("Rubric source error: {0}")]
    Source(#[from] RubricSourceError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// The rubrics of a run, in registration order
#[derive(Debug, Clone)]
pub struct ReviewerPool {
    rubrics: Vec<Arc<RubricConfig>>,
}

impl ReviewerPool {
    /// Build a pool from records.
    ///
    /// Disabled records are skipped silently. Invalid records and records
    /// repeating an earlier name are skipped with a warning. Fails with
    /// [`DomainError::NoRubrics`] when nothing usable remains.
    pub fn from_records(records: &[RubricRecord]) -> Result<Self, DomainError> {
        let mut rubrics: Vec<Arc<RubricConfig>> = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            if !record.enabled {
                continue;
            }

            let rubric = match record.validate() {
                Ok(rubric) => rubric,
                Err(issues) => {
                    let error = DomainError::InvalidRubric {
                        name: record.display_name().to_string(),
                        issues: issues.iter().map(|i| i.to_string()).collect(),
                    };
                    warn!("Skipping rubric: {}", error);
                    continue;
                }
            };

            if !seen.insert(rubric.name.clone()) {
                warn!(
                    "Skipping rubric: {}",
                    DomainError::DuplicateRubric(rubric.name.clone())
                );
                continue;
            }

            rubrics.push(Arc::new(rubric));
        }

        if rubrics.is_empty() {
            return Err(DomainError::NoRubrics);
        }

        info!(
            "Reviewer pool: {}",
            rubrics
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self { rubrics })
    }

    /// Build a pool from the records of `source`.
    pub fn load(source: &dyn RubricSource) -> Result<Self, ReviewerPoolError> {
        let records = source.load()?;
        Ok(Self::from_records(&records)?)
    }

    pub fn len(&self) -> usize {
        self.rubrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rubrics.is_empty()
    }

    pub fn rubrics(&self) -> &[Arc<RubricConfig>] {
        &self.rubrics
    }

    pub fn names(&self) -> Vec<&str> {
        self.rubrics.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RubricConfig>> {
        self.rubrics.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, threshold: i64) -> RubricRecord {
        RubricRecord {
            name: Some(name.to_string()),
            criteria: Some(format!("{} criteria", name)),
            guidelines: Some(format!("{} guidelines", name)),
            confidence_threshold: Some(threshold),
            ..Default::default()
        }
    }

    #[test]
    fn test_registration_order() {
        let records = vec![record("Tone", 60), record("FactCheck", 80), record("Bias", 70)];
        let pool = ReviewerPool::from_records(&records).unwrap();
        assert_eq!(pool.names(), vec!["Tone", "FactCheck", "Bias"]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get("FactCheck").unwrap().confidence_threshold, 80);
    }

    #[test]
    fn test_invalid_records_skipped() {
        let mut missing_criteria = record("NoCriteria", 50);
        missing_criteria.criteria = None;
        let records = vec![record("Tone", 60), missing_criteria, record("Range", 150)];

        let pool = ReviewerPool::from_records(&records).unwrap();
        assert_eq!(pool.names(), vec!["Tone"]);
    }

    #[test]
    fn test_disabled_and_duplicate_skipped() {
        let mut disabled = record("Bias", 70);
        disabled.enabled = false;
        let records = vec![record("Tone", 60), record("Tone", 90), disabled];

        let pool = ReviewerPool::from_records(&records).unwrap();
        assert_eq!(pool.names(), vec!["Tone"]);
        // first registration wins
        assert_eq!(pool.get("Tone").unwrap().confidence_threshold, 60);
    }

    #[test]
    fn test_no_usable_rubric() {
        let mut invalid = record("X", 50);
        invalid.name = None;
        let err = ReviewerPool::from_records(&[invalid]).unwrap_err();
        assert!(matches!(err, DomainError::NoRubrics));

        let err = ReviewerPool::from_records(&[]).unwrap_err();
        assert!(matches!(err, DomainError::NoRubrics));
    }

    struct FailingSource;

    impl RubricSource for FailingSource {
        fn load(&self) -> Result<Vec<RubricRecord>, RubricSourceError> {
            Err(RubricSourceError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_load_from_source() {
        let source = vec![record("Tone", 60)];
        let pool = ReviewerPool::load(&source).unwrap();
        assert_eq!(pool.names(), vec!["Tone"]);

        let err = ReviewerPool::load(&FailingSource).unwrap_err();
        assert!(matches!(err, ReviewerPoolError::Source(_)));
    }
}
