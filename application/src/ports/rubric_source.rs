//! Rubric source port
//!
//! Defines where rubric records come from at startup.

use panel_domain::RubricRecord;
use thiserror::Error;

/// Errors that can occur while loading rubric records
#[derive(Error, Debug)]
pub enum RubricSourceError {
    #[error("Rubric source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed rubric records: {0}")]
    Malformed(String),
}

/// Provider of raw rubric records, in registration order
pub trait RubricSource: Send + Sync {
    fn load(&self) -> Result<Vec<RubricRecord>, RubricSourceError>;
}

/// Fixed list of records
impl RubricSource for Vec<RubricRecord> {
    fn load(&self) -> Result<Vec<RubricRecord>, RubricSourceError> {
        Ok(self.clone())
    }
}
