//! Verdict value objects
//!
//! A [`Verdict`] is the structured output of one generation call for one
//! rubric on one chunk. It is either a parsed [`Assessment`] or a
//! [`VerdictError`] when the output could not be used.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the reviewer suggests doing with the flagged text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recommendation {
    Delete,
    Rephrase,
    FactCheck,
    ProvideReferences,
    HumanReview,
    /// Any value outside the known vocabulary, kept verbatim
    Other(String),
}

impl Recommendation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Delete => "delete",
            Self::Rephrase => "rephrase",
            Self::FactCheck => "fact-check",
            Self::ProvideReferences => "provide references",
            Self::HumanReview => "human review",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Recommendation {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "delete" => Self::Delete,
            "rephrase" => Self::Rephrase,
            "fact check" | "factcheck" => Self::FactCheck,
            "provide references" | "provide reference" => Self::ProvideReferences,
            "human review" => Self::HumanReview,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl From<Recommendation> for String {
    fn from(value: Recommendation) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed reviewer judgment.
///
/// Matches the wire contract
/// `{"issues_found": bool, "problematic_text": string|null,
///   "observation": string|null, "recommendation": string|null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub issues_found: bool,
    #[serde(default)]
    pub problematic_text: Option<String>,
    #[serde(default)]
    pub observation: Option<String>,
    #[serde(default)]
    pub recommendation: Option<Recommendation>,
}

impl Assessment {
    /// An assessment reporting nothing.
    pub fn no_issue() -> Self {
        Self {
            issues_found: false,
            problematic_text: None,
            observation: None,
            recommendation: None,
        }
    }

    /// An assessment flagging `excerpt`.
    pub fn issue(
        excerpt: impl Into<String>,
        observation: impl Into<String>,
        recommendation: Recommendation,
    ) -> Self {
        Self {
            issues_found: true,
            problematic_text: Some(excerpt.into()),
            observation: Some(observation.into()),
            recommendation: Some(recommendation),
        }
    }
}

/// Why a generation attempt produced no usable assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictError {
    pub reason: String,
    /// Raw generation output, when there was any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl VerdictError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            raw: None,
        }
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

/// Structural consistency of a verdict's three descriptive fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictShape {
    /// All present with an issue reported, or all absent with none reported
    Consistent,
    /// Partial output, contradictory flag, or an error verdict
    Inconsistent,
}

/// Output of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Assessment(Assessment),
    Error(VerdictError),
}

impl Verdict {
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error(VerdictError::new(reason))
    }

    /// The null verdict: no issue reported and no excerpt given.
    ///
    /// This is a routing condition of its own, not a successful review.
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Self::Assessment(a) if !a.issues_found && a.problematic_text.is_none()
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        match self {
            Self::Assessment(a) => Some(a),
            Self::Error(_) => None,
        }
    }

    pub fn error_reason(&self) -> Option<&str> {
        match self {
            Self::Error(e) => Some(&e.reason),
            Self::Assessment(_) => None,
        }
    }

    /// Flagged excerpt, if the reviewer quoted one.
    pub fn excerpt(&self) -> Option<&str> {
        self.assessment()
            .and_then(|a| a.problematic_text.as_deref())
    }

    pub fn issues_found(&self) -> bool {
        self.assessment().is_some_and(|a| a.issues_found)
    }

    pub fn shape(&self) -> VerdictShape {
        let Self::Assessment(a) = self else {
            return VerdictShape::Inconsistent;
        };

        let fields = [
            a.problematic_text.is_some(),
            a.observation.is_some(),
            a.recommendation.is_some(),
        ];
        let all_present = fields.iter().all(|p| *p);
        let all_absent = fields.iter().all(|p| !*p);

        if (all_present && a.issues_found) || (all_absent && !a.issues_found) {
            VerdictShape::Consistent
        } else {
            VerdictShape::Inconsistent
        }
    }
}

impl From<Assessment> for Verdict {
    fn from(value: Assessment) -> Self {
        Self::Assessment(value)
    }
}
