//! Rubrics: the policies reviewers enforce.
//!
//! Configuration sources yield loosely-typed [`RubricRecord`]s. Validation
//! turns each record into a [`RubricConfig`] or a list of
//! [`RubricIssue`]s; only the former ever reaches a reviewer.

pub mod entities;
pub mod validation;

pub use entities::{MAX_CONFIDENCE, RubricConfig, RubricRecord};
pub use validation::{RubricIssue, RubricIssueCode};
