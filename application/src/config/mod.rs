//! Application-level configuration.
//!
//! - [`ReviewParams`] - reviewer task control (retries, deadline, unrelated label)

pub mod review_params;

pub use review_params::ReviewParams;
