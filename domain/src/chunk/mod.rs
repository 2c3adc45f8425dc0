//! Chunks under review and their topical labels.
//!
//! A [`Chunk`] is owned by the external chunk store. The review core only
//! reads it; it is shared across concurrent reviewer tasks behind `Arc`.

pub mod entities;
pub mod label;

pub use entities::{Chunk, ChunkLocator};
pub use label::{
    DEFAULT_CANDIDATE_LABELS, DEFAULT_HYPOTHESIS_TEMPLATE, LabelPrediction, UNRELATED_LABEL,
};
