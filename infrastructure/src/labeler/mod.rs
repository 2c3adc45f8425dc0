//! Zero-shot text labeler adapters

mod zero_shot;

pub use zero_shot::HttpZeroShotLabeler;
