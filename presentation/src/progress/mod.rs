//! Progress reporting while chunks are reviewed

pub mod reporter;
