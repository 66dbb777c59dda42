//! Progress reporting module
//!
//! De-duplicates per-file progress notifications so only meaningful
//! percentage changes reach the console.

mod tracker;

pub use tracker::*;
