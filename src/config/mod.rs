//! Configuration module for scput
//!
//! Provides CLI argument parsing and validated runtime settings.

mod settings;

pub use settings::*;
