//! Core upload orchestration
//!
//! Sequences validation, connection, per-file upload, and disconnection
//! over the transport abstraction.

mod uploader;

pub use uploader::*;
