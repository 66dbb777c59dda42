//! # scput - Batch file upload over SSH/SCP
//!
//! scput authenticates to a remote host over SSH and uploads a batch of
//! local files to a single remote destination directory, reporting
//! per-file progress as it goes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use scput::core::Uploader;
//! use scput::credential::Credential;
//! use scput::fileset::UploadSet;
//! use scput::transport::ScpTransport;
//!
//! let credential = Credential::resolve("deploy", Some("secret"), None).unwrap();
//! let set = UploadSet::build(Some("a.txt,b.txt")).unwrap();
//!
//! let transport = ScpTransport::new("example.com", 22, "deploy", credential);
//! let mut uploader = Uploader::new(transport, "example.com", 22, "/home/deploy");
//!
//! let report = uploader.execute(&set).unwrap();
//! report.print_summary();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod credential;
pub mod error;
pub mod fileset;
pub mod progress;
pub mod transport;

// Re-export commonly used types
pub use config::{CliArgs, UploadConfig};
pub use credential::Credential;
pub use error::{Result, ScputError};
pub use fileset::UploadSet;
pub use progress::ProgressTracker;
pub use self::core::{UploadReport, Uploader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
