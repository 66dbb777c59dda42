//! Error types for scput
//!
//! This module defines all error types used throughout the application,
//! providing detailed error information for debugging and user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scput operations
#[derive(Error, Debug)]
pub enum ScputError {
    /// Configuration error (missing host, username, destination, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Neither a password nor a private key file was supplied
    #[error("Please specify either a password or a private key file")]
    MissingCredential,

    /// Private key file does not exist or is not a readable file
    #[error("Unable to find private key file: {}", .0.display())]
    KeyFileNotFound(PathBuf),

    /// Private key file exists but could not be read into memory
    #[error("Unable to read private key file '{}': {source}", path.display())]
    KeyFileRead {
        /// Path to the key file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// No --upload-files argument was given at all
    #[error("No files specified for upload")]
    NoFilesSpecified,

    /// A named local file does not exist
    #[error("Unable to find local file: {0}")]
    LocalFileNotFound(String),

    /// Every entry in the upload list was filtered out
    #[error("Please specify at least one filename to upload")]
    EmptyUploadSet,

    /// Could not establish a transport session
    #[error("Connection error to '{host}': {message}")]
    ConnectionFailed {
        /// Remote host
        host: String,
        /// Failure detail from the transport
        message: String,
    },

    /// SSH authentication failed
    #[error("SSH authentication failed for '{user}@{host}': {message}")]
    Auth {
        /// Username used for authentication
        user: String,
        /// Remote host
        host: String,
        /// Failure detail from the transport
        message: String,
    },

    /// Per-file transfer error, surfaced but non-fatal to the batch
    #[error("Transfer error: {0}")]
    Transfer(String),

    /// I/O error with path context
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl ScputError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error
    pub fn connection(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(
        user: impl Into<String>,
        host: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Auth {
            user: user.into(),
            host: host.into(),
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole batch.
    ///
    /// Per-file transfer errors are reported but the remaining files are
    /// still attempted; everything else stops the run.
    pub fn is_fatal_to_batch(&self) -> bool {
        !matches!(self, Self::Transfer(_))
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::KeyFileNotFound(path)
            | Self::KeyFileRead { path, .. }
            | Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for scput operations
pub type Result<T> = std::result::Result<T, ScputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ScputError::io("/test/path", io_err);
        assert_eq!(err.path().unwrap(), &PathBuf::from("/test/path"));
    }

    #[test]
    fn test_transfer_errors_are_non_fatal() {
        assert!(!ScputError::Transfer("channel closed".into()).is_fatal_to_batch());
        assert!(ScputError::MissingCredential.is_fatal_to_batch());
        assert!(ScputError::connection("example.com", "refused").is_fatal_to_batch());
    }

    #[test]
    fn test_display_messages() {
        let err = ScputError::LocalFileNotFound("missing.txt".into());
        assert_eq!(err.to_string(), "Unable to find local file: missing.txt");

        let err = ScputError::KeyFileNotFound(PathBuf::from("id_rsa"));
        assert_eq!(err.to_string(), "Unable to find private key file: id_rsa");
    }
}
