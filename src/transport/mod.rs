//! Transport abstraction
//!
//! The orchestrator drives uploads through the [`Transport`] trait and
//! receives progress and error notifications through a synchronous
//! [`TransferObserver`]. Events fire from within the blocking upload
//! call, on the same execution context; there is no scheduler because
//! only one upload runs at a time.

mod scp;

pub use scp::*;

use crate::error::Result;
use std::path::Path;

/// Synchronous sink for transfer notifications.
pub trait TransferObserver {
    /// A chunk of `filename` was written; `uploaded` of `total` bytes
    /// have been sent so far.
    fn on_progress(&mut self, filename: &str, uploaded: u64, total: u64);

    /// A non-fatal transport error occurred.
    fn on_error(&mut self, message: &str);
}

/// A secure file transfer session.
///
/// Exposes the minimal surface the orchestrator needs: connect, upload
/// one file at a time to a remote directory, disconnect. Implementors
/// must release the session on drop so no open session outlives a run.
pub trait Transport {
    /// Establish and authenticate the session.
    fn connect(&mut self) -> Result<()>;

    /// Whether the session is established and authenticated.
    fn is_connected(&self) -> bool;

    /// Upload a single local file into the remote destination
    /// directory, firing progress events on the observer as bytes are
    /// written. Returns the number of bytes uploaded.
    fn upload(
        &mut self,
        local: &Path,
        remote_dir: &str,
        observer: &mut dyn TransferObserver,
    ) -> Result<u64>;

    /// Tear the session down.
    fn disconnect(&mut self) -> Result<()>;
}
