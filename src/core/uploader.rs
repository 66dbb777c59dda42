//! Transfer orchestration
//!
//! The uploader validates its inputs before any network activity, then
//! connects, sends every file in the upload set sequentially, and
//! releases the session on every exit path. A single file's transport
//! error is surfaced and recorded but does not abort the remaining
//! uploads; only connection-level failures stop the run.

use crate::error::{Result, ScputError};
use crate::fileset::UploadSet;
use crate::progress::ProgressTracker;
use crate::transport::{TransferObserver, Transport};
use std::time::{Duration, Instant};

/// Outcome of an upload run
#[derive(Debug)]
pub struct UploadReport {
    /// Files uploaded successfully
    pub files_uploaded: u64,
    /// Total bytes uploaded
    pub bytes_uploaded: u64,
    /// Per-file failures as (path, error) pairs
    pub failures: Vec<(String, String)>,
    /// Total duration of the run
    pub duration: Duration,
}

impl UploadReport {
    /// Whether every file in the set was uploaded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Print summary to console
    pub fn print_summary(&self) {
        println!(
            "Uploaded {} files ({}) in {:.2?}",
            self.files_uploaded,
            humansize::format_size(self.bytes_uploaded, humansize::BINARY),
            self.duration
        );

        if !self.failures.is_empty() {
            println!("Failures: {}", self.failures.len());
            for (path, error) in &self.failures {
                println!("  {} - {}", path, error);
            }
        }
    }
}

/// Prints de-duplicated progress lines and transport errors.
struct ConsoleObserver {
    tracker: ProgressTracker,
}

impl ConsoleObserver {
    fn new() -> Self {
        Self {
            tracker: ProgressTracker::new(),
        }
    }
}

impl TransferObserver for ConsoleObserver {
    fn on_progress(&mut self, filename: &str, uploaded: u64, total: u64) {
        if let Some(line) = self.tracker.observe(filename, uploaded, total) {
            println!("{}", line);
        }
    }

    fn on_error(&mut self, message: &str) {
        eprintln!("SCP Error: {}", message);
    }
}

/// Upload orchestrator over a generic transport
pub struct Uploader<T: Transport> {
    transport: T,
    host: String,
    port: u16,
    destination: String,
}

impl<T: Transport> Uploader<T> {
    /// Create an uploader targeting the given destination directory.
    pub fn new(
        transport: T,
        host: impl Into<String>,
        port: u16,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            host: host.into(),
            port,
            destination: destination.into(),
        }
    }

    /// Run the transfer: validate, connect, upload each file in
    /// insertion order, disconnect.
    ///
    /// The session is released unconditionally, whether the transfer
    /// succeeds or fails partway through.
    pub fn execute(&mut self, set: &UploadSet) -> Result<UploadReport> {
        // Validation happens before any network activity
        if self.destination.is_empty() {
            return Err(ScputError::config("Please specify a remote destination"));
        }
        if set.is_empty() {
            return Err(ScputError::EmptyUploadSet);
        }

        let result = self.run_transfer(set);

        // Session release does not depend on the transfer outcome; a
        // disconnect failure must not mask the transfer result either.
        if let Err(e) = self.transport.disconnect() {
            tracing::debug!(error = %e, "disconnect failed");
        }

        result
    }

    fn run_transfer(&mut self, set: &UploadSet) -> Result<UploadReport> {
        let start = Instant::now();

        println!(
            "Connecting to server {} on port {}",
            self.host, self.port
        );
        self.transport.connect()?;

        if !self.transport.is_connected() {
            return Err(ScputError::connection(
                &self.host,
                "transport reports not connected",
            ));
        }

        println!("Preparing to upload {} files.", set.len());

        let mut observer = ConsoleObserver::new();
        let mut report = UploadReport {
            files_uploaded: 0,
            bytes_uploaded: 0,
            failures: Vec::new(),
            duration: Duration::ZERO,
        };

        for entry in set.entries() {
            match self
                .transport
                .upload(&entry.path, &self.destination, &mut observer)
            {
                Ok(bytes) => {
                    report.files_uploaded += 1;
                    report.bytes_uploaded += bytes;
                }
                Err(e) if !e.is_fatal_to_batch() => {
                    // Per-file transport errors do not abort the batch
                    observer.on_error(&e.to_string());
                    report
                        .failures
                        .push((entry.path.display().to_string(), e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        println!("Finished, disconnecting.");
        report.duration = start.elapsed();
        Ok(report)
    }
}
