//! Per-file progress de-duplication
//!
//! The transport fires a progress event for every chunk it writes. Most
//! of those land on the same whole percentage; this tracker keeps the
//! last reported percentage per file and only surfaces changes. The
//! first event for a file is always shown, and so is any event at or
//! past 100%, so every file gets a visible start and a visible
//! completion line.

use humansize::{format_size, BINARY};
use std::collections::HashMap;

/// A progress line ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressLine {
    /// File the event belongs to
    pub filename: String,
    /// Bytes uploaded so far
    pub uploaded: u64,
    /// Total bytes to upload
    pub total: u64,
    /// Whole percentage, floored
    pub percentage: u8,
}

impl std::fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} of {} - {}%",
            self.filename,
            format_size(self.uploaded, BINARY),
            format_size(self.total, BINARY),
            self.percentage
        )
    }
}

/// Tracks the last reported percentage per file.
///
/// Created empty at orchestration start and discarded at run end. State
/// here is purely advisory; it controls console verbosity, never
/// transfer correctness.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last_reported: HashMap<String, u8>,
}

impl ProgressTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a progress notification, returning a line to display if
    /// the event is worth surfacing.
    ///
    /// Emits when the file has not been seen before, when the computed
    /// percentage differs from the last reported one, or when the
    /// percentage reaches 100 (completion lines are never suppressed,
    /// even on a tie).
    pub fn observe(&mut self, filename: &str, uploaded: u64, total: u64) -> Option<ProgressLine> {
        let percentage = percentage_of(uploaded, total);

        let emit = match self.last_reported.get(filename) {
            None => true,
            Some(&previous) => previous != percentage || percentage >= 100,
        };
        self.last_reported.insert(filename.to_string(), percentage);

        emit.then(|| ProgressLine {
            filename: filename.to_string(),
            uploaded,
            total,
            percentage,
        })
    }
}

/// Floored whole percentage, computed in integer arithmetic so large
/// byte counts never drift through a float. A zero-byte total counts as
/// complete.
fn percentage_of(uploaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((uploaded as u128 * 100) / total as u128).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_always_emitted() {
        let mut tracker = ProgressTracker::new();
        let line = tracker.observe("a.txt", 0, 1000).unwrap();
        assert_eq!(line.percentage, 0);
    }

    #[test]
    fn test_duplicate_event_suppressed() {
        let mut tracker = ProgressTracker::new();
        assert!(tracker.observe("a.txt", 500, 1000).is_some());
        // Same event again: same percentage, below 100, suppressed
        assert!(tracker.observe("a.txt", 500, 1000).is_none());
        assert!(tracker.observe("a.txt", 509, 1000).is_none());
    }

    #[test]
    fn test_percentage_change_emitted() {
        let mut tracker = ProgressTracker::new();
        tracker.observe("a.txt", 100, 1000);
        let line = tracker.observe("a.txt", 200, 1000).unwrap();
        assert_eq!(line.percentage, 20);
    }

    #[test]
    fn test_completion_always_emitted() {
        let mut tracker = ProgressTracker::new();
        assert_eq!(tracker.observe("a.txt", 1000, 1000).unwrap().percentage, 100);
        // Repeated 100% events keep emitting
        assert!(tracker.observe("a.txt", 1000, 1000).is_some());
        assert!(tracker.observe("a.txt", 1000, 1000).is_some());
    }

    #[test]
    fn test_two_chunk_upload_emits_fifty_then_hundred() {
        let mut tracker = ProgressTracker::new();
        let lines: Vec<_> = [(500u64, 1000u64), (1000, 1000)]
            .iter()
            .filter_map(|&(uploaded, total)| tracker.observe("file.bin", uploaded, total))
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].percentage, 50);
        assert_eq!(lines[1].percentage, 100);
    }

    #[test]
    fn test_files_tracked_independently() {
        let mut tracker = ProgressTracker::new();
        tracker.observe("a.txt", 500, 1000);
        // Same percentage on a different file is that file's first event
        assert!(tracker.observe("b.txt", 500, 1000).is_some());
        assert!(tracker.observe("a.txt", 500, 1000).is_none());
    }

    #[test]
    fn test_integer_arithmetic_on_large_counts() {
        // 10 TiB file at one byte short of half
        let total = 10u64 * 1024 * 1024 * 1024 * 1024;
        assert_eq!(percentage_of(total / 2 - 1, total), 49);
        assert_eq!(percentage_of(total / 2, total), 50);
        assert_eq!(percentage_of(total, total), 100);
    }

    #[test]
    fn test_zero_length_file_counts_as_complete() {
        let mut tracker = ProgressTracker::new();
        let line = tracker.observe("empty.txt", 0, 0).unwrap();
        assert_eq!(line.percentage, 100);
    }

    #[test]
    fn test_line_formatting() {
        let line = ProgressLine {
            filename: "a.txt".into(),
            uploaded: 512,
            total: 1024,
            percentage: 50,
        };
        assert_eq!(line.to_string(), "a.txt: 512 B of 1 KiB - 50%");
    }
}
