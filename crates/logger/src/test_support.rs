//! Test support utilities
//!
//! [`CaptureBuffer`] stands in for the terminal so tests can assert on what a
//! console sink would have printed.

use crate::{ConsoleTarget, LoggerConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared in-memory console output
#[derive(Clone, Debug, Default)]
pub struct CaptureBuffer {
    lines: Arc<Mutex<Vec<String>>>,
    flushes: Arc<AtomicUsize>,
}

impl CaptureBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger configuration sending both the root console and the console
    /// attached alongside file sinks into this buffer
    #[must_use]
    pub fn config(&self) -> LoggerConfig {
        LoggerConfig::default()
            .with_root_console(ConsoleTarget::Capture(self.clone()))
            .with_file_console(ConsoleTarget::Capture(self.clone()))
    }

    pub(crate) fn push(&self, line: String) {
        self.lines.lock().push(line);
    }

    pub(crate) fn mark_flushed(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    /// All captured lines joined with newlines
    #[must_use]
    pub fn logs(&self) -> String {
        self.lines.lock().join("\n")
    }

    /// A copy of the captured lines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Number of captured lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether nothing was captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Check if any captured line contains `text`
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(text))
    }

    /// How many times the buffer was flushed
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }

    /// Clear captured lines
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}
