//! Console sink

use crate::test_support::CaptureBuffer;
use crate::{Formatter, Level, Record, Sink};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Which stream a console sink writes to
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error
    Stderr,
    /// An in-memory buffer, for tests
    #[serde(skip)]
    Capture(CaptureBuffer),
}

/// Sink that writes one line per record to a console stream
#[derive(Debug)]
pub struct ConsoleSink {
    target: ConsoleTarget,
    threshold: Level,
    formatter: Formatter,
}

impl ConsoleSink {
    /// Create a console sink
    #[must_use]
    pub const fn new(target: ConsoleTarget, threshold: Level, formatter: Formatter) -> Self {
        Self {
            target,
            threshold,
            formatter,
        }
    }

    /// Stdout sink that accepts every level, with the console timestamp format
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout, Level::Debug, Formatter::console())
    }

    /// The stream this sink writes to
    #[must_use]
    pub const fn target(&self) -> &ConsoleTarget {
        &self.target
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, record: &Record<'_>) {
        let line = self.formatter.format(record);

        // Locking the stream keeps the line whole when threads interleave
        match &self.target {
            ConsoleTarget::Stdout => {
                let _ = writeln!(std::io::stdout().lock(), "{line}");
            }
            ConsoleTarget::Stderr => {
                let _ = writeln!(std::io::stderr().lock(), "{line}");
            }
            ConsoleTarget::Capture(buffer) => buffer.push(line),
        }
    }

    fn flush(&self) {
        match &self.target {
            ConsoleTarget::Stdout => {
                let _ = std::io::stdout().flush();
            }
            ConsoleTarget::Stderr => {
                let _ = std::io::stderr().flush();
            }
            ConsoleTarget::Capture(buffer) => buffer.mark_flushed(),
        }
    }

    #[inline(always)]
    fn threshold(&self) -> Level {
        self.threshold
    }
}
