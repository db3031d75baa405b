//! Core sink trait

use crate::{Level, Record};

/// A destination for formatted log lines.
///
/// Writes are best effort: an I/O failure inside a sink is swallowed so a
/// log call never fails the caller.
pub trait Sink: Send + Sync + 'static {
    /// Write one record
    fn emit(&self, record: &Record<'_>);

    /// Flush any buffered output
    fn flush(&self);

    /// Minimum level this sink accepts
    fn threshold(&self) -> Level;

    /// Check whether a record at `level` should reach this sink
    #[inline(always)]
    fn is_enabled(&self, level: Level) -> bool {
        level >= self.threshold()
    }
}
