//! Bridge from the `log` crate

use crate::{CallSite, DistributedLogger, Level, RankFilter};
use log::{Log, Metadata, Record as LogRecord};
use std::sync::Arc;

/// Forwards `log` records to a [`DistributedLogger`]
pub struct LogBridge {
    logger: Arc<DistributedLogger>,
}

impl LogBridge {
    /// Create a new log bridge
    #[must_use]
    pub const fn new(logger: Arc<DistributedLogger>) -> Self {
        Self { logger }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger
            .would_emit(map_level(metadata.level()), &RankFilter::all())
    }

    fn log(&self, record: &LogRecord) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let call_site = match (record.file(), record.line()) {
            (Some(file), Some(line)) => Some(CallSite::from_parts(file, line, Some(record.target()))),
            _ => None,
        };

        self.logger.log(
            map_level(record.level()),
            record.args().to_string(),
            call_site,
            &RankFilter::all(),
        );
    }

    fn flush(&self) {
        self.logger.flush();
    }
}

/// `TRACE` has no counterpart and is folded into `DEBUG`
fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warning,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

/// Install a [`LogBridge`] as the `log` crate's global logger
///
/// # Errors
///
/// Fails if another `log` logger is already installed.
pub fn init_log_bridge(logger: Arc<DistributedLogger>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;

    // The logger's own level does the filtering and can change at runtime
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
