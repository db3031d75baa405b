//! Logger configuration

use crate::format::{CONSOLE_DATE_FORMAT, FILE_DATE_FORMAT};
use crate::{ConsoleTarget, Level};
use serde::{Deserialize, Serialize};

/// Settings shared by every logger of a registry.
///
/// Deserializable so it can live in a training job's config file:
///
/// ```toml
/// level = "DEBUG"
/// root_console = "stdout"
/// file_console = "stderr"
/// file_date_format = "%Y-%m-%d,%H:%M:%S"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Initial level of newly created loggers
    pub level: Level,
    /// Stream of the registry's root console sink
    pub root_console: ConsoleTarget,
    /// Stream of the console sink added alongside the first file sink
    pub file_console: ConsoleTarget,
    /// Timestamp pattern of the root console sink
    pub console_date_format: String,
    /// Timestamp pattern of file sinks and their companion console sink
    pub file_date_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            root_console: ConsoleTarget::Stdout,
            file_console: ConsoleTarget::Stderr,
            console_date_format: CONSOLE_DATE_FORMAT.to_string(),
            file_date_format: FILE_DATE_FORMAT.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Set the initial level of new loggers
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the root console stream
    #[must_use]
    pub fn with_root_console(mut self, target: ConsoleTarget) -> Self {
        self.root_console = target;
        self
    }

    /// Set the stream used next to file sinks
    #[must_use]
    pub fn with_file_console(mut self, target: ConsoleTarget) -> Self {
        self.file_console = target;
        self
    }

    /// Set the root console timestamp pattern
    #[must_use]
    pub fn with_console_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.console_date_format = pattern.into();
        self
    }

    /// Set the file timestamp pattern
    #[must_use]
    pub fn with_file_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.file_date_format = pattern.into();
        self
    }
}
