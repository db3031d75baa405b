//! Line formatting shared by every sink

use crate::{Error, Record, Result};
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;

/// Timestamp pattern of the registry's root console sink.
pub const CONSOLE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Timestamp pattern of file sinks and the console sink attached with them.
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d,%H:%M:%S";

/// Renders records as
/// `<logger> - <LEVEL> - <timestamp> - [<file>, <line>, <function>] <message>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formatter {
    date_format: String,
}

impl Formatter {
    /// Create a formatter with a strftime-style timestamp pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateFormat`] if chrono cannot parse the pattern.
    pub fn new(date_format: impl Into<String>) -> Result<Self> {
        let date_format = date_format.into();
        if StrftimeItems::new(&date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidDateFormat(date_format));
        }
        Ok(Self { date_format })
    }

    /// Formatter used by the root console sink
    #[must_use]
    pub fn console() -> Self {
        Self {
            date_format: CONSOLE_DATE_FORMAT.to_string(),
        }
    }

    /// Formatter used by file sinks
    #[must_use]
    pub fn file() -> Self {
        Self {
            date_format: FILE_DATE_FORMAT.to_string(),
        }
    }

    /// The timestamp pattern
    #[must_use]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Render one record, without a trailing newline
    #[must_use]
    pub fn format(&self, record: &Record<'_>) -> String {
        let mut line = String::with_capacity(64 + record.message.len());
        let _ = write!(
            line,
            "{} - {} - {} - ",
            record.logger,
            record.level,
            record.timestamp.format(&self.date_format)
        );
        if let Some(call_site) = &record.call_site {
            let _ = write!(line, "{call_site} ");
        }
        line.push_str(&record.message);
        line
    }
}
