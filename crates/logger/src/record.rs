//! Log record type

use crate::{CallSite, Level};
use chrono::{DateTime, Local};
use std::borrow::Cow;

/// A single message on its way to the sinks
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Name of the logger that produced the record
    pub logger: &'a str,
    /// Log level
    pub level: Level,
    /// The log message
    pub message: Cow<'a, str>,
    /// When the record was created, in local time
    pub timestamp: DateTime<Local>,
    /// Where the log call was made, when known
    pub call_site: Option<CallSite>,
}

impl<'a> Record<'a> {
    /// Create a record stamped with the current time
    #[inline]
    pub fn new(logger: &'a str, level: Level, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            timestamp: Local::now(),
            call_site: None,
        }
    }

    /// Builder-style method for setting the call site
    #[inline]
    #[must_use]
    pub fn with_call_site(mut self, call_site: Option<CallSite>) -> Self {
        self.call_site = call_site;
        self
    }

    /// Builder-style method for overriding the timestamp
    #[inline]
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
