//! The rank-aware logger

use crate::{
    CallSite, ConsoleSink, ConsoleTarget, FileSink, FileSinkOptions, Formatter, Level, RankFilter,
    Record, Result, Sink,
};
use distlog_context::ParallelContext;
use parking_lot::{Mutex, RwLock};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// State a registry shares with every logger it creates
pub(crate) struct Shared {
    pub(crate) context: Arc<dyn ParallelContext>,
    pub(crate) root: Vec<Arc<dyn Sink>>,
    pub(crate) file_console: ConsoleTarget,
    pub(crate) file_formatter: Formatter,
}

/// Sinks owned by one logger, read together with the propagation flag
struct Sinks {
    own: Vec<Arc<dyn Sink>>,
    propagate: bool,
}

/// Outcome of [`DistributedLogger::attach_file_sink`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileAttach {
    /// The file sink was opened and attached
    Attached,
    /// This path is already attached to the logger; nothing changed
    AlreadyAttached,
    /// This process is not global rank 0; nothing changed
    SkippedRank(usize),
}

/// A named logger that tags messages with their call site and can restrict
/// output to selected ranks of a parallel group.
///
/// Loggers are created through a [`LoggerRegistry`](crate::LoggerRegistry),
/// which guarantees one instance per name.
pub struct DistributedLogger {
    name: String,
    level: RwLock<Level>,
    sinks: RwLock<Sinks>,
    files: Mutex<Vec<PathBuf>>,
    shared: Arc<Shared>,
}

impl DistributedLogger {
    pub(crate) fn new(name: String, level: Level, shared: Arc<Shared>) -> Self {
        Self {
            name,
            level: RwLock::new(level),
            sinks: RwLock::new(Sinks {
                own: Vec::new(),
                propagate: true,
            }),
            files: Mutex::new(Vec::new()),
            shared,
        }
    }

    /// Name this logger was registered under
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current minimum level
    #[must_use]
    pub fn level(&self) -> Level {
        *self.level.read()
    }

    /// Set the minimum level
    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
        debug!(logger = %self.name, %level, "logging level changed");
    }

    /// Set the minimum level from its name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`](crate::Error::InvalidLevel) for
    /// anything but `INFO`, `DEBUG`, `WARNING` or `ERROR`; the level is left
    /// unchanged.
    pub fn set_level_str(&self, level: &str) -> Result<()> {
        let level = level.parse()?;
        self.set_level(level);
        Ok(())
    }

    /// Whether records still reach the registry's root sinks
    #[must_use]
    pub fn propagates(&self) -> bool {
        self.sinks.read().propagate
    }

    /// Number of sinks attached directly to this logger
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.read().own.len()
    }

    /// Files attached with [`attach_file_sink`](Self::attach_file_sink)
    #[must_use]
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.files.lock().clone()
    }

    /// Attach an extra sink
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.sinks.write().own.push(sink);
    }

    /// Mirror output to a file.
    ///
    /// Only global rank 0 opens the file; other ranks return
    /// [`FileAttach::SkippedRank`] without touching the file system. The
    /// first attachment stops propagation to the root sinks and adds one
    /// console sink at `INFO` so output still reaches the terminal.
    /// Attaching an already attached path does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CreateDirectory`](crate::Error::CreateDirectory) or
    /// [`Error::OpenFile`](crate::Error::OpenFile) if the file cannot be set up.
    pub fn attach_file_sink(
        &self,
        path: impl AsRef<Path>,
        options: FileSinkOptions,
    ) -> Result<FileAttach> {
        let path = path.as_ref();

        let rank = self.shared.context.resolved_global_rank();
        if rank != 0 {
            debug!(logger = %self.name, rank, path = %path.display(), "not rank 0, skipping file sink");
            return Ok(FileAttach::SkippedRank(rank));
        }

        let first = {
            let mut files = self.files.lock();
            if files.iter().any(|attached| attached == path) {
                return Ok(FileAttach::AlreadyAttached);
            }

            let sink = FileSink::open(
                path,
                options.mode,
                options.level,
                self.shared.file_formatter.clone(),
            )?;
            let first = files.is_empty();
            files.push(path.to_path_buf());

            let mut sinks = self.sinks.write();
            sinks.own.push(Arc::new(sink));
            if first {
                sinks.own.push(Arc::new(ConsoleSink::new(
                    self.shared.file_console.clone(),
                    Level::Info,
                    self.shared.file_formatter.clone(),
                )));
                sinks.propagate = false;
            }
            first
        };

        // No logger lock may be held here: a bridged subscriber logs back into us
        debug!(
            logger = %self.name,
            path = %path.display(),
            mode = ?options.mode,
            level = %options.level,
            first,
            "attached file sink"
        );
        Ok(FileAttach::Attached)
    }

    /// Check the level and rank gates without building a message
    #[must_use]
    pub fn would_emit(&self, level: Level, filter: &RankFilter) -> bool {
        level >= self.level() && self.rank_allows(filter)
    }

    fn rank_allows(&self, filter: &RankFilter) -> bool {
        if filter.allowed().is_none() {
            return true;
        }
        filter.allows(self.shared.context.resolved_rank(filter.mode()))
    }

    fn active_sinks(&self) -> Vec<Arc<dyn Sink>> {
        let sinks = self.sinks.read();
        let mut active = sinks.own.clone();
        if sinks.propagate {
            active.extend(self.shared.root.iter().cloned());
        }
        active
    }

    /// Emit a message if it passes the level and rank gates.
    ///
    /// Every sink is flushed before this returns.
    pub fn log<'a>(
        &self,
        level: Level,
        message: impl Into<Cow<'a, str>>,
        call_site: Option<CallSite>,
        filter: &RankFilter,
    ) {
        if self.would_emit(level, filter) {
            self.emit_unchecked(level, message, call_site);
        }
    }

    /// Emit a message that already passed [`would_emit`](Self::would_emit).
    ///
    /// Used by the logging macros, which check the gates before formatting.
    #[doc(hidden)]
    pub fn emit_unchecked<'a>(
        &self,
        level: Level,
        message: impl Into<Cow<'a, str>>,
        call_site: Option<CallSite>,
    ) {
        let message: Cow<'a, str> = message.into();
        let record = Record::new(&self.name, level, message).with_call_site(call_site);
        let sinks = self.active_sinks();
        for sink in sinks.iter().filter(|sink| sink.is_enabled(level)) {
            sink.emit(&record);
        }
        for sink in &sinks {
            sink.flush();
        }
    }

    /// Flush every sink this logger writes to
    pub fn flush(&self) {
        for sink in self.active_sinks() {
            sink.flush();
        }
    }

    /// Log a debug message on every rank
    #[track_caller]
    pub fn debug<'a>(&self, message: impl Into<Cow<'a, str>>) {
        self.log(Level::Debug, message, Some(CallSite::caller()), &RankFilter::all());
    }

    /// Log an info message on every rank
    #[track_caller]
    pub fn info<'a>(&self, message: impl Into<Cow<'a, str>>) {
        self.log(Level::Info, message, Some(CallSite::caller()), &RankFilter::all());
    }

    /// Log a warning on every rank
    #[track_caller]
    pub fn warning<'a>(&self, message: impl Into<Cow<'a, str>>) {
        self.log(Level::Warning, message, Some(CallSite::caller()), &RankFilter::all());
    }

    /// Log an error on every rank
    #[track_caller]
    pub fn error<'a>(&self, message: impl Into<Cow<'a, str>>) {
        self.log(Level::Error, message, Some(CallSite::caller()), &RankFilter::all());
    }

    /// Log a debug message on the ranks `filter` allows
    #[track_caller]
    pub fn debug_with<'a>(&self, message: impl Into<Cow<'a, str>>, filter: &RankFilter) {
        self.log(Level::Debug, message, Some(CallSite::caller()), filter);
    }

    /// Log an info message on the ranks `filter` allows
    #[track_caller]
    pub fn info_with<'a>(&self, message: impl Into<Cow<'a, str>>, filter: &RankFilter) {
        self.log(Level::Info, message, Some(CallSite::caller()), filter);
    }

    /// Log a warning on the ranks `filter` allows
    #[track_caller]
    pub fn warning_with<'a>(&self, message: impl Into<Cow<'a, str>>, filter: &RankFilter) {
        self.log(Level::Warning, message, Some(CallSite::caller()), filter);
    }

    /// Log an error on the ranks `filter` allows
    #[track_caller]
    pub fn error_with<'a>(&self, message: impl Into<Cow<'a, str>>, filter: &RankFilter) {
        self.log(Level::Error, message, Some(CallSite::caller()), filter);
    }
}

impl std::fmt::Debug for DistributedLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistributedLogger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("sinks", &self.sink_count())
            .field("propagate", &self.propagates())
            .finish_non_exhaustive()
    }
}
