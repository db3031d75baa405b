//! Named logger registry

use crate::logger::Shared;
use crate::{ConsoleSink, DistributedLogger, Error, Formatter, Level, LoggerConfig, Result, Sink};
use distlog_context::{EnvContext, ParallelContext};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Owns one [`DistributedLogger`] per name.
///
/// The registry also holds the rank-resolution handle and the root console
/// sink that loggers write to until they attach a file.
pub struct LoggerRegistry {
    shared: Arc<Shared>,
    level: Level,
    loggers: Mutex<HashMap<String, Arc<DistributedLogger>>>,
}

impl LoggerRegistry {
    /// Create a registry with the default configuration
    pub fn new(context: impl ParallelContext) -> Self {
        let shared = Shared {
            context: Arc::new(context),
            root: vec![Arc::new(ConsoleSink::stdout())],
            file_console: LoggerConfig::default().file_console,
            file_formatter: Formatter::file(),
        };
        Self::from_shared(shared, Level::Info)
    }

    /// Create a registry with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateFormat`] if a timestamp pattern is invalid.
    pub fn with_config(context: impl ParallelContext, config: LoggerConfig) -> Result<Self> {
        Self::with_shared_context(Arc::new(context), config)
    }

    /// Create a registry around a context that is shared with other components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateFormat`] if a timestamp pattern is invalid.
    pub fn with_shared_context(
        context: Arc<dyn ParallelContext>,
        config: LoggerConfig,
    ) -> Result<Self> {
        let root_sink: Arc<dyn Sink> = Arc::new(ConsoleSink::new(
            config.root_console,
            Level::Debug,
            Formatter::new(config.console_date_format)?,
        ));
        let shared = Shared {
            context,
            root: vec![root_sink],
            file_console: config.file_console,
            file_formatter: Formatter::new(config.file_date_format)?,
        };
        Ok(Self::from_shared(shared, config.level))
    }

    /// Create a registry whose ranks come from the launcher environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Context`] if the environment is malformed, or
    /// [`Error::InvalidDateFormat`] if a timestamp pattern is invalid.
    pub fn from_env(config: LoggerConfig) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), config)
    }

    /// Like [`from_env`](Self::from_env), reading launcher variables through
    /// `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F, config: LoggerConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::with_config(EnvContext::from_lookup(lookup)?, config)
    }

    fn from_shared(shared: Shared, level: Level) -> Self {
        Self {
            shared: Arc::new(shared),
            level,
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// The rank-resolution handle shared by every logger
    #[must_use]
    pub fn context(&self) -> &Arc<dyn ParallelContext> {
        &self.shared.context
    }

    /// Return the logger called `name`, creating it on first use
    pub fn get_or_create(&self, name: &str) -> Arc<DistributedLogger> {
        let mut loggers = self.loggers.lock();
        if let Some(logger) = loggers.get(name) {
            return logger.clone();
        }
        let logger = self.register(&mut loggers, name);
        drop(loggers);

        debug!(logger = name, "created logger");
        logger
    }

    /// Construct a new logger called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateLogger`] if the name is taken; use
    /// [`get_or_create`](Self::get_or_create) to reach existing loggers.
    pub fn create(&self, name: &str) -> Result<Arc<DistributedLogger>> {
        let mut loggers = self.loggers.lock();
        if loggers.contains_key(name) {
            return Err(Error::DuplicateLogger(name.to_string()));
        }
        let logger = self.register(&mut loggers, name);
        drop(loggers);

        debug!(logger = name, "created logger");
        Ok(logger)
    }

    fn register(
        &self,
        loggers: &mut HashMap<String, Arc<DistributedLogger>>,
        name: &str,
    ) -> Arc<DistributedLogger> {
        let logger = Arc::new(DistributedLogger::new(
            name.to_string(),
            self.level,
            self.shared.clone(),
        ));
        loggers.insert(name.to_string(), logger.clone());
        logger
    }

    /// Look up a logger without creating it
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<DistributedLogger>> {
        self.loggers.lock().get(name).cloned()
    }

    /// Whether a logger called `name` exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered loggers
    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    /// Whether no logger has been created yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }

    /// Flush every logger and the root sinks
    pub fn flush(&self) {
        let loggers: Vec<_> = self.loggers.lock().values().cloned().collect();
        for logger in loggers {
            logger.flush();
        }
        for sink in &self.shared.root {
            sink.flush();
        }
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("level", &self.level)
            .field("loggers", &self.names())
            .finish_non_exhaustive()
    }
}
