//! Error types for the distributed logger

use std::io;
use std::path::PathBuf;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring loggers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A level name outside `DEBUG`, `INFO`, `WARNING` and `ERROR`
    #[error("invalid logging level {0:?}, expected one of INFO, DEBUG, WARNING, ERROR")]
    InvalidLevel(String),

    /// A file mode other than append or truncate
    #[error("invalid file mode {0:?}, expected \"a\" or \"w\"")]
    InvalidFileMode(String),

    /// A timestamp pattern chrono cannot render
    #[error("invalid date format {0:?}")]
    InvalidDateFormat(String),

    /// A logger with this name already exists in the registry
    #[error("logger {0:?} has already been created, use get_or_create to access it")]
    DuplicateLogger(String),

    /// The process-global registry was installed twice
    #[error("the global logger registry is already initialized")]
    AlreadyInitialized,

    /// Failed to create the log directory
    #[error("failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The path that failed to be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to open the log file
    #[error("failed to open log file at {path}: {source}")]
    OpenFile {
        /// The file that could not be opened
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Rank resolution failed
    #[error(transparent)]
    Context(#[from] distlog_context::Error),
}
