//! Error types for rank resolution

use crate::ParallelMode;
use thiserror::Error;

/// Result type for rank resolution
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving ranks
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The group has not been set up in this process
    #[error("parallel mode {0} is not initialized")]
    NotInitialized(ParallelMode),

    /// A launcher variable is present but could not be used
    #[error("invalid value {value:?} for environment variable {var}")]
    InvalidEnv {
        /// The offending variable
        var: &'static str,
        /// The raw value found
        value: String,
    },

    /// A launcher variable required by another one is absent
    #[error("environment variable {0} is required but not set")]
    MissingEnv(&'static str),

    /// A parallel mode name did not match any known group
    #[error("unknown parallel mode: {0}")]
    UnknownMode(String),
}
