//! Process-wide registry for call sites that cannot be handed one

use crate::{DistributedLogger, Error, LoggerRegistry, Result};
use distlog_context::SingleProcessContext;
use std::sync::{Arc, OnceLock};

/// Logger name used when none is given
pub const DEFAULT_LOGGER_NAME: &str = "colossalai";

static REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] if a registry is already installed,
/// including the default one created by an earlier [`registry`] call.
pub fn init(registry: LoggerRegistry) -> Result<()> {
    REGISTRY
        .set(registry)
        .map_err(|_| Error::AlreadyInitialized)
}

/// The process-wide registry.
///
/// Falls back to a single-process registry if [`init`] was never called.
pub fn registry() -> &'static LoggerRegistry {
    REGISTRY.get_or_init(|| LoggerRegistry::new(SingleProcessContext))
}

/// Logger `name` from the process-wide registry
pub fn get_dist_logger(name: &str) -> Arc<DistributedLogger> {
    registry().get_or_create(name)
}

/// The logger called [`DEFAULT_LOGGER_NAME`]
pub fn default_logger() -> Arc<DistributedLogger> {
    get_dist_logger(DEFAULT_LOGGER_NAME)
}
