//! Compatibility bridges for other logging crates
//!
//! Records coming through a bridge are never rank filtered; the foreign
//! target takes the function slot of the call-site tag.

#[cfg(feature = "log-compat")]
pub mod log_bridge;

#[cfg(feature = "tracing-compat")]
pub mod tracing_bridge;

#[cfg(all(feature = "log-compat", feature = "tracing-compat"))]
use crate::DistributedLogger;
#[cfg(all(feature = "log-compat", feature = "tracing-compat"))]
use std::sync::Arc;

/// Route both `log` and `tracing` output into `logger`
///
/// # Errors
///
/// Fails if either crate already has a global logger or subscriber.
#[cfg(all(feature = "log-compat", feature = "tracing-compat"))]
pub fn init_with_bridges(
    logger: Arc<DistributedLogger>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    log_bridge::init_log_bridge(logger.clone())?;
    tracing_bridge::init_tracing_bridge(logger)?;
    Ok(())
}
