//! Rank-aware logging for distributed training.
//!
//! Loggers are looked up by name in a [`LoggerRegistry`]. Each message is
//! tagged with its call site, gated by level, and can be restricted to
//! selected ranks of a parallel group, so a job with hundreds of processes
//! prints a line once instead of hundreds of times.
//!
//! ```no_run
//! use distlog_logger::{info, warning, FileSinkOptions, LoggerRegistry, ParallelMode};
//! use distlog_context::EnvContext;
//!
//! # fn main() -> distlog_logger::Result<()> {
//! let registry = LoggerRegistry::new(EnvContext::from_env()?);
//! let logger = registry.get_or_create("train");
//! logger.attach_file_sink("logs/train.log", FileSinkOptions::default())?;
//!
//! info!(logger, ranks = [0]; "starting run");
//! warning!(logger, mode = ParallelMode::Pipeline, ranks = [0]; "stage 0 is slow");
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

#[doc(hidden)]
pub mod callsite;
pub mod compat;
mod config;
mod console;
mod error;
mod file;
mod filter;
mod format;
mod global;
mod level;
mod logger;
mod macros;
mod record;
mod registry;
mod sink;
pub mod test_support;

pub use callsite::CallSite;
pub use config::LoggerConfig;
pub use console::{ConsoleSink, ConsoleTarget};
pub use error::{Error, Result};
pub use file::{FileMode, FileSink, FileSinkOptions};
pub use filter::RankFilter;
pub use format::{CONSOLE_DATE_FORMAT, FILE_DATE_FORMAT, Formatter};
pub use global::{DEFAULT_LOGGER_NAME, default_logger, get_dist_logger, init, registry};
pub use level::Level;
pub use logger::{DistributedLogger, FileAttach};
pub use record::Record;
pub use registry::LoggerRegistry;
pub use sink::Sink;

pub use distlog_context::{ParallelContext, ParallelMode};
