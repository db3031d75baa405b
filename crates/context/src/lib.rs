//! Rank resolution for distributed logging.
//!
//! A [`ParallelContext`] answers one question for the logger: "what is this
//! process's rank within a given parallel group?". The process-group setup
//! itself lives elsewhere; implementations only expose the resulting ranks.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod env;
mod error;
mod mode;

pub use env::EnvContext;
pub use error::{Error, Result};
pub use mode::ParallelMode;

/// Read-only view of this process's place in the parallel layout.
pub trait ParallelContext: Send + Sync + 'static {
    /// Whether the given group has been set up in this process.
    fn is_initialized(&self, mode: ParallelMode) -> bool;

    /// This process's rank within `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if the group has not been set up.
    fn local_rank(&self, mode: ParallelMode) -> Result<usize>;

    /// Number of processes in `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if the group has not been set up.
    fn world_size(&self, mode: ParallelMode) -> Result<usize>;

    /// This process's rank across the whole job.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if the global group has not been set up.
    fn global_rank(&self) -> Result<usize> {
        self.local_rank(ParallelMode::Global)
    }

    /// Rank within `mode`, falling back to rank 0 when the group is absent.
    fn resolved_rank(&self, mode: ParallelMode) -> usize {
        if !self.is_initialized(mode) {
            return 0;
        }
        self.local_rank(mode).unwrap_or(0)
    }

    /// Global rank, falling back to rank 0 when the job is not distributed.
    fn resolved_global_rank(&self) -> usize {
        if !self.is_initialized(ParallelMode::Global) {
            return 0;
        }
        self.global_rank().unwrap_or(0)
    }
}

/// Context for a plain single-process run: no group is ever initialized.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleProcessContext;

impl ParallelContext for SingleProcessContext {
    fn is_initialized(&self, _mode: ParallelMode) -> bool {
        false
    }

    fn local_rank(&self, mode: ParallelMode) -> Result<usize> {
        Err(Error::NotInitialized(mode))
    }

    fn world_size(&self, mode: ParallelMode) -> Result<usize> {
        Err(Error::NotInitialized(mode))
    }
}
