//! In-memory rank table for tests and single-node simulations.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::collections::HashMap;

use distlog_context::{Error, ParallelContext, ParallelMode, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct GroupRank {
    rank: usize,
    world_size: usize,
}

/// A [`ParallelContext`] whose ranks are fixed up front.
///
/// Groups that were never configured report [`Error::NotInitialized`].
#[derive(Clone, Debug, Default)]
pub struct StaticContext {
    groups: HashMap<ParallelMode, GroupRank>,
}

impl StaticContext {
    /// Creates a context with no initialized groups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rank of this process in the global group.
    #[must_use]
    pub fn with_global(self, rank: usize, world_size: usize) -> Self {
        self.with_group(ParallelMode::Global, rank, world_size)
    }

    /// Sets the rank of this process in `mode`.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not smaller than `world_size`.
    #[must_use]
    pub fn with_group(mut self, mode: ParallelMode, rank: usize, world_size: usize) -> Self {
        assert!(
            rank < world_size,
            "rank {rank} out of range for {mode} group of size {world_size}"
        );
        self.groups.insert(mode, GroupRank { rank, world_size });
        self
    }

    fn group(&self, mode: ParallelMode) -> Result<GroupRank> {
        self.groups
            .get(&mode)
            .copied()
            .ok_or(Error::NotInitialized(mode))
    }
}

impl ParallelContext for StaticContext {
    fn is_initialized(&self, mode: ParallelMode) -> bool {
        self.groups.contains_key(&mode)
    }

    fn local_rank(&self, mode: ParallelMode) -> Result<usize> {
        self.group(mode).map(|group| group.rank)
    }

    fn world_size(&self, mode: ParallelMode) -> Result<usize> {
        self.group(mode).map(|group| group.world_size)
    }
}
