//! Rank filters

use distlog_context::ParallelMode;
use std::collections::BTreeSet;

/// Restricts which ranks of a parallel group emit a message.
///
/// The default filter lets every rank through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankFilter {
    mode: ParallelMode,
    ranks: Option<BTreeSet<usize>>,
}

impl RankFilter {
    /// Every rank emits
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the listed ranks of the global group emit
    #[must_use]
    pub fn ranks(ranks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            mode: ParallelMode::Global,
            ranks: Some(ranks.into_iter().collect()),
        }
    }

    /// Only rank 0 of the global group emits
    #[must_use]
    pub fn rank_zero() -> Self {
        Self::ranks([0])
    }

    /// Resolve ranks in `mode` instead of the global group
    #[must_use]
    pub const fn in_mode(mut self, mode: ParallelMode) -> Self {
        self.mode = mode;
        self
    }

    /// Group the ranks refer to
    #[must_use]
    pub const fn mode(&self) -> ParallelMode {
        self.mode
    }

    /// The allowed ranks, or `None` when unfiltered
    #[must_use]
    pub const fn allowed(&self) -> Option<&BTreeSet<usize>> {
        self.ranks.as_ref()
    }

    /// Whether a process at `rank` may emit
    #[must_use]
    pub fn allows(&self, rank: usize) -> bool {
        self.ranks.as_ref().is_none_or(|ranks| ranks.contains(&rank))
    }
}
