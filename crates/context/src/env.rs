//! Rank resolution from launcher environment variables

use crate::{Error, ParallelContext, ParallelMode, Result};
use tracing::debug;

const RANK: &str = "RANK";
const WORLD_SIZE: &str = "WORLD_SIZE";
const LOCAL_RANK: &str = "LOCAL_RANK";
const LOCAL_WORLD_SIZE: &str = "LOCAL_WORLD_SIZE";

/// Reads the global rank from the variables set by common launchers
/// (`RANK` and `WORLD_SIZE`), plus the position on the current node
/// (`LOCAL_RANK` and `LOCAL_WORLD_SIZE`).
///
/// Only the [`ParallelMode::Global`] group is known; every other group is
/// reported as not initialized. A job launched without `RANK` is treated as
/// a single process. The node position is not a parallel group and is only
/// reachable through [`EnvContext::node`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnvContext {
    global: Option<(usize, usize)>,
    node: Option<(usize, usize)>,
}

impl EnvContext {
    /// Build from the current process environment.
    ///
    /// # Errors
    ///
    /// Fails if `RANK` is set but not a number, if `WORLD_SIZE` is missing or
    /// malformed while `RANK` is set, or if the rank is outside the world.
    /// `LOCAL_RANK` and `LOCAL_WORLD_SIZE` are checked the same way.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`EnvContext::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let node = read_pair(&lookup, LOCAL_RANK, LOCAL_WORLD_SIZE)?;
        let Some(global) = read_pair(&lookup, RANK, WORLD_SIZE)? else {
            debug!("no {RANK} in environment, running as a single process");
            return Ok(Self { global: None, node });
        };

        debug!(
            rank = global.0,
            world_size = global.1,
            local_rank = node.map(|(rank, _)| rank),
            "resolved global rank from environment"
        );
        Ok(Self {
            global: Some(global),
            node,
        })
    }

    /// Rank and process count on this node, from `LOCAL_RANK` and
    /// `LOCAL_WORLD_SIZE`.
    #[must_use]
    pub const fn node(&self) -> Option<(usize, usize)> {
        self.node
    }

    fn global(&self, mode: ParallelMode) -> Result<(usize, usize)> {
        match (mode, self.global) {
            (ParallelMode::Global, Some(global)) => Ok(global),
            _ => Err(Error::NotInitialized(mode)),
        }
    }
}

/// Read a rank and the size of its group; the size is required once the
/// rank is present.
fn read_pair<F>(
    lookup: &F,
    rank_var: &'static str,
    size_var: &'static str,
) -> Result<Option<(usize, usize)>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw_rank) = lookup(rank_var) else {
        return Ok(None);
    };
    let rank = parse_var(rank_var, &raw_rank)?;

    let raw_size = lookup(size_var).ok_or(Error::MissingEnv(size_var))?;
    let size = parse_var(size_var, &raw_size)?;
    if rank >= size {
        return Err(Error::InvalidEnv {
            var: rank_var,
            value: raw_rank,
        });
    }
    Ok(Some((rank, size)))
}

fn parse_var(var: &'static str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| Error::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

impl ParallelContext for EnvContext {
    fn is_initialized(&self, mode: ParallelMode) -> bool {
        self.global(mode).is_ok()
    }

    fn local_rank(&self, mode: ParallelMode) -> Result<usize> {
        self.global(mode).map(|(rank, _)| rank)
    }

    fn world_size(&self, mode: ParallelMode) -> Result<usize> {
        self.global(mode).map(|(_, size)| size)
    }
}
