//! Parallel group identifiers

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies which parallel dimension a rank lookup applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParallelMode {
    /// Every process in the job
    #[default]
    Global,
    /// Data-parallel replicas
    Data,
    /// Pipeline stages
    Pipeline,
    /// Tensor-parallel shards
    Tensor,
    /// Model-parallel group (pipeline and tensor combined)
    Model,
    /// Sequence-parallel shards
    Sequence,
    /// Data-parallel group seen through sequence parallelism
    SequenceData,
    /// Expert-parallel shards
    Expert,
}

impl ParallelMode {
    /// All known modes, in declaration order
    pub const ALL: [Self; 8] = [
        Self::Global,
        Self::Data,
        Self::Pipeline,
        Self::Tensor,
        Self::Model,
        Self::Sequence,
        Self::SequenceData,
        Self::Expert,
    ];

    /// Upper snake case name, as used in configuration
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::Data => "DATA",
            Self::Pipeline => "PIPELINE",
            Self::Tensor => "TENSOR",
            Self::Model => "MODEL",
            Self::Sequence => "SEQUENCE",
            Self::SequenceData => "SEQUENCE_DATA",
            Self::Expert => "EXPERT",
        }
    }
}

impl fmt::Display for ParallelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParallelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for mode in ParallelMode::ALL {
            assert_eq!(mode.to_string().parse::<ParallelMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_unknown_mode() {
        assert_eq!(
            "global".parse::<ParallelMode>(),
            Err(Error::UnknownMode("global".to_string()))
        );
    }

    #[test]
    fn test_default_is_global() {
        assert_eq!(ParallelMode::default(), ParallelMode::Global);
    }
}
