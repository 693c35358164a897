use alloy_rlp::{RlpDecodable, RlpEncodable};
use std::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Uniquely identifies a specific consensus round for a specific block height.
///
/// Ordering is by sequence number first, then round number, so rounds at the
/// same height compare by round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsensusRoundIdentifier {
    /// The block height (sequence number).
    pub sequence_number: u64,
    /// The consensus round number within that height.
    pub round_number: u32,
}

impl ConsensusRoundIdentifier {
    pub fn new(sequence_number: u64, round_number: u32) -> Self {
        Self { sequence_number, round_number }
    }
}

impl fmt::Display for ConsensusRoundIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sequence_number, self.round_number)
    }
}
