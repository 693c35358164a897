#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunables for a node's round processing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct IbftConfig {
    /// How many Prepares, and separately Commits, one author may have held
    /// for a round before its proposal arrives. A further message from that
    /// author evicts its oldest. Honest validators send one of each per round.
    pub max_pending_per_author: usize,
}

impl Default for IbftConfig {
    fn default() -> Self {
        Self { max_pending_per_author: 4 }
    }
}
