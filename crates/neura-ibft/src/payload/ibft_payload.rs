use crate::types::ConsensusRoundIdentifier;
use alloy_primitives::B256 as Hash;
use alloy_rlp::{Decodable, Encodable};

/// Trait for IBFT message payloads, the unit that gets signed.
pub trait IbftPayload: Encodable + Decodable + Clone + Send + Sync + std::fmt::Debug {
    /// The consensus round (height and round) this payload pertains to.
    fn round_identifier(&self) -> &ConsensusRoundIdentifier;

    /// The wire message code, see [`crate::messagedata::ibft_v2`].
    fn message_type(&self) -> u8;

    /// Digest of the block the payload refers to.
    fn digest(&self) -> Hash;
}
