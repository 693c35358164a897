use alloy_primitives::{keccak256, Address, Bloom, Bytes, B256 as Hash, B64, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// Ethereum-style block header as carried inside IBFT proposals.
///
/// The header does not know its own hash: IBFT hashes headers with the
/// committed seals stripped from `extra_data`, so the hash is supplied by a
/// [`BlockHashing`](crate::types::BlockHashing) policy when a block is built.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct IbftBlockHeader {
    pub parent_hash: Hash,
    pub ommers_hash: Hash,
    pub beneficiary: Address,
    pub state_root: Hash,
    pub transactions_root: Hash,
    pub receipts_root: Hash,
    pub logs_bloom: Bloom,
    pub difficulty: U256,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Bytes,
    pub mix_hash: Hash,
    pub nonce: B64,
}

impl IbftBlockHeader {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        parent_hash: Hash,
        ommers_hash: Hash,
        beneficiary: Address,
        state_root: Hash,
        transactions_root: Hash,
        receipts_root: Hash,
        logs_bloom: Bloom,
        difficulty: U256,
        number: u64,
        gas_limit: u64,
        gas_used: u64,
        timestamp: u64,
        extra_data: Bytes,
        mix_hash: Hash,
        nonce: B64,
    ) -> Self {
        Self {
            parent_hash,
            ommers_hash,
            beneficiary,
            state_root,
            transactions_root,
            receipts_root,
            logs_bloom,
            difficulty,
            number,
            gas_limit,
            gas_used,
            timestamp,
            extra_data,
            mix_hash,
            nonce,
        }
    }

    /// Copy of this header carrying different extra data.
    pub fn with_extra_data(&self, extra_data: Bytes) -> Self {
        Self { extra_data, ..self.clone() }
    }

    /// keccak256 of the header's RLP encoding, as is.
    pub fn rlp_hash(&self) -> Hash {
        keccak256(alloy_rlp::encode(self))
    }
}
