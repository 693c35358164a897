use crate::types::ConsensusRoundIdentifier;
use alloy_primitives::{Address, B256 as Hash};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IbftError {
    #[error("RLP error: {0}")]
    RlpError(#[from] alloy_rlp::Error),
    #[error("Invalid message type: {0}")]
    InvalidMessageType(u8),
    #[error("Trailing bytes after message: {0}")]
    TrailingBytes(usize),
    #[error("Crypto operation failed: {0}")]
    CryptoError(String),
    #[error("Recovery error: {0}")]
    RecoveryError(String),
    #[error("Message not from a current validator: {sender:?}")]
    NotAValidator { sender: Address },
    #[error("Invalid proposer: expected {expected:?}, got {actual:?}")]
    InvalidProposer { expected: Address, actual: Address },
    #[error("Prepare sent by the round's proposer {proposer:?}")]
    PrepareFromProposer { proposer: Address },
    #[error("Invalid round identifier: expected {expected:?}, got {actual:?}")]
    InvalidRoundIdentifier {
        expected: ConsensusRoundIdentifier,
        actual: ConsensusRoundIdentifier,
    },
    #[error("Digest mismatch: payload {payload:?}, block {block:?}")]
    DigestMismatch { payload: Hash, block: Hash },
    #[error("Proposed block height {block_number} does not match round sequence {sequence_number}")]
    InvalidBlockNumber { block_number: u64, sequence_number: u64 },
    #[error("Commit seal of {author:?} recovers to {recovered:?}")]
    InvalidCommitSeal { author: Address, recovered: Address },
    #[error("Invalid extra data: {0}")]
    InvalidExtraData(String),
}

impl From<k256::ecdsa::Error> for IbftError {
    fn from(err: k256::ecdsa::Error) -> Self {
        IbftError::CryptoError(err.to_string())
    }
}
