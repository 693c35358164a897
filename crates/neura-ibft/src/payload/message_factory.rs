// crates/neura-ibft/src/payload/message_factory.rs
use crate::error::IbftError;
use crate::messagewrappers::{Commit, Prepare, Proposal};
use crate::payload::{CommitPayload, PreparePayload, ProposalPayload};
use crate::types::{node_key_to_address, ConsensusRoundIdentifier, IbftBlock, NodeKey, RlpSignature, SignedData};
use alloy_primitives::{Address, B256 as Hash};
use std::sync::Arc;

/// Creates messages signed by the local node.
pub struct MessageFactory {
    node_key: Arc<NodeKey>,
    local_address: Address,
}

impl MessageFactory {
    pub fn new(node_key: Arc<NodeKey>) -> Result<Self, IbftError> {
        let local_address = node_key_to_address(&node_key)?;
        Ok(Self { node_key, local_address })
    }

    pub fn local_address(&self) -> Address {
        self.local_address
    }

    pub fn create_proposal(
        &self,
        round_identifier: ConsensusRoundIdentifier,
        proposed_block: IbftBlock,
    ) -> Result<Proposal, IbftError> {
        let payload = ProposalPayload::new(round_identifier, proposed_block.hash());
        let signed_payload = SignedData::sign(payload, &self.node_key)?;
        Ok(Proposal::new(signed_payload, proposed_block))
    }

    pub fn create_prepare(&self, round_identifier: ConsensusRoundIdentifier, digest: Hash) -> Result<Prepare, IbftError> {
        let payload = PreparePayload::new(round_identifier, digest);
        Ok(Prepare::new(SignedData::sign(payload, &self.node_key)?))
    }

    pub fn create_commit(
        &self,
        round_identifier: ConsensusRoundIdentifier,
        digest: Hash,
        commit_seal: RlpSignature,
    ) -> Result<Commit, IbftError> {
        let payload = CommitPayload::new(round_identifier, digest, commit_seal);
        Ok(Commit::new(SignedData::sign(payload, &self.node_key)?))
    }

    /// Signs the block digest for inclusion in the finalized header.
    pub fn create_commit_seal(&self, block_digest: Hash) -> Result<RlpSignature, IbftError> {
        RlpSignature::sign_prehash(&self.node_key, block_digest)
    }
}
