// crates/neura-ibft/src/messagedata/mod.rs

pub mod ibft_v2;

use crate::error::IbftError;
use crate::messagewrappers::{Commit, MessageIdentity, Prepare, Proposal};
use crate::types::{BlockHashing, ConsensusRoundIdentifier};
use alloy_primitives::Bytes;
use alloy_rlp::{Decodable, Encodable};

/// Any consensus message a round consumes, tagged by its wire code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IbftMessage {
    Proposal(Proposal),
    Prepare(Prepare),
    Commit(Commit),
}

impl IbftMessage {
    pub fn code(&self) -> u8 {
        match self {
            IbftMessage::Proposal(_) => ibft_v2::PROPOSAL,
            IbftMessage::Prepare(_) => ibft_v2::PREPARE,
            IbftMessage::Commit(_) => ibft_v2::COMMIT,
        }
    }

    pub fn name(&self) -> &'static str {
        ibft_v2::message_name(self.code())
    }

    pub fn round_identifier(&self) -> &ConsensusRoundIdentifier {
        match self {
            IbftMessage::Proposal(proposal) => proposal.round_identifier(),
            IbftMessage::Prepare(prepare) => prepare.round_identifier(),
            IbftMessage::Commit(commit) => commit.round_identifier(),
        }
    }

    pub fn identity(&self) -> MessageIdentity {
        match self {
            IbftMessage::Proposal(proposal) => proposal.identity(),
            IbftMessage::Prepare(prepare) => prepare.identity(),
            IbftMessage::Commit(commit) => commit.identity(),
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut out = Vec::new();
        match self {
            IbftMessage::Proposal(proposal) => proposal.encode(&mut out),
            IbftMessage::Prepare(prepare) => prepare.encode(&mut out),
            IbftMessage::Commit(commit) => commit.encode(&mut out),
        }
        out.into()
    }

    /// Decodes the message carried under wire `code`. The whole of `data`
    /// must be consumed.
    pub fn decode(code: u8, data: &[u8], hashing: &dyn BlockHashing) -> Result<Self, IbftError> {
        let mut buf = data;
        let message = match code {
            ibft_v2::PROPOSAL => IbftMessage::Proposal(Proposal::decode(&mut buf, hashing)?),
            ibft_v2::PREPARE => IbftMessage::Prepare(Prepare::decode(&mut buf)?),
            ibft_v2::COMMIT => IbftMessage::Commit(Commit::decode(&mut buf)?),
            other => return Err(IbftError::InvalidMessageType(other)),
        };
        if !buf.is_empty() {
            return Err(IbftError::TrailingBytes(buf.len()));
        }
        Ok(message)
    }
}

impl From<Proposal> for IbftMessage {
    fn from(proposal: Proposal) -> Self {
        IbftMessage::Proposal(proposal)
    }
}

impl From<Prepare> for IbftMessage {
    fn from(prepare: Prepare) -> Self {
        IbftMessage::Prepare(prepare)
    }
}

impl From<Commit> for IbftMessage {
    fn from(commit: Commit) -> Self {
        IbftMessage::Commit(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_helpers::{test_block, test_message_factory};
    use crate::types::IbftBlockHashing;

    fn all_variants() -> Vec<IbftMessage> {
        let round = ConsensusRoundIdentifier::new(7, 2);
        let block = test_block(7, 2);
        let proposer = test_message_factory(1);
        let validator = test_message_factory(2);
        let seal = validator.create_commit_seal(block.hash()).unwrap();
        vec![
            proposer.create_proposal(round, block.clone()).unwrap().into(),
            validator.create_prepare(round, block.hash()).unwrap().into(),
            validator.create_commit(round, block.hash(), seal).unwrap().into(),
        ]
    }

    #[test]
    fn every_variant_roundtrips() {
        for message in all_variants() {
            let encoded = message.encode();
            let decoded = IbftMessage::decode(message.code(), &encoded, &IbftBlockHashing).unwrap();
            assert_eq!(decoded, message, "{}", message.name());
            assert_eq!(decoded.identity(), message.identity());
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        for message in all_variants() {
            assert_eq!(message.encode(), message.clone().encode());
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let prepare = all_variants().remove(1);
        assert_eq!(
            IbftMessage::decode(ibft_v2::ROUND_CHANGE, &prepare.encode(), &IbftBlockHashing),
            Err(IbftError::InvalidMessageType(ibft_v2::ROUND_CHANGE))
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        for message in all_variants() {
            let mut encoded = message.encode().to_vec();
            encoded.push(0x80);
            assert_eq!(
                IbftMessage::decode(message.code(), &encoded, &IbftBlockHashing),
                Err(IbftError::TrailingBytes(1))
            );
        }
    }

    #[test]
    fn decoding_under_the_wrong_code_fails() {
        let variants = all_variants();
        // a prepare's payload is one field short of a commit's
        assert!(IbftMessage::decode(ibft_v2::COMMIT, &variants[1].encode(), &IbftBlockHashing).is_err());
        // a commit's payload has one field too many for a prepare
        assert!(IbftMessage::decode(ibft_v2::PREPARE, &variants[2].encode(), &IbftBlockHashing).is_err());
        assert!(IbftMessage::decode(ibft_v2::PROPOSAL, &variants[1].encode(), &IbftBlockHashing).is_err());
    }
}
