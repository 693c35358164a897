use crate::messagewrappers::{Prepare, Proposal};
use crate::payload::{PreparePayload, ProposalPayload};
use crate::types::{IbftBlock, SignedData};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// Proof that a round was prepared: the proposer's signed payload and the
/// signed Prepare payloads that brought the round to quorum.
///
/// RLP: `[signed_proposal_payload, [signed_prepare_payload, ...]]`.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct PreparedCertificate {
    pub proposal_payload: SignedData<ProposalPayload>,
    pub prepare_payloads: Vec<SignedData<PreparePayload>>,
}

impl PreparedCertificate {
    pub fn new(proposal_payload: SignedData<ProposalPayload>, prepare_payloads: Vec<SignedData<PreparePayload>>) -> Self {
        Self { proposal_payload, prepare_payloads }
    }
}

/// The full messages behind a [`PreparedCertificate`], including the block,
/// as needed to re-propose the block in a later round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRoundArtifacts {
    proposal: Proposal,
    prepares: Vec<Prepare>,
}

impl PreparedRoundArtifacts {
    pub fn new(proposal: Proposal, prepares: Vec<Prepare>) -> Self {
        Self { proposal, prepares }
    }

    pub fn block(&self) -> &IbftBlock {
        self.proposal.block()
    }

    pub fn proposal(&self) -> &Proposal {
        &self.proposal
    }

    pub fn prepares(&self) -> &[Prepare] {
        &self.prepares
    }

    pub fn prepared_certificate(&self) -> PreparedCertificate {
        PreparedCertificate::new(
            self.proposal.signed_payload().clone(),
            self.prepares.iter().map(|prepare| prepare.signed_payload().clone()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_helpers::{test_block, test_message_factory};
    use crate::types::ConsensusRoundIdentifier;
    use alloy_rlp::Decodable;

    #[test]
    fn certificate_carries_proposal_and_prepare_payloads() {
        let round = ConsensusRoundIdentifier::new(3, 0);
        let block = test_block(3, 0);
        let proposal = test_message_factory(1).create_proposal(round, block.clone()).unwrap();
        let prepares: Vec<Prepare> = (2..4)
            .map(|seed| test_message_factory(seed).create_prepare(round, block.hash()).unwrap())
            .collect();

        let artifacts = PreparedRoundArtifacts::new(proposal.clone(), prepares.clone());
        let certificate = artifacts.prepared_certificate();

        assert_eq!(artifacts.block(), &block);
        assert_eq!(&certificate.proposal_payload, proposal.signed_payload());
        assert_eq!(certificate.prepare_payloads.len(), 2);
        assert_eq!(&certificate.prepare_payloads[0], prepares[0].signed_payload());

        let encoded = alloy_rlp::encode(&certificate);
        assert_eq!(PreparedCertificate::decode(&mut encoded.as_slice()).unwrap(), certificate);
    }
}
