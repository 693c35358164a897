use crate::error::IbftError;
use crate::messagewrappers::{Commit, Prepare, Proposal};
use crate::types::ConsensusRoundIdentifier;
use crate::validation::MessageValidator;
use alloy_primitives::Address;
use std::collections::HashSet;

/// Stateless checks on the signed content of messages for one round:
/// membership, round, proposer identity and seal authorship.
///
/// Whether a Prepare or Commit refers to the accepted proposal is decided by
/// the round itself, so nothing here depends on which proposal arrived.
#[derive(Debug, Clone)]
pub struct SignedDataValidator {
    round_identifier: ConsensusRoundIdentifier,
    validators: HashSet<Address>,
    expected_proposer: Address,
}

impl SignedDataValidator {
    pub fn new(
        round_identifier: ConsensusRoundIdentifier,
        validators: impl IntoIterator<Item = Address>,
        expected_proposer: Address,
    ) -> Self {
        Self { round_identifier, validators: validators.into_iter().collect(), expected_proposer }
    }

    pub fn check_proposal(&self, proposal: &Proposal) -> Result<(), IbftError> {
        let author = proposal.author();
        if author != self.expected_proposer {
            return Err(IbftError::InvalidProposer { expected: self.expected_proposer, actual: author });
        }
        self.check_validator(author)?;
        self.check_round(proposal.round_identifier())?;

        let block = proposal.block();
        if proposal.digest() != block.hash() {
            return Err(IbftError::DigestMismatch { payload: proposal.digest(), block: block.hash() });
        }
        if block.number() != self.round_identifier.sequence_number {
            return Err(IbftError::InvalidBlockNumber {
                block_number: block.number(),
                sequence_number: self.round_identifier.sequence_number,
            });
        }
        Ok(())
    }

    pub fn check_prepare(&self, prepare: &Prepare) -> Result<(), IbftError> {
        let author = prepare.author();
        self.check_validator(author)?;
        // The proposer's agreement is implied by its proposal.
        if author == self.expected_proposer {
            return Err(IbftError::PrepareFromProposer { proposer: author });
        }
        self.check_round(prepare.round_identifier())
    }

    pub fn check_commit(&self, commit: &Commit) -> Result<(), IbftError> {
        let author = commit.author();
        self.check_validator(author)?;
        self.check_round(commit.round_identifier())?;

        let recovered = commit.commit_seal().recover_address(commit.digest())?;
        if recovered != author {
            return Err(IbftError::InvalidCommitSeal { author, recovered });
        }
        Ok(())
    }

    fn check_validator(&self, author: Address) -> Result<(), IbftError> {
        if !self.validators.contains(&author) {
            return Err(IbftError::NotAValidator { sender: author });
        }
        Ok(())
    }

    fn check_round(&self, actual: &ConsensusRoundIdentifier) -> Result<(), IbftError> {
        if *actual != self.round_identifier {
            return Err(IbftError::InvalidRoundIdentifier { expected: self.round_identifier, actual: *actual });
        }
        Ok(())
    }

    fn report(&self, kind: &str, result: Result<(), IbftError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Round {}: invalid {} message: {}", self.round_identifier, kind, e);
                false
            }
        }
    }
}

impl MessageValidator for SignedDataValidator {
    fn validate_proposal(&self, proposal: &Proposal) -> bool {
        self.report("Proposal", self.check_proposal(proposal))
    }

    fn validate_prepare(&self, prepare: &Prepare) -> bool {
        self.report("Prepare", self.check_prepare(prepare))
    }

    fn validate_commit(&self, commit: &Commit) -> bool {
        self.report("Commit", self.check_commit(commit))
    }
}
