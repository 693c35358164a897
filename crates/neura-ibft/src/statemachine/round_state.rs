use crate::messagedata::IbftMessage;
use crate::messagewrappers::{Commit, MessageIdentity, Prepare, PreparedRoundArtifacts, Proposal};
use crate::types::quorum::prepare_message_count_for_quorum;
use crate::types::{ConsensusRoundIdentifier, IbftBlock, IbftConfig, RlpSignature};
use crate::validation::MessageValidator;
use alloy_primitives::{Address, B256 as Hash};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Prepares and Commits, as counted by a round.
trait RoundMessage: Clone {
    const KIND: &'static str;
    fn message_identity(&self) -> MessageIdentity;
}

impl RoundMessage for Prepare {
    const KIND: &'static str = "Prepare";
    fn message_identity(&self) -> MessageIdentity {
        self.identity()
    }
}

impl RoundMessage for Commit {
    const KIND: &'static str = "Commit";
    fn message_identity(&self) -> MessageIdentity {
        self.identity()
    }
}

/// Messages of one kind for one round.
///
/// `pending` holds messages that arrived before the proposal and have not been
/// validated, in arrival order; `accepted` holds validated messages for the
/// proposal's digest, one per author. `pending` is drained exactly once, when
/// the proposal is accepted.
struct MessageSet<M: RoundMessage> {
    pending: Vec<M>,
    accepted: BTreeMap<Address, M>,
    rejected: HashSet<MessageIdentity>,
}

impl<M: RoundMessage> MessageSet<M> {
    fn new() -> Self {
        Self { pending: Vec::new(), accepted: BTreeMap::new(), rejected: HashSet::new() }
    }

    fn len(&self) -> usize {
        self.accepted.len()
    }

    fn accepted(&self) -> impl Iterator<Item = &M> {
        self.accepted.values()
    }

    fn is_for_round(identity: &MessageIdentity, round: &ConsensusRoundIdentifier) -> bool {
        if identity.round_identifier != *round {
            log::debug!(
                "Round {}: {} from {:?} is for round {}, discarding",
                round, M::KIND, identity.author, identity.round_identifier
            );
            return false;
        }
        true
    }

    /// Holds `message` until a proposal arrives. Each author keeps at most
    /// `per_author_limit` (at least one) messages; beyond that the author's
    /// oldest is evicted.
    fn buffer(&mut self, message: M, per_author_limit: usize, round: &ConsensusRoundIdentifier) -> bool {
        let identity = message.message_identity();
        if !Self::is_for_round(&identity, round) {
            return false;
        }
        if self.pending.iter().any(|p| p.message_identity() == identity) {
            log::trace!("Round {}: duplicate early {} from {:?} ignored", round, M::KIND, identity.author);
            return false;
        }

        let from_author = |p: &M| p.message_identity().author == identity.author;
        if self.pending.iter().filter(|p| from_author(p)).count() >= per_author_limit.max(1) {
            if let Some(oldest) = self.pending.iter().position(from_author) {
                let evicted = self.pending.remove(oldest);
                log::debug!(
                    "Round {}: {:?} exceeded {} early {}s, evicting digest {:?}",
                    round,
                    identity.author,
                    per_author_limit.max(1),
                    M::KIND,
                    evicted.message_identity().digest
                );
            }
        }
        log::trace!("Round {}: buffering {} from {:?} until a proposal arrives", round, M::KIND, identity.author);
        self.pending.push(message);
        true
    }

    fn offer(
        &mut self,
        message: M,
        proposal_digest: Hash,
        validate: impl Fn(&M) -> bool,
        round: &ConsensusRoundIdentifier,
    ) -> bool {
        let identity = message.message_identity();
        if !Self::is_for_round(&identity, round) {
            return false;
        }
        if identity.digest != proposal_digest {
            log::debug!(
                "Round {}: {} from {:?} for digest {:?} does not match proposal {:?}",
                round, M::KIND, identity.author, identity.digest, proposal_digest
            );
            return false;
        }
        if self.accepted.contains_key(&identity.author) {
            log::trace!("Round {}: {} from {:?} already counted", round, M::KIND, identity.author);
            return false;
        }
        if self.rejected.contains(&identity) {
            return false;
        }
        if !validate(&message) {
            log::debug!("Round {}: {} from {:?} failed validation", round, M::KIND, identity.author);
            self.rejected.insert(identity);
            return false;
        }
        self.accepted.insert(identity.author, message);
        true
    }

    fn migrate(&mut self, proposal_digest: Hash, validate: impl Fn(&M) -> bool, round: &ConsensusRoundIdentifier) {
        for message in std::mem::take(&mut self.pending) {
            self.offer(message, proposal_digest, &validate, round);
        }
    }
}

/// Consensus progress of a single round on this node.
///
/// The round accumulates at most one proposal plus the Prepares and Commits
/// that agree with it. Once prepared or committed it stays so; a `RoundState`
/// is dropped rather than reset when its round ends.
pub struct RoundState {
    round_identifier: ConsensusRoundIdentifier,
    quorum_size: usize,
    validator: Arc<dyn MessageValidator>,
    config: IbftConfig,

    proposal: Option<Proposal>,
    prepares: MessageSet<Prepare>,
    commits: MessageSet<Commit>,

    prepared: bool,
    committed: bool,
}

impl RoundState {
    pub fn new(
        round_identifier: ConsensusRoundIdentifier,
        quorum_size: usize,
        validator: Arc<dyn MessageValidator>,
    ) -> Self {
        Self::with_config(round_identifier, quorum_size, validator, IbftConfig::default())
    }

    /// # Panics
    ///
    /// If `quorum_size` is zero.
    pub fn with_config(
        round_identifier: ConsensusRoundIdentifier,
        quorum_size: usize,
        validator: Arc<dyn MessageValidator>,
        config: IbftConfig,
    ) -> Self {
        assert!(quorum_size >= 1, "quorum size must be at least 1");
        Self {
            round_identifier,
            quorum_size,
            validator,
            config,
            proposal: None,
            prepares: MessageSet::new(),
            commits: MessageSet::new(),
            prepared: false,
            committed: false,
        }
    }

    pub fn round_identifier(&self) -> &ConsensusRoundIdentifier {
        &self.round_identifier
    }

    pub fn quorum_size(&self) -> usize {
        self.quorum_size
    }

    /// Accepts `proposal` as the round's only proposal.
    ///
    /// Returns false, leaving the round untouched, if a proposal was already
    /// accepted or this one fails validation. On acceptance, Prepares and
    /// Commits buffered so far are validated against it.
    pub fn set_proposed_block(&mut self, proposal: Proposal) -> bool {
        if let Some(existing) = &self.proposal {
            log::debug!(
                "Round {}: ignoring proposal {:?} from {:?}, already have {:?}",
                self.round_identifier,
                proposal.digest(),
                proposal.author(),
                existing.digest()
            );
            return false;
        }
        if !self.validator.validate_proposal(&proposal) {
            log::debug!("Round {}: proposal from {:?} failed validation", self.round_identifier, proposal.author());
            return false;
        }

        let digest = proposal.digest();
        log::debug!("Round {}: accepted proposal {:?} from {:?}", self.round_identifier, digest, proposal.author());
        self.proposal = Some(proposal);

        let validator = &self.validator;
        self.prepares.migrate(digest, |prepare| validator.validate_prepare(prepare), &self.round_identifier);
        self.commits.migrate(digest, |commit| validator.validate_commit(commit), &self.round_identifier);

        self.update_state();
        true
    }

    /// Returns whether the Prepare was kept, either counted or buffered.
    pub fn add_prepare_message(&mut self, prepare: Prepare) -> bool {
        let retained = match self.proposal.as_ref().map(|p| p.digest()) {
            None => self.prepares.buffer(prepare, self.config.max_pending_per_author, &self.round_identifier),
            Some(digest) => {
                let validator = &self.validator;
                self.prepares.offer(prepare, digest, |p| validator.validate_prepare(p), &self.round_identifier)
            }
        };
        self.update_state();
        retained
    }

    /// Returns whether the Commit was kept. Commits that precede the proposal
    /// are buffered like Prepares and only count once validated against it.
    pub fn add_commit_message(&mut self, commit: Commit) -> bool {
        let retained = match self.proposal.as_ref().map(|p| p.digest()) {
            None => self.commits.buffer(commit, self.config.max_pending_per_author, &self.round_identifier),
            Some(digest) => {
                let validator = &self.validator;
                self.commits.offer(commit, digest, |c| validator.validate_commit(c), &self.round_identifier)
            }
        };
        self.update_state();
        retained
    }

    pub fn handle_message(&mut self, message: IbftMessage) -> bool {
        match message {
            IbftMessage::Proposal(proposal) => self.set_proposed_block(proposal),
            IbftMessage::Prepare(prepare) => self.add_prepare_message(prepare),
            IbftMessage::Commit(commit) => self.add_commit_message(commit),
        }
    }

    fn update_state(&mut self) {
        if self.proposal.is_none() {
            return;
        }
        if !self.prepared && self.prepares.len() >= prepare_message_count_for_quorum(self.quorum_size) {
            self.prepared = true;
            log::debug!("Round {}: prepared with {} prepares", self.round_identifier, self.prepares.len());
        }
        if self.prepared && !self.committed && self.commits.len() >= self.quorum_size {
            self.committed = true;
            log::debug!("Round {}: committed with {} commits", self.round_identifier, self.commits.len());
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn proposal(&self) -> Option<&Proposal> {
        self.proposal.as_ref()
    }

    pub fn proposed_block(&self) -> Option<&IbftBlock> {
        self.proposal.as_ref().map(Proposal::block)
    }

    pub fn prepare_count(&self) -> usize {
        self.prepares.len()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// The proposal and the Prepares counted so far, if the round is prepared.
    ///
    /// Later calls may include more Prepares than earlier ones.
    pub fn construct_prepared_round_artifacts(&self) -> Option<PreparedRoundArtifacts> {
        if !self.prepared {
            return None;
        }
        let proposal = self.proposal.as_ref()?;
        Some(PreparedRoundArtifacts::new(proposal.clone(), self.prepares.accepted().cloned().collect()))
    }

    /// Seals of every counted Commit, one per author.
    pub fn commit_seals(&self) -> Vec<RlpSignature> {
        self.commits.accepted().map(Commit::commit_seal).collect()
    }
}
