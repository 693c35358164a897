use crate::messagewrappers::{Commit, Prepare, Proposal};
use crate::validation::MessageValidator;
use alloy_primitives::Address;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A scriptable [`MessageValidator`] that counts how often it is consulted.
///
/// By default every message is valid. Individual authors can be blacklisted
/// for Prepares and Commits.
#[derive(Debug)]
pub struct MockMessageValidator {
    accept_proposals: bool,
    accept_prepares: bool,
    accept_commits: bool,
    rejected_authors: HashSet<Address>,
    proposal_calls: AtomicUsize,
    prepare_calls: AtomicUsize,
    commit_calls: AtomicUsize,
}

impl Default for MockMessageValidator {
    fn default() -> Self {
        Self::accepting_all()
    }
}

impl MockMessageValidator {
    pub fn accepting_all() -> Self {
        Self {
            accept_proposals: true,
            accept_prepares: true,
            accept_commits: true,
            rejected_authors: HashSet::new(),
            proposal_calls: AtomicUsize::new(0),
            prepare_calls: AtomicUsize::new(0),
            commit_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_proposals(mut self, valid: bool) -> Self {
        self.accept_proposals = valid;
        self
    }

    pub fn with_prepares(mut self, valid: bool) -> Self {
        self.accept_prepares = valid;
        self
    }

    pub fn with_commits(mut self, valid: bool) -> Self {
        self.accept_commits = valid;
        self
    }

    /// Prepares and Commits from `author` fail validation.
    pub fn rejecting_author(mut self, author: Address) -> Self {
        self.rejected_authors.insert(author);
        self
    }

    pub fn proposal_calls(&self) -> usize {
        self.proposal_calls.load(Ordering::SeqCst)
    }

    pub fn prepare_calls(&self) -> usize {
        self.prepare_calls.load(Ordering::SeqCst)
    }

    pub fn commit_calls(&self) -> usize {
        self.commit_calls.load(Ordering::SeqCst)
    }
}

impl MessageValidator for MockMessageValidator {
    fn validate_proposal(&self, _proposal: &Proposal) -> bool {
        self.proposal_calls.fetch_add(1, Ordering::SeqCst);
        self.accept_proposals
    }

    fn validate_prepare(&self, prepare: &Prepare) -> bool {
        self.prepare_calls.fetch_add(1, Ordering::SeqCst);
        self.accept_prepares && !self.rejected_authors.contains(&prepare.author())
    }

    fn validate_commit(&self, commit: &Commit) -> bool {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        self.accept_commits && !self.rejected_authors.contains(&commit.author())
    }
}
