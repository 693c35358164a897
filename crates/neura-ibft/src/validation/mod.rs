// crates/neura-ibft/src/validation/mod.rs

pub mod signed_data_validator;

#[cfg(test)]
mod tests;

use crate::messagewrappers::{Commit, Prepare, Proposal};

pub use signed_data_validator::SignedDataValidator;

/// Decides whether a message may take part in a round.
///
/// Implementations are consulted by [`RoundState`](crate::statemachine::RoundState)
/// before a message is counted. Calls must be synchronous, fast and free of
/// side effects visible to the round; a `false` result is a policy outcome,
/// not an error.
pub trait MessageValidator: Send + Sync {
    fn validate_proposal(&self, proposal: &Proposal) -> bool;
    fn validate_prepare(&self, prepare: &Prepare) -> bool;
    fn validate_commit(&self, commit: &Commit) -> bool;
}
