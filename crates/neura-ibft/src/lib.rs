// crates/neura-ibft/src/lib.rs

pub mod error;
pub mod messagedata;
pub mod messagewrappers;
pub mod mocks;
pub mod payload;
pub mod statemachine;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing_helpers;

pub use error::IbftError;
pub use messagedata::IbftMessage;
pub use messagewrappers::{Commit, Prepare, PreparedCertificate, PreparedRoundArtifacts, Proposal};
pub use statemachine::RoundState;
pub use types::{ConsensusRoundIdentifier, IbftConfig};
pub use validation::MessageValidator;
