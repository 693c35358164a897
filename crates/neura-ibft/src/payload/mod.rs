// crates/neura-ibft/src/payload/mod.rs

pub mod commit_payload;
pub mod ibft_payload;
pub mod message_factory;
pub mod prepare_payload;
pub mod proposal_payload;

pub use commit_payload::CommitPayload;
pub use ibft_payload::IbftPayload;
pub use message_factory::MessageFactory;
pub use prepare_payload::PreparePayload;
pub use proposal_payload::ProposalPayload;
