// crates/neura-ibft/src/messagewrappers/mod.rs

pub mod bft_message;
pub mod commit;
pub mod prepare;
pub mod prepared_certificate;
pub mod proposal;

pub use bft_message::{BftMessage, MessageIdentity};
pub use commit::Commit;
pub use prepare::Prepare;
pub use prepared_certificate::{PreparedCertificate, PreparedRoundArtifacts};
pub use proposal::Proposal;
