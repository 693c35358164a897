// crates/neura-ibft/src/types/mod.rs

pub mod block;
pub mod block_hashing;
pub mod config;
pub mod consensus_round_identifier;
pub mod extra_data;
pub mod header;
pub mod node_key;
pub mod quorum;
pub mod rlp_signature;
pub mod signed_data;

pub use block::{IbftBlock, Transaction};
pub use block_hashing::{BlockHashing, IbftBlockHashing, KeccakBlockHashing};
pub use config::IbftConfig;
pub use consensus_round_identifier::ConsensusRoundIdentifier;
pub use extra_data::{ExtraDataEncoding, IbftExtraData, Vote};
pub use header::IbftBlockHeader;
pub use node_key::{node_key_to_address, NodeKey};
pub use rlp_signature::RlpSignature;
pub use signed_data::SignedData;
