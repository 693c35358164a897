// crates/neura-ibft/src/mocks/mod.rs

pub mod mock_message_validator;

pub use mock_message_validator::MockMessageValidator;
