// crates/neura-ibft/src/statemachine/mod.rs

pub mod round_state;

pub use round_state::RoundState;
