// crates/neura-ibft/src/testing_helpers.rs
#![allow(dead_code)]

use crate::payload::MessageFactory;
use crate::types::node_key::deterministic_node_key;
use crate::types::{
    ExtraDataEncoding, IbftBlock, IbftBlockHashing, IbftBlockHeader, IbftExtraData, NodeKey, Transaction,
};
use alloy_primitives::{Address, Bloom, Bytes, B256, B64, U256};
use std::sync::Arc;

pub fn test_node_key(seed: u8) -> Arc<NodeKey> {
    Arc::new(deterministic_node_key(seed))
}

pub fn test_message_factory(seed: u8) -> MessageFactory {
    MessageFactory::new(test_node_key(seed)).expect("deterministic key has an address")
}

pub fn test_address(seed: u8) -> Address {
    test_message_factory(seed).local_address()
}

pub fn test_header(number: u64, round: u32, validators: Vec<Address>) -> IbftBlockHeader {
    let extra_data = IbftExtraData::new(B256::from([0x11; 32]), validators, None, round, Vec::new());
    IbftBlockHeader::new(
        B256::from([0x01; 32]),
        B256::ZERO,
        Address::from([0x42; 20]),
        B256::from([0x03; 32]),
        B256::from([0x04; 32]),
        B256::from([0x05; 32]),
        Bloom::default(),
        U256::from(1),
        number,
        30_000_000,
        0,
        1_700_000_000 + number,
        extra_data.encode_with(ExtraDataEncoding::All),
        B256::ZERO,
        B64::ZERO,
    )
}

pub fn test_block(number: u64, round: u32) -> IbftBlock {
    IbftBlock::new(
        test_header(number, round, Vec::new()),
        vec![Transaction(Bytes::from_static(&[0xde, 0xad]))],
        Vec::new(),
        &IbftBlockHashing,
    )
    .expect("test header carries valid extra data")
}

/// Same height and round as [`test_block`], different content and therefore a different digest.
pub fn other_test_block(number: u64, round: u32) -> IbftBlock {
    let header = IbftBlockHeader { gas_used: 21_000, ..test_header(number, round, Vec::new()) };
    IbftBlock::new(header, Vec::new(), Vec::new(), &IbftBlockHashing).expect("test header carries valid extra data")
}
