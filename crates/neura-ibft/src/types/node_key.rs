use crate::error::IbftError;
use alloy_primitives::{keccak256, Address};
use k256::ecdsa::VerifyingKey;

/// The node's secp256k1 identity key.
pub type NodeKey = k256::ecdsa::SigningKey;

/// Derives the Ethereum address of a public key: the last 20 bytes of the
/// keccak256 hash of the uncompressed point without its 0x04 prefix.
pub fn verifying_key_to_address(verifying_key: &VerifyingKey) -> Result<Address, IbftError> {
    let encoded_point = verifying_key.to_encoded_point(false);
    let uncompressed_pk_bytes = encoded_point.as_bytes();
    if uncompressed_pk_bytes.is_empty() || uncompressed_pk_bytes[0] != 0x04 {
        return Err(IbftError::CryptoError("Invalid uncompressed public key format".to_string()));
    }
    let hashed_pk = keccak256(&uncompressed_pk_bytes[1..]);
    Ok(Address::from_slice(&hashed_pk[12..]))
}

pub fn node_key_to_address(node_key: &NodeKey) -> Result<Address, IbftError> {
    verifying_key_to_address(node_key.verifying_key())
}

#[cfg(test)]
pub(crate) fn deterministic_node_key(seed: u8) -> NodeKey {
    let mut bytes = [0u8; 32];
    bytes[31] = seed.max(1);
    bytes[0] = seed;
    let secret_key = k256::SecretKey::from_slice(&bytes).expect("seeded secret key is a valid scalar");
    NodeKey::from(secret_key)
}
