use crate::error::IbftError;
use crate::types::{node_key::verifying_key_to_address, NodeKey};
use alloy_primitives::{Address, Signature, B256, U256};
use alloy_rlp::{BufMut, Decodable, Encodable, Error as RlpError, Header};
use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey};

/// A wrapper around alloy_primitives::Signature to provide RLP Encodable/Decodable support
/// based on RLP([v, r, s]), where v is a u8 parity bit (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RlpSignature(pub Signature);

impl RlpSignature {
    pub fn new(signature: Signature) -> Self {
        Self(signature)
    }

    pub fn into_inner(self) -> Signature {
        self.0
    }

    /// Signs a 32 byte prehash with the node key, producing a recoverable signature.
    pub fn sign_prehash(node_key: &NodeKey, prehash: B256) -> Result<Self, IbftError> {
        let (k256_sig, recovery_id) = node_key.sign_prehash_recoverable(prehash.as_slice())?;

        let r_b256 = B256::from(U256::from_be_slice(&k256_sig.r().to_bytes()).to_be_bytes());
        let s_b256 = B256::from(U256::from_be_slice(&k256_sig.s().to_bytes()).to_be_bytes());

        Ok(Self(Signature::from_scalars_and_parity(r_b256, s_b256, recovery_id.is_y_odd())))
    }

    /// Recovers the address of the key which produced this signature over `prehash`.
    pub fn recover_address(&self, prehash: B256) -> Result<Address, IbftError> {
        let recovery_id = RecoveryId::try_from(u8::from(self.0.v()))
            .map_err(|e| IbftError::RecoveryError(format!("Invalid recovery id: {}", e)))?;

        let r_bytes: [u8; 32] = self.0.r().to_be_bytes();
        let s_bytes: [u8; 32] = self.0.s().to_be_bytes();
        let k256_sig = K256Signature::from_scalars(r_bytes, s_bytes)
            .map_err(|e| IbftError::RecoveryError(format!("Invalid signature scalars: {}", e)))?;

        let verifying_key = VerifyingKey::recover_from_prehash(prehash.as_slice(), &k256_sig, recovery_id)
            .map_err(|e| IbftError::RecoveryError(format!("Public key recovery failed: {}", e)))?;

        verifying_key_to_address(&verifying_key)
    }
}

impl std::ops::Deref for RlpSignature {
    type Target = Signature;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl RlpSignature {
    fn rlp_payload_length(&self) -> usize {
        u8::from(self.0.v()).length() + self.0.r().length() + self.0.s().length()
    }
}

impl Encodable for RlpSignature {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.rlp_payload_length() }.encode(out);
        u8::from(self.0.v()).encode(out);
        self.0.r().encode(out);
        self.0.s().encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        Header { list: true, payload_length }.length() + payload_length
    }
}

impl Decodable for RlpSignature {
    fn decode(buf: &mut &[u8]) -> Result<Self, RlpError> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(RlpError::UnexpectedString);
        }
        let remaining_len_before = buf.len();

        let v_byte = u8::decode(buf)?;
        let r = U256::decode(buf)?;
        let s = U256::decode(buf)?;

        if remaining_len_before - buf.len() != header.payload_length {
            return Err(RlpError::ListLengthMismatch {
                expected: header.payload_length,
                got: remaining_len_before - buf.len(),
            });
        }

        let parity = match v_byte {
            0 => false,
            1 => true,
            _ => return Err(RlpError::Custom("Invalid parity byte for RlpSignature")),
        };

        Ok(RlpSignature(Signature::from_scalars_and_parity(
            B256::from(r.to_be_bytes::<32>()),
            B256::from(s.to_be_bytes::<32>()),
            parity,
        )))
    }
}

impl From<Signature> for RlpSignature {
    fn from(sig: Signature) -> Self {
        RlpSignature(sig)
    }
}

impl From<RlpSignature> for Signature {
    fn from(rlp_sig: RlpSignature) -> Self {
        rlp_sig.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::node_key::{deterministic_node_key, node_key_to_address};
    use alloy_primitives::keccak256;

    #[test]
    fn signature_recovers_to_signer() {
        let key = deterministic_node_key(7);
        let prehash = keccak256(b"ibft");
        let signature = RlpSignature::sign_prehash(&key, prehash).unwrap();
        assert_eq!(signature.recover_address(prehash).unwrap(), node_key_to_address(&key).unwrap());
    }

    #[test]
    fn recovery_over_other_hash_yields_other_address() {
        let key = deterministic_node_key(7);
        let signature = RlpSignature::sign_prehash(&key, keccak256(b"one")).unwrap();
        let recovered = signature.recover_address(keccak256(b"two"));
        assert_ne!(recovered.ok(), Some(node_key_to_address(&key).unwrap()));
    }

    #[test]
    fn rlp_roundtrip() {
        let key = deterministic_node_key(3);
        let signature = RlpSignature::sign_prehash(&key, keccak256(b"seal")).unwrap();
        let encoded = alloy_rlp::encode(signature);
        assert_eq!(encoded.len(), signature.length());
        let decoded = RlpSignature::decode(&mut encoded.as_slice()).unwrap();
        assert_eq!(decoded, signature);
    }

    #[test]
    fn decode_rejects_non_list_and_bad_parity() {
        assert!(RlpSignature::decode(&mut [0x80u8].as_slice()).is_err());
        // [2, 1, 1]
        assert!(RlpSignature::decode(&mut [0xc3u8, 0x02, 0x01, 0x01].as_slice()).is_err());
    }
}
