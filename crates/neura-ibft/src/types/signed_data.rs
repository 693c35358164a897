use crate::error::IbftError;
use crate::payload::IbftPayload;
use crate::types::{NodeKey, RlpSignature};
use alloy_primitives::{keccak256, Address, B256 as Hash};
use alloy_rlp::{BufMut, Decodable, Encodable, Header};

/// A payload together with its author's signature.
///
/// The author is recovered from the signature when the value is built (either
/// by signing or by decoding), so every `SignedData` in memory has a known
/// author. RLP: `[payload, signature]`. The signature covers the payload's
/// message code as well as its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedData<T: IbftPayload> {
    payload: T,
    signature: RlpSignature,
    author: Address,
}

impl<T: IbftPayload> SignedData<T> {
    /// Builds signed data from parts, recovering the author from the signature.
    pub fn from_parts(payload: T, signature: RlpSignature) -> Result<Self, IbftError> {
        let author = signature.recover_address(Self::calculate_payload_hash(&payload))?;
        Ok(Self { payload, signature, author })
    }

    pub fn sign(payload: T, signing_key: &NodeKey) -> Result<Self, IbftError> {
        let signature = RlpSignature::sign_prehash(signing_key, Self::calculate_payload_hash(&payload))?;
        Self::from_parts(payload, signature)
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn signature(&self) -> &RlpSignature {
        &self.signature
    }

    pub fn author(&self) -> Address {
        self.author
    }

    /// keccak256 of the message code followed by the payload RLP, so a
    /// signature over one message kind never verifies as another.
    fn calculate_payload_hash(payload: &T) -> Hash {
        let mut preimage = Vec::with_capacity(1 + payload.length());
        preimage.push(payload.message_type());
        payload.encode(&mut preimage);
        keccak256(preimage)
    }
}

impl<T: IbftPayload> Encodable for SignedData<T> {
    fn encode(&self, out: &mut dyn BufMut) {
        let header = Header { list: true, payload_length: self.payload.length() + self.signature.length() };
        header.encode(out);
        self.payload.encode(out);
        self.signature.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.payload.length() + self.signature.length();
        Header { list: true, payload_length }.length() + payload_length
    }
}

impl<T: IbftPayload> Decodable for SignedData<T> {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(alloy_rlp::Error::UnexpectedString);
        }
        let remaining_before_payload = buf.len();
        let payload = T::decode(buf)?;
        let signature = RlpSignature::decode(buf)?;
        let decoded_len = remaining_before_payload - buf.len();

        if decoded_len != header.payload_length {
            return Err(alloy_rlp::Error::ListLengthMismatch { expected: header.payload_length, got: decoded_len });
        }
        Self::from_parts(payload, signature)
            .map_err(|_| alloy_rlp::Error::Custom("SignedData author could not be recovered"))
    }
}
