use crate::error::IbftError;
use crate::messagewrappers::bft_message::BftMessage;
use crate::payload::ProposalPayload;
use crate::types::{BlockHashing, IbftBlock, SignedData};
use alloy_rlp::{BufMut, Decodable, Encodable, Header};
use std::ops::Deref;

/// An IBFT Proposal: the proposer's signed payload plus the full candidate block.
///
/// Nothing here checks that the payload digest matches the block; that is a
/// validation concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    inner: BftMessage<ProposalPayload>,
    block: IbftBlock,
}

impl Deref for Proposal {
    type Target = BftMessage<ProposalPayload>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Proposal {
    pub fn new(signed_payload: SignedData<ProposalPayload>, block: IbftBlock) -> Self {
        Self { inner: BftMessage::new(signed_payload), block }
    }

    pub fn signed_payload(&self) -> &SignedData<ProposalPayload> {
        &self.inner.signed_payload
    }

    pub fn block(&self) -> &IbftBlock {
        &self.block
    }

    /// Decodes `[signed_payload, block]`, hashing the block with `hashing`.
    pub fn decode(buf: &mut &[u8], hashing: &dyn BlockHashing) -> Result<Self, IbftError> {
        let outer_header = Header::decode(buf)?;
        if !outer_header.list {
            return Err(alloy_rlp::Error::UnexpectedString.into());
        }
        let outer_payload_start_len = buf.len();

        let signed_payload = SignedData::<ProposalPayload>::decode(buf)?;
        let block = IbftBlock::decode(buf, hashing)?;

        let outer_decoded_bytes = outer_payload_start_len - buf.len();
        if outer_decoded_bytes != outer_header.payload_length {
            return Err(alloy_rlp::Error::ListLengthMismatch {
                expected: outer_header.payload_length,
                got: outer_decoded_bytes,
            }
            .into());
        }
        Ok(Self::new(signed_payload, block))
    }

    fn rlp_payload_length(&self) -> usize {
        self.inner.signed_payload.length() + self.block.length()
    }
}

// RLP Encoding: RLP_LIST(SignedProposalPayload, Block)
impl Encodable for Proposal {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.rlp_payload_length() }.encode(out);
        self.inner.signed_payload.encode(out);
        self.block.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        Header { list: true, payload_length }.length() + payload_length
    }
}
