use crate::error::IbftError;
use crate::types::{BlockHashing, IbftBlockHeader};
use alloy_primitives::{Bytes, B256 as Hash};
use alloy_rlp::{BufMut, Decodable, Encodable, Header as RlpHeader, RlpDecodableWrapper, RlpEncodableWrapper};

/// An opaque, already-encoded transaction. Execution is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodableWrapper, RlpDecodableWrapper)]
pub struct Transaction(pub Bytes);

/// A candidate block: RLP `[header, transactions, ommers]`.
///
/// The hash is fixed when the block is built, by the chain's [`BlockHashing`]
/// policy, and is not part of the encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbftBlock {
    pub header: IbftBlockHeader,
    pub transactions: Vec<Transaction>,
    pub ommers: Vec<IbftBlockHeader>,
    hash: Hash,
}

impl IbftBlock {
    pub fn new(
        header: IbftBlockHeader,
        transactions: Vec<Transaction>,
        ommers: Vec<IbftBlockHeader>,
        hashing: &dyn BlockHashing,
    ) -> Result<Self, IbftError> {
        let hash = hashing.block_hash(&header)?;
        Ok(Self { header, transactions, ommers, hash })
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }

    /// Decodes a block, hashing its header with `hashing`.
    pub fn decode(buf: &mut &[u8], hashing: &dyn BlockHashing) -> Result<Self, IbftError> {
        let rlp_header = RlpHeader::decode(buf)?;
        if !rlp_header.list {
            return Err(alloy_rlp::Error::UnexpectedString.into());
        }
        let remaining_len_before = buf.len();

        let header = IbftBlockHeader::decode(buf)?;
        let transactions = Vec::<Transaction>::decode(buf)?;
        let ommers = Vec::<IbftBlockHeader>::decode(buf)?;

        let decoded_len = remaining_len_before - buf.len();
        if decoded_len != rlp_header.payload_length {
            return Err(alloy_rlp::Error::ListLengthMismatch { expected: rlp_header.payload_length, got: decoded_len }.into());
        }
        Self::new(header, transactions, ommers, hashing)
    }

    fn rlp_payload_length(&self) -> usize {
        self.header.length() + self.transactions.length() + self.ommers.length()
    }
}

impl Encodable for IbftBlock {
    fn encode(&self, out: &mut dyn BufMut) {
        RlpHeader { list: true, payload_length: self.rlp_payload_length() }.encode(out);
        self.header.encode(out);
        self.transactions.encode(out);
        self.ommers.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        RlpHeader { list: true, payload_length }.length() + payload_length
    }
}
