use crate::error::IbftError;
use crate::types::RlpSignature;
use alloy_primitives::{Address, Bytes, B256};
use alloy_rlp::{BufMut, Decodable, Encodable, Header, RlpDecodable, RlpEncodable, EMPTY_STRING_CODE};

pub const ADD_VOTE: u8 = 0xFF;
pub const DROP_VOTE: u8 = 0x00;

/// A validator-set vote carried in the extra data of a proposed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Vote {
    pub recipient: Address,
    pub vote_type: u8,
}

impl Vote {
    pub fn add(recipient: Address) -> Self {
        Self { recipient, vote_type: ADD_VOTE }
    }

    pub fn drop(recipient: Address) -> Self {
        Self { recipient, vote_type: DROP_VOTE }
    }
}

/// Which parts of the extra data take part in an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraDataEncoding {
    All,
    /// Used for the digest signed by commit seals.
    ExcludeCommitSeals,
    /// Used for the on-chain block hash, which must not depend on the round a block was agreed in.
    ExcludeCommitSealsAndRoundNumber,
}

/// The structured content of an IBFT 2.0 header's `extraData` field:
/// RLP `[vanity, validators, vote | empty, round, committed_seals]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IbftExtraData {
    pub vanity_data: B256,
    pub validators: Vec<Address>,
    pub vote: Option<Vote>,
    pub round: u32,
    pub committed_seals: Vec<RlpSignature>,
}

impl IbftExtraData {
    pub fn new(
        vanity_data: B256,
        validators: Vec<Address>,
        vote: Option<Vote>,
        round: u32,
        committed_seals: Vec<RlpSignature>,
    ) -> Self {
        Self { vanity_data, validators, vote, round, committed_seals }
    }

    pub fn decode_from(extra_data: &Bytes) -> Result<Self, IbftError> {
        let mut buf = extra_data.as_ref();
        let decoded = Self::decode(&mut buf)
            .map_err(|e| IbftError::InvalidExtraData(e.to_string()))?;
        if !buf.is_empty() {
            return Err(IbftError::InvalidExtraData(format!("{} trailing bytes", buf.len())));
        }
        Ok(decoded)
    }

    pub fn encode_with(&self, encoding: ExtraDataEncoding) -> Bytes {
        let payload_length = self.payload_length(encoding);
        let mut out = Vec::with_capacity(payload_length + 4);
        Header { list: true, payload_length }.encode(&mut out);
        self.vanity_data.encode(&mut out);
        self.validators.encode(&mut out);
        match &self.vote {
            Some(vote) => vote.encode(&mut out),
            None => out.put_u8(EMPTY_STRING_CODE),
        }
        match encoding {
            ExtraDataEncoding::All => {
                self.round.encode(&mut out);
                self.committed_seals.encode(&mut out);
            }
            ExtraDataEncoding::ExcludeCommitSeals => self.round.encode(&mut out),
            ExtraDataEncoding::ExcludeCommitSealsAndRoundNumber => 0u32.encode(&mut out),
        }
        out.into()
    }

    /// Copy of this extra data carrying the given committed seals.
    pub fn with_committed_seals(&self, committed_seals: Vec<RlpSignature>) -> Self {
        Self { committed_seals, ..self.clone() }
    }

    fn payload_length(&self, encoding: ExtraDataEncoding) -> usize {
        let vote_length = self.vote.as_ref().map_or(1, Encodable::length);
        let tail_length = match encoding {
            ExtraDataEncoding::All => self.round.length() + self.committed_seals.length(),
            ExtraDataEncoding::ExcludeCommitSeals => self.round.length(),
            ExtraDataEncoding::ExcludeCommitSealsAndRoundNumber => 0u32.length(),
        };
        self.vanity_data.length() + self.validators.length() + vote_length + tail_length
    }
}

impl Encodable for IbftExtraData {
    fn encode(&self, out: &mut dyn BufMut) {
        out.put_slice(&self.encode_with(ExtraDataEncoding::All));
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length(ExtraDataEncoding::All);
        Header { list: true, payload_length }.length() + payload_length
    }
}

impl Decodable for IbftExtraData {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(alloy_rlp::Error::UnexpectedString);
        }
        let remaining_before = buf.len();

        let vanity_data = B256::decode(buf)?;
        let validators = Vec::<Address>::decode(buf)?;
        let vote = match buf.first() {
            Some(&EMPTY_STRING_CODE) => {
                *buf = &buf[1..];
                None
            }
            Some(_) => Some(Vote::decode(buf)?),
            None => return Err(alloy_rlp::Error::InputTooShort),
        };
        let round = u32::decode(buf)?;
        let committed_seals = Vec::<RlpSignature>::decode(buf)?;

        let consumed = remaining_before - buf.len();
        if consumed != header.payload_length {
            return Err(alloy_rlp::Error::ListLengthMismatch { expected: header.payload_length, got: consumed });
        }
        Ok(Self { vanity_data, validators, vote, round, committed_seals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::node_key::deterministic_node_key;
    use alloy_primitives::keccak256;

    fn sample(vote: Option<Vote>) -> IbftExtraData {
        let seal = RlpSignature::sign_prehash(&deterministic_node_key(1), keccak256(b"block")).unwrap();
        IbftExtraData::new(
            B256::from([0x11; 32]),
            vec![Address::from([1; 20]), Address::from([2; 20])],
            vote,
            3,
            vec![seal],
        )
    }

    #[test]
    fn roundtrip_with_and_without_vote() {
        for vote in [None, Some(Vote::add(Address::from([9; 20]))), Some(Vote::drop(Address::ZERO))] {
            let extra = sample(vote);
            let encoded = extra.encode_with(ExtraDataEncoding::All);
            assert_eq!(encoded.len(), extra.length());
            assert_eq!(IbftExtraData::decode_from(&encoded).unwrap(), extra);
        }
    }

    #[test]
    fn excluding_seals_ignores_seal_content() {
        let extra = sample(None);
        let unsealed = extra.with_committed_seals(Vec::new());
        assert_ne!(extra.encode_with(ExtraDataEncoding::All), unsealed.encode_with(ExtraDataEncoding::All));
        assert_eq!(
            extra.encode_with(ExtraDataEncoding::ExcludeCommitSeals),
            unsealed.encode_with(ExtraDataEncoding::ExcludeCommitSeals)
        );
    }

    #[test]
    fn on_chain_encoding_ignores_round() {
        let mut other_round = sample(None);
        other_round.round = 7;
        assert_ne!(
            sample(None).encode_with(ExtraDataEncoding::ExcludeCommitSeals),
            other_round.encode_with(ExtraDataEncoding::ExcludeCommitSeals)
        );
        assert_eq!(
            sample(None).encode_with(ExtraDataEncoding::ExcludeCommitSealsAndRoundNumber),
            other_round.encode_with(ExtraDataEncoding::ExcludeCommitSealsAndRoundNumber)
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(IbftExtraData::decode_from(&Bytes::from_static(&[0x01, 0x02])).is_err());
        let mut encoded = sample(None).encode_with(ExtraDataEncoding::All).to_vec();
        encoded.push(0x00);
        assert!(IbftExtraData::decode_from(&Bytes::from(encoded)).is_err());
    }
}
