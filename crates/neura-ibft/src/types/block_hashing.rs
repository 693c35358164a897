use crate::error::IbftError;
use crate::types::{ExtraDataEncoding, IbftBlockHeader, IbftExtraData};
use alloy_primitives::B256 as Hash;

/// Chain-specific policy for computing a block's hash.
///
/// Injected wherever blocks are decoded, since how a header is hashed depends
/// on the consensus protocol version.
pub trait BlockHashing: Send + Sync {
    fn block_hash(&self, header: &IbftBlockHeader) -> Result<Hash, IbftError>;
}

/// IBFT 2.0 hashing: the header is hashed with its committed seals removed
/// from the extra data. This is the digest proposals carry and commit seals sign.
#[derive(Debug, Clone, Copy, Default)]
pub struct IbftBlockHashing;

impl IbftBlockHashing {
    pub fn hash_for_committed_seal(header: &IbftBlockHeader) -> Result<Hash, IbftError> {
        Self::hash_with(header, ExtraDataEncoding::ExcludeCommitSeals)
    }

    /// Hash under which the block is stored on chain; independent of the round it was agreed in.
    pub fn hash_on_chain(header: &IbftBlockHeader) -> Result<Hash, IbftError> {
        Self::hash_with(header, ExtraDataEncoding::ExcludeCommitSealsAndRoundNumber)
    }

    fn hash_with(header: &IbftBlockHeader, encoding: ExtraDataEncoding) -> Result<Hash, IbftError> {
        let extra_data = IbftExtraData::decode_from(&header.extra_data)?;
        Ok(header.with_extra_data(extra_data.encode_with(encoding)).rlp_hash())
    }
}

impl BlockHashing for IbftBlockHashing {
    fn block_hash(&self, header: &IbftBlockHeader) -> Result<Hash, IbftError> {
        Self::hash_for_committed_seal(header)
    }
}

/// Plain keccak256 over the header RLP.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeccakBlockHashing;

impl BlockHashing for KeccakBlockHashing {
    fn block_hash(&self, header: &IbftBlockHeader) -> Result<Hash, IbftError> {
        Ok(header.rlp_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::node_key::deterministic_node_key;
    use crate::types::RlpSignature;
    use alloy_primitives::{keccak256, Address, Bytes, B256, B64, U256};

    fn header_with(extra: &IbftExtraData) -> IbftBlockHeader {
        IbftBlockHeader::new(
            B256::from([1; 32]),
            B256::ZERO,
            Address::from([0xaa; 20]),
            B256::from([3; 32]),
            B256::from([4; 32]),
            B256::from([5; 32]),
            Default::default(),
            U256::from(1),
            10,
            30_000_000,
            0,
            1_700_000_000,
            extra.encode_with(ExtraDataEncoding::All),
            B256::ZERO,
            B64::ZERO,
        )
    }

    #[test]
    fn committed_seals_do_not_change_seal_digest() {
        let unsealed = IbftExtraData::new(B256::ZERO, vec![Address::from([1; 20])], None, 2, Vec::new());
        let seal = RlpSignature::sign_prehash(&deterministic_node_key(1), keccak256(b"x")).unwrap();
        let sealed = unsealed.with_committed_seals(vec![seal]);

        let unsealed_header = header_with(&unsealed);
        let sealed_header = header_with(&sealed);

        assert_ne!(unsealed_header.rlp_hash(), sealed_header.rlp_hash());
        assert_eq!(
            IbftBlockHashing.block_hash(&unsealed_header).unwrap(),
            IbftBlockHashing.block_hash(&sealed_header).unwrap()
        );
    }

    #[test]
    fn on_chain_hash_ignores_round_but_seal_digest_does_not() {
        let round_two = IbftExtraData::new(B256::ZERO, Vec::new(), None, 2, Vec::new());
        let round_five = IbftExtraData { round: 5, ..round_two.clone() };

        let a = header_with(&round_two);
        let b = header_with(&round_five);
        assert_ne!(
            IbftBlockHashing::hash_for_committed_seal(&a).unwrap(),
            IbftBlockHashing::hash_for_committed_seal(&b).unwrap()
        );
        assert_eq!(IbftBlockHashing::hash_on_chain(&a).unwrap(), IbftBlockHashing::hash_on_chain(&b).unwrap());
    }

    #[test]
    fn malformed_extra_data_is_an_error() {
        let mut header = header_with(&IbftExtraData::default());
        header.extra_data = Bytes::from_static(b"not rlp");
        assert!(IbftBlockHashing.block_hash(&header).is_err());
        assert!(KeccakBlockHashing.block_hash(&header).is_ok());
    }
}
