use crate::messagedata::ibft_v2;
use crate::payload::ibft_payload::IbftPayload;
use crate::types::{ConsensusRoundIdentifier, RlpSignature};
use alloy_primitives::B256 as Hash;
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// Represents the payload of a COMMIT message in IBFT.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct CommitPayload {
    /// The round identifier (block number and round number).
    pub round_identifier: ConsensusRoundIdentifier,
    /// The digest of the proposed block being committed to.
    pub digest: Hash,
    /// ECDSA signature of the committer over `digest`, destined for the block header.
    pub commit_seal: RlpSignature,
}

impl CommitPayload {
    pub fn new(round_identifier: ConsensusRoundIdentifier, digest: Hash, commit_seal: RlpSignature) -> Self {
        Self { round_identifier, digest, commit_seal }
    }
}

impl IbftPayload for CommitPayload {
    fn round_identifier(&self) -> &ConsensusRoundIdentifier {
        &self.round_identifier
    }

    fn message_type(&self) -> u8 {
        ibft_v2::COMMIT
    }

    fn digest(&self) -> Hash {
        self.digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::node_key::deterministic_node_key;
    use alloy_primitives::b256;
    use alloy_rlp::{Decodable, Encodable};

    fn mock_digest() -> Hash {
        b256!("0000000000000000000000000000000000000000000000000000000000000002")
    }

    #[test]
    fn commit_payload_rlp_roundtrip_keeps_seal() {
        let seal = RlpSignature::sign_prehash(&deterministic_node_key(5), mock_digest()).unwrap();
        let original = CommitPayload::new(ConsensusRoundIdentifier::new(1, 2), mock_digest(), seal);

        let mut encoded = Vec::new();
        original.encode(&mut encoded);
        let decoded = CommitPayload::decode(&mut encoded.as_slice()).unwrap();

        assert_eq!(decoded, original);
        assert_eq!(decoded.commit_seal, seal);
        assert_eq!(decoded.message_type(), ibft_v2::COMMIT);
    }

    #[test]
    fn commit_payload_without_seal_is_rejected() {
        // [[1, 2], digest] is a prepare payload, one field short for a commit
        let prepare_like = crate::payload::PreparePayload::new(ConsensusRoundIdentifier::new(1, 2), mock_digest());
        let encoded = alloy_rlp::encode(prepare_like);
        assert!(CommitPayload::decode(&mut encoded.as_slice()).is_err());
    }
}
