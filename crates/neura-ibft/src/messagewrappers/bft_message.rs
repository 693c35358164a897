use crate::payload::IbftPayload;
use crate::types::{ConsensusRoundIdentifier, SignedData};
use alloy_primitives::{Address, B256 as Hash};

/// Generic IBFT message wrapper around a signed payload of type `P`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BftMessage<P: IbftPayload> {
    pub signed_payload: SignedData<P>,
}

impl<P: IbftPayload> BftMessage<P> {
    pub fn new(signed_payload: SignedData<P>) -> Self {
        Self { signed_payload }
    }

    pub fn author(&self) -> Address {
        self.signed_payload.author()
    }

    pub fn payload(&self) -> &P {
        self.signed_payload.payload()
    }

    pub fn round_identifier(&self) -> &ConsensusRoundIdentifier {
        self.payload().round_identifier()
    }

    pub fn digest(&self) -> Hash {
        self.payload().digest()
    }

    pub fn message_type(&self) -> u8 {
        self.payload().message_type()
    }

    /// The (round, author, digest) triple under which the message is counted towards quorum.
    pub fn identity(&self) -> MessageIdentity {
        MessageIdentity {
            round_identifier: *self.round_identifier(),
            author: self.author(),
            digest: self.digest(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageIdentity {
    pub round_identifier: ConsensusRoundIdentifier,
    pub author: Address,
    pub digest: Hash,
}
