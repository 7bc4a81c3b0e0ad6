use ssz_types::BitVector;

use crate::{
    altair::{
        consts::SIGNATURE_OF_EMPTY_SYNC_AGGREGATE,
        containers::{BeaconBlock, SignedBeaconBlock, SyncAggregate},
    },
    phase0::primitives::SignatureBytes,
    preset::Preset,
};

impl<P: Preset> BeaconBlock<P> {
    #[must_use]
    pub const fn with_signature(self, signature: SignatureBytes) -> SignedBeaconBlock<P> {
        SignedBeaconBlock {
            message: self,
            signature,
        }
    }
}

// An aggregate with no participants carries the signature of the point at infinity.
impl<P: Preset> Default for SyncAggregate<P> {
    fn default() -> Self {
        Self {
            sync_committee_bits: BitVector::new(),
            sync_committee_signature: SIGNATURE_OF_EMPTY_SYNC_AGGREGATE,
        }
    }
}
