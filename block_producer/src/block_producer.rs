use anyhow::Result;
use async_trait::async_trait;
use types::{
    bellatrix::primitives::Wei,
    phase0::primitives::{SignatureBytes, Slot, H256},
    preset::Preset,
};

use crate::misc::ValidatorBlock;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BlockRequest {
    pub slot: Slot,
    pub randao_reveal: SignatureBytes,
    pub graffiti: H256,
    pub skip_mev_boost: bool,
    /// Left unset when the caller did not ask for a particular weighting.
    /// The block builder applies its own default in that case.
    pub builder_boost_factor: Option<u64>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProducedBlock<P: Preset> {
    pub block: ValidatorBlock<P>,
    pub payload_value: Wei,
}

/// Builds blocks for validators.
///
/// Chooses between a locally built payload and one offered by a builder unless
/// [`BlockRequest::skip_mev_boost`] is set.
#[async_trait]
pub trait BlockProducer<P: Preset>: Send + Sync {
    async fn get_beacon_block(&self, request: BlockRequest) -> Result<ProducedBlock<P>>;
}
