use alloy_primitives::FixedBytes;
use ssz_types::FixedVector;

use crate::preset::Preset;

pub type Blob<P> = FixedVector<u8, <P as Preset>::BytesPerBlob>;
pub type KzgCommitment = FixedBytes<48>;
pub type KzgProof = FixedBytes<48>;
