use crate::phase0::{consts::SIGNATURE_POINT_AT_INFINITY, primitives::SignatureBytes};

pub const SIGNATURE_OF_EMPTY_SYNC_AGGREGATE: SignatureBytes = SIGNATURE_POINT_AT_INFINITY;
