use typenum::U33;

use crate::phase0::primitives::SignatureBytes;

/// `DEPOSIT_CONTRACT_TREE_DEPTH + 1` to account for the mixed in length.
pub type DepositProofLength = U33;

/// Compressed BLS signature of the point at infinity.
///
/// Sent in place of a RANDAO reveal when the caller asks to skip RANDAO verification.
pub const SIGNATURE_POINT_AT_INFINITY: SignatureBytes = {
    let mut bytes = [0; 96];
    bytes[0] = 0xc0;
    SignatureBytes::new(bytes)
};
