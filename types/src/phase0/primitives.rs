use alloy_primitives::{Address, FixedBytes, B256};

pub type CommitteeIndex = u64;
pub type DepositIndex = u64;
pub type Epoch = u64;
pub type ExecutionAddress = Address;
pub type ExecutionBlockHash = H256;
pub type ExecutionBlockNumber = u64;
pub type Gas = u64;
pub type Gwei = u64;
pub type H256 = B256;
pub type Slot = u64;
pub type UnixSeconds = u64;
pub type ValidatorIndex = u64;
pub type Version = FixedBytes<4>;

// Signatures and public keys are kept in compressed form. Nothing in this workspace verifies them.
pub type PublicKeyBytes = FixedBytes<48>;
pub type SignatureBytes = FixedBytes<96>;
