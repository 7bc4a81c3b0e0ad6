pub use block_producer::{BlockProducer, BlockRequest, ProducedBlock};
pub use misc::{SignedValidatorBlock, ValidatorBlock};
pub use rewards::{BlockRewardFetcher, RewardsError};
pub use types::nonstandard::BlockRewards;

mod block_producer;
mod misc;
mod rewards;
