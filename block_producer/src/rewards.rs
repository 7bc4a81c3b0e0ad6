use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;
use types::{nonstandard::BlockRewards, preset::Preset};

use crate::misc::SignedValidatorBlock;

/// Failure reported by a [`BlockRewardFetcher`].
///
/// Carries the status code the HTTP API should respond with.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
#[error("{message}")]
pub struct RewardsError {
    pub code: StatusCode,
    pub message: String,
}

impl RewardsError {
    #[must_use]
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

#[async_trait]
pub trait BlockRewardFetcher<P: Preset>: Send + Sync {
    async fn block_rewards(
        &self,
        block: &SignedValidatorBlock<P>,
    ) -> Result<BlockRewards, RewardsError>;
}
