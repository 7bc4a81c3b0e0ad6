use core::{error::Error as StdError, num::ParseIntError};
use std::sync::Arc;

use anyhow::Error as AnyhowError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use block_producer::RewardsError;
use http_api_utils::ApiError;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    BlockRewards(#[from] RewardsError),
    #[error("head has not been fully verified by an execution engine")]
    HeadIsOptimistic,
    #[error("internal error")]
    Internal(#[from] AnyhowError),
    #[error("builder_boost_factor is invalid")]
    InvalidBuilderBoostFactor(#[source] ParseIntError),
    #[error("unable to decode graffiti")]
    InvalidGraffiti(#[source] AnyhowError),
    #[error("invalid query string")]
    InvalidQuery(#[source] AnyhowError),
    #[error("unable to decode randao reveal")]
    InvalidRandaoReveal(#[source] AnyhowError),
    #[error("slot is invalid")]
    InvalidSlot(#[source] AnyhowError),
    #[error("beacon node is currently syncing and not serving requests on this endpoint")]
    NodeIsSyncing,
    #[error("unable to determine whether head is optimistic")]
    OptimisticStatusUnavailable(#[source] AnyhowError),
    #[error("Prepared block is blinded")]
    PreparedBlockIsBlinded,
    #[error("Prepared block is not blinded")]
    PreparedBlockIsNotBlinded,
    #[error("randao_reveal is required")]
    RandaoRevealRequired,
    #[error("slot is required")]
    SlotRequired,
    #[error("unable to produce beacon block")]
    UnableToProduceBeaconBlock(#[source] AnyhowError),
}

impl ApiError for Error {
    fn sources(&self) -> impl Iterator<Item = &dyn StdError> {
        let mut error: Option<&dyn StdError> = Some(self);

        core::iter::from_fn(move || {
            let source = error?.source();
            core::mem::replace(&mut error, source)
        })
    }
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.format_sources())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let body = Json(self.body()).into_response();
        let extension = Extension(Arc::new(self));
        (status_code, extension, body).into_response()
    }
}

impl Error {
    pub(crate) const fn status_code(&self) -> StatusCode {
        match self {
            Self::BlockRewards(error) => error.code,
            Self::InvalidBuilderBoostFactor(_)
            | Self::InvalidGraffiti(_)
            | Self::InvalidQuery(_)
            | Self::InvalidRandaoReveal(_)
            | Self::InvalidSlot(_)
            | Self::RandaoRevealRequired
            | Self::SlotRequired => StatusCode::BAD_REQUEST,
            // A block of the wrong kind is the block producer's fault, not the client's.
            Self::Internal(_)
            | Self::OptimisticStatusUnavailable(_)
            | Self::PreparedBlockIsBlinded
            | Self::PreparedBlockIsNotBlinded
            | Self::UnableToProduceBeaconBlock(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HeadIsOptimistic | Self::NodeIsSyncing => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn body(&self) -> EthErrorResponse {
        EthErrorResponse {
            code: self.status_code().as_u16(),
            message: self,
        }
    }
}

#[derive(Serialize)]
struct EthErrorResponse<'error> {
    // The `code` field is supposed to contain a number.
    code: u16,
    message: &'error Error,
}
