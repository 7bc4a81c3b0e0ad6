use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use block_producer::{BlockProducer, BlockRewardFetcher};
use types::preset::Preset;

use crate::{
    middleware,
    misc::{OptimisticModeFetcher, SyncedStatus},
    standard::{validator_blinded_block, validator_block, validator_block_v3},
};

#[derive(Clone)]
pub struct NormalState<P: Preset> {
    pub block_producer: Arc<dyn BlockProducer<P>>,
    pub reward_fetcher: Arc<dyn BlockRewardFetcher<P>>,
    pub optimistic_mode_fetcher: Arc<dyn OptimisticModeFetcher>,
    pub is_synced: Arc<SyncedStatus>,
}

// The `FromRef` derive macro cannot handle type parameters as of `axum` version 0.8.

impl<P: Preset> FromRef<NormalState<P>> for Arc<dyn BlockProducer<P>> {
    fn from_ref(state: &NormalState<P>) -> Self {
        state.block_producer.clone()
    }
}

impl<P: Preset> FromRef<NormalState<P>> for Arc<dyn BlockRewardFetcher<P>> {
    fn from_ref(state: &NormalState<P>) -> Self {
        state.reward_fetcher.clone()
    }
}

impl<P: Preset> FromRef<NormalState<P>> for Arc<dyn OptimisticModeFetcher> {
    fn from_ref(state: &NormalState<P>) -> Self {
        state.optimistic_mode_fetcher.clone()
    }
}

impl<P: Preset> FromRef<NormalState<P>> for Arc<SyncedStatus> {
    fn from_ref(state: &NormalState<P>) -> Self {
        state.is_synced.clone()
    }
}

pub fn normal_routes<P: Preset>(state: NormalState<P>) -> Router {
    eth_validator_block_routes(state.clone()).with_state(state)
}

// Routes ending in an empty segment exist so that a missing slot is reported as a client error.
// Block production needs a synced head, so the sync status is checked before anything else.
fn eth_validator_block_routes<P: Preset>(state: NormalState<P>) -> Router<NormalState<P>> {
    Router::new()
        .route(
            "/eth/v1/validator/blinded_blocks/",
            get(validator_blinded_block::<P>),
        )
        .route(
            "/eth/v1/validator/blinded_blocks/{slot}",
            get(validator_blinded_block::<P>),
        )
        .route("/eth/v2/validator/blocks/", get(validator_block::<P>))
        .route("/eth/v2/validator/blocks/{slot}", get(validator_block::<P>))
        .route("/eth/v3/validator/blocks/", get(validator_block_v3::<P>))
        .route(
            "/eth/v3/validator/blocks/{slot}",
            get(validator_block_v3::<P>),
        )
        .route_layer(axum::middleware::map_request_with_state(
            state,
            middleware::is_synced,
        ))
}
