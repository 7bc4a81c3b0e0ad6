use core::{future::IntoFuture as _, net::SocketAddr};
use std::sync::Arc;

use anyhow::{Error as AnyhowError, Result};
use block_producer::{BlockProducer, BlockRewardFetcher};
use futures::{
    channel::mpsc::UnboundedReceiver,
    future::{FutureExt as _, TryFutureExt as _},
    select,
    stream::StreamExt as _,
};
use log::info;
use tracing::instrument;
use types::preset::Preset;

use crate::{
    error::Error,
    http_api_config::HttpApiConfig,
    misc::{OptimisticModeFetcher, SyncToApi, SyncedStatus},
    routing::{self, NormalState},
};

pub struct Channels {
    pub sync_to_api_rx: UnboundedReceiver<SyncToApi>,
}

pub struct HttpApi<P: Preset> {
    pub block_producer: Arc<dyn BlockProducer<P>>,
    pub reward_fetcher: Arc<dyn BlockRewardFetcher<P>>,
    pub optimistic_mode_fetcher: Arc<dyn OptimisticModeFetcher>,
    pub http_api_config: HttpApiConfig,
    /// Sync status at start-up. Later changes arrive through [`Channels::sync_to_api_rx`].
    pub is_synced: bool,
    pub channels: Channels,
}

impl<P: Preset> HttpApi<P> {
    #[instrument(parent = None, skip(self), fields(address = %self.http_api_config.address))]
    pub async fn run(self) -> Result<()> {
        let listener = self.http_api_config.listener().await?;

        let Self {
            block_producer,
            reward_fetcher,
            optimistic_mode_fetcher,
            http_api_config,
            is_synced,
            channels,
        } = self;

        let HttpApiConfig {
            address,
            allow_origin,
            timeout,
        } = http_api_config;

        let Channels { sync_to_api_rx } = channels;

        let is_synced = Arc::new(SyncedStatus::new(is_synced));

        let state = NormalState {
            block_producer,
            reward_fetcher,
            optimistic_mode_fetcher,
            is_synced: is_synced.clone(),
        };

        let router = routing::normal_routes(state);
        let router =
            http_api_utils::extend_router_with_middleware::<Error>(router, timeout, allow_origin);

        let service = router.into_make_service_with_connect_info::<SocketAddr>();

        let serve_requests = axum::serve(listener, service)
            .into_future()
            .map_err(AnyhowError::new);

        let handle_sync_statuses = handle_sync_statuses(is_synced, sync_to_api_rx);

        info!("HTTP server listening on {address}");

        select! {
            result = serve_requests.fuse() => result,
            result = handle_sync_statuses.fuse() => result,
        }
    }
}

async fn handle_sync_statuses(
    is_synced: Arc<SyncedStatus>,
    mut sync_to_api_rx: UnboundedReceiver<SyncToApi>,
) -> Result<()> {
    loop {
        select! {
            message = sync_to_api_rx.select_next_some() => {
                match message {
                    SyncToApi::SyncStatus(status) => is_synced.set(status),
                    SyncToApi::Stop => break Ok(()),
                }
            }

            complete => break Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::channel::mpsc;

    use super::*;

    #[tokio::test]
    async fn sync_status_follows_messages_until_stopped() -> Result<()> {
        let is_synced = Arc::new(SyncedStatus::new(false));
        let (sync_to_api_tx, sync_to_api_rx) = mpsc::unbounded();

        SyncToApi::SyncStatus(true).send(&sync_to_api_tx);
        SyncToApi::Stop.send(&sync_to_api_tx);
        SyncToApi::SyncStatus(false).send(&sync_to_api_tx);

        handle_sync_statuses(is_synced.clone(), sync_to_api_rx).await?;

        assert!(is_synced.get());

        Ok(())
    }

    #[tokio::test]
    async fn closed_channel_ends_sync_status_handling() -> Result<()> {
        let is_synced = Arc::new(SyncedStatus::new(true));
        let (sync_to_api_tx, sync_to_api_rx) = mpsc::unbounded();

        SyncToApi::SyncStatus(false).send(&sync_to_api_tx);
        drop(sync_to_api_tx);

        handle_sync_statuses(is_synced.clone(), sync_to_api_rx).await?;

        assert!(!is_synced.get());

        Ok(())
    }
}
