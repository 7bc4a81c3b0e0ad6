pub use crate::{
    error::Error,
    http_api_config::HttpApiConfig,
    misc::{OptimisticModeFetcher, SyncToApi, SyncedStatus},
    routing::{normal_routes, NormalState},
    task::{Channels, HttpApi},
};

mod error;
mod extractors;
mod http_api_config;
mod middleware;
mod misc;
mod response;
mod routing;
mod standard;
mod task;
