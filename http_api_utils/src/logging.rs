use core::{net::SocketAddr, time::Duration};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, OriginalUri},
    http::{Method, Request},
    response::Response,
};
use features::Feature;
use log::info;
use tracing::Span;

use crate::ApiError;

// `TraceLayer` already logs most of this out of the box, but we still use `log`.
// We have to duplicate some of the information because `log` does not have spans.
//
// Enabling the `log` feature of the `tracing` crate isn't enough.
// By default, `TraceLayer` emits events at `DEBUG` with the default target.
// Our application filters them out.

pub fn log_request(request: &Request<Body>, _span: &Span) {
    let method = request.method();
    let uri = request.uri();

    if Feature::LogHttpRequests.is_enabled() {
        let version = request.version();
        let remote = format_remote(request.extensions().get());

        info!("received request ({method} {uri} {version:?}) from {remote}");
    }

    if Feature::LogHttpHeaders.is_enabled() {
        let headers = request.headers();

        info!("request headers for ({method} {uri}): {headers:?}");
    }
}

pub fn log_response<E: ApiError + Send + Sync + 'static>(
    response: &Response,
    latency: Duration,
    _span: &Span,
) {
    if !Feature::LogHttpRequests.is_enabled() {
        return;
    }

    let version = response.version();
    let status = response.status();

    let Some(method) = response.extensions().get::<Method>() else {
        return;
    };

    let Some(OriginalUri(original_uri)) = response.extensions().get() else {
        return;
    };

    let remote = format_remote(
        response
            .extensions()
            .get::<Option<ConnectInfo<SocketAddr>>>()
            .and_then(Option::as_ref),
    );

    match (
        // Use `match` to extend the lifetime of `Arguments` created by `format_args!`. See:
        // <https://stackoverflow.com/questions/48732263/why-is-rusts-assert-eq-implemented-using-a-match/54855986#54855986>
        format_args!(
            "produced response ({version:?} {status}) \
            to ({method} {original_uri}) \
            for {remote} in {latency:?}",
        ),
        response.extensions().get::<Arc<E>>(),
    ) {
        (shared, Some(error)) => info!("{shared} (error: {})", error.format_sources()),
        (shared, None) => info!("{shared}"),
    }
}

fn format_remote(connect_info: Option<&ConnectInfo<SocketAddr>>) -> String {
    connect_info.map_or_else(
        || "unknown client".to_owned(),
        |ConnectInfo(remote)| remote.to_string(),
    )
}
