use core::net::SocketAddr;

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, MatchedPath, OriginalUri, Request},
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Uri,
    },
    middleware::Next,
    response::{IntoResponse as _, Response},
    Extension,
};
use http_body_util::BodyExt as _;
use log::info;
use mime::{APPLICATION_JSON, APPLICATION_OCTET_STREAM};

use crate::{error::Error, misc::Direction};

async fn buffer_and_log(direction: Direction, uri: &Uri, body: Body) -> Result<Bytes, Error> {
    let bytes = body
        .collect()
        .await
        .map_err(|error| Error::InvalidBody {
            direction,
            uri: uri.clone(),
            source: error.into(),
        })?
        .to_bytes();

    if let Ok(string) = core::str::from_utf8(&bytes) {
        info!("{direction} body for {uri}: {string:?}");
    } else {
        info!("{direction} body for {uri}: {} bytes", bytes.len());
    }

    Ok(bytes)
}

pub async fn insert_response_extensions(request: Request, next: Next) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .copied();

    let method = request.method().clone();
    let matched_path = request.extensions().get::<MatchedPath>().cloned();

    let original_uri = request
        .extensions()
        .get::<OriginalUri>()
        .cloned()
        .unwrap_or_else(|| OriginalUri(request.uri().clone()));

    (
        Extension(remote),
        Extension(method),
        Extension(original_uri),
        Extension(matched_path),
        next.run(request).await,
    )
        .into_response()
}

pub async fn log_request_and_response_bodies(
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    let uri = request.uri().clone();

    let (parts, body) = request.into_parts();
    let bytes = buffer_and_log(Direction::Request, &uri, body).await?;
    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    // SSZ blocks are large and unreadable when logged.
    if response.headers().get(CONTENT_TYPE)
        == Some(&HeaderValue::from_static(APPLICATION_OCTET_STREAM.as_ref()))
    {
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = buffer_and_log(Direction::Response, &uri, body).await?;
    let response = Response::from_parts(parts, Body::from(bytes));

    Ok(response)
}

// Prysm submits requests without `Content-Type`.
// The Eth Beacon Node API [requires `Content-Type` to be present].
// There seem to be no issues about this at <https://github.com/prysmaticlabs/prysm/issues>.
//
// [requires `Content-Type` to be present]: https://github.com/ethereum/beacon-APIs/blob/6ed3820587afce7525528ca1d21abae7647087a3/beacon-node-oapi.yaml#L8-L9
pub async fn patch_content_type(mut request: Request) -> Request {
    request
        .headers_mut()
        .entry(CONTENT_TYPE)
        .or_insert(HeaderValue::from_static(APPLICATION_JSON.as_ref()));

    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_content_type_is_filled_in() {
        let request = patch_content_type(Request::new(Body::empty())).await;

        assert_eq!(
            request.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json")),
        );
    }

    #[tokio::test]
    async fn present_content_type_is_kept() {
        let mut request = Request::new(Body::empty());

        request.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        );

        let request = patch_content_type(request).await;

        assert_eq!(
            request.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/octet-stream")),
        );
    }
}
