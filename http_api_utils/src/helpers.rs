use core::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, Router};
use features::Feature;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{logging, middleware, traits::ApiError};

/// Wraps `router` in the layers shared by all HTTP APIs.
///
/// `E` is the error type of the API. Its source chain is logged along with failed responses.
pub fn extend_router_with_middleware<E: ApiError + Send + Sync + 'static>(
    mut router: Router,
    timeout: Option<Duration>,
    allowed_origins: AllowOrigin,
) -> Router {
    if let Some(timeout) = timeout {
        router = router.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|_| async {
                    StatusCode::REQUEST_TIMEOUT
                }))
                .timeout(timeout),
        );
    }

    router = router.layer(CorsLayer::new().allow_origin(allowed_origins).vary([]));

    if Feature::LogHttpRequests.is_enabled() {
        router = router.layer(axum::middleware::from_fn(
            middleware::insert_response_extensions,
        ));
    }

    if Feature::LogHttpRequests.is_enabled() || Feature::LogHttpHeaders.is_enabled() {
        router = router.layer(
            TraceLayer::new_for_http()
                .on_request(logging::log_request)
                .on_response(logging::log_response::<E>),
        );
    }

    if Feature::LogHttpBodies.is_enabled() {
        router = router.layer(axum::middleware::from_fn(
            middleware::log_request_and_response_bodies,
        ));
    }

    if Feature::PatchHttpContentType.is_enabled() {
        router = router.layer(axum::middleware::map_request(
            middleware::patch_content_type,
        ));
    }

    router
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use axum::{
        body::Body,
        http::{Request, Uri},
        routing::get,
    };
    use tower::ServiceExt as _;

    use crate::{error::Error, misc::Direction};

    use super::*;

    #[tokio::test]
    async fn slow_requests_time_out() -> Result<()> {
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                StatusCode::OK
            }),
        );

        let router = extend_router_with_middleware::<Error>(
            router,
            Some(Duration::from_millis(10)),
            AllowOrigin::any(),
        );

        let request = Request::get("/slow").body(Body::empty())?;

        let response = router.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        Ok(())
    }

    #[tokio::test]
    async fn requests_without_timeout_are_served() -> Result<()> {
        let router = Router::new().route("/fast", get(|| async { StatusCode::NO_CONTENT }));
        let router = extend_router_with_middleware::<Error>(router, None, AllowOrigin::any());

        let request = Request::get("/fast").body(Body::empty())?;

        let response = router.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        Ok(())
    }

    #[tokio::test]
    async fn enabled_features_log_requests_bodies_and_error_sources() -> Result<()> {
        Feature::LogHttpRequests.enable();
        Feature::LogHttpBodies.enable();

        let router = Router::new().route(
            "/broken",
            get(|| async {
                Err::<(), _>(Error::InvalidBody {
                    direction: Direction::Request,
                    uri: Uri::from_static("/broken"),
                    source: anyhow!("connection reset"),
                })
            }),
        );

        let router = extend_router_with_middleware::<Error>(router, None, AllowOrigin::any());

        testing_logger::setup();

        let request = Request::get("/broken").body(Body::empty())?;
        let response = router.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        testing_logger::validate(|logs| {
            let bodies = logs.iter().map(|log| log.body.as_str()).collect::<Vec<_>>();

            assert!(
                bodies.contains(&"received request (GET /broken HTTP/1.1) from unknown client"),
            );
            assert!(bodies.contains(&r#"request body for /broken: """#));
            assert!(bodies.iter().any(|body| {
                body.starts_with(
                    "produced response (HTTP/1.1 400 Bad Request) to (GET /broken) \
                    for unknown client in ",
                ) && body.ends_with(
                    "(error: failed to read request body for /broken: connection reset)",
                )
            }));
        });

        Ok(())
    }
}
