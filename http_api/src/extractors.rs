//! Custom extractors for the [Eth Beacon Node API].
//!
//! The extractors provided by `axum` report errors in plain text with various status codes.
//! The [Eth Beacon Node API] requires errors to be reported in JSON with the 400 status code.
//!
//! [Eth Beacon Node API]: https://ethereum.github.io/beacon-APIs/

use anyhow::{anyhow, Error as AnyhowError};
use core::num::ParseIntError;

use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt as _};
use axum_extra::extract::Query;
use serde::de::DeserializeOwned;
use types::phase0::primitives::Slot;

use crate::error::Error;

pub struct EthPath<T>(pub T);

// The slot is read from the last segment of the path rather than through `Path`.
// That lets routes ending in an empty segment report a missing slot instead of a 404.
impl<S: Sync> FromRequestParts<S> for EthPath<Slot> {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let segment = parts.uri.path().rsplit('/').next().unwrap_or_default();

        if segment.is_empty() {
            return Err(Error::SlotRequired);
        }

        // `u64::from_str` accepts a leading `+`.
        if segment.starts_with('+') {
            return Err(Error::InvalidSlot(anyhow!("slot must not be signed")));
        }

        segment
            .parse()
            .map(Self)
            .map_err(|error: ParseIntError| Error::InvalidSlot(error.into()))
    }
}

pub struct EthQuery<T>(pub T);

impl<S: Send + Sync, T: DeserializeOwned + Send + 'static> FromRequestParts<S> for EthQuery<T> {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extract()
            .await
            .map(|Query(query)| Self(query))
            .map_err(AnyhowError::msg)
            .map_err(Error::InvalidQuery)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use serde::Deserialize;
    use test_case::test_case;

    use super::*;

    #[derive(Deserialize)]
    struct GraffitiQuery {
        graffiti: Option<String>,
    }

    fn parts(uri: &str) -> Parts {
        let (parts, ()) = Request::get(uri)
            .body(())
            .expect("request should be valid")
            .into_parts();

        parts
    }

    #[test_case("/eth/v3/validator/blocks/0", 0)]
    #[test_case("/eth/v3/validator/blocks/123?randao_reveal=0x00", 123)]
    #[test_case("/eth/v1/validator/blinded_blocks/18446744073709551615", u64::MAX)]
    #[tokio::test]
    async fn slot_is_taken_from_last_segment(uri: &str, expected: Slot) {
        let EthPath(slot) = EthPath::<Slot>::from_request_parts(&mut parts(uri), &())
            .await
            .unwrap_or_else(|error| panic!("slot should be valid: {error}"));

        assert_eq!(slot, expected);
    }

    #[tokio::test]
    async fn empty_segment_means_slot_is_missing() {
        let result = EthPath::<Slot>::from_request_parts(
            &mut parts("/eth/v2/validator/blocks/?graffiti=0x"),
            &(),
        )
        .await;

        assert!(matches!(result, Err(Error::SlotRequired)));
    }

    #[test_case("/eth/v3/validator/blocks/-1")]
    #[test_case("/eth/v3/validator/blocks/+5")]
    #[test_case("/eth/v3/validator/blocks/head")]
    #[test_case("/eth/v3/validator/blocks/18446744073709551616")]
    #[tokio::test]
    async fn malformed_slot_is_rejected(uri: &str) {
        let result = EthPath::<Slot>::from_request_parts(&mut parts(uri), &()).await;

        assert!(matches!(result, Err(Error::InvalidSlot(_))));
    }

    #[tokio::test]
    async fn unknown_query_parameters_are_ignored() {
        let EthQuery(query) = EthQuery::<GraffitiQuery>::from_request_parts(
            &mut parts("/eth/v3/validator/blocks/1?graffiti=0x01&lodestar=1"),
            &(),
        )
        .await
        .unwrap_or_else(|error| panic!("query should be valid: {error}"));

        assert_eq!(query.graffiti.as_deref(), Some("0x01"));
    }
}
