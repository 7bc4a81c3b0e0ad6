use core::fmt::{Display, Formatter, Result as FmtResult};

use anyhow::Result;
use axum::{
    http::{
        header::{ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Response},
    Json,
};
use http_api_utils::ETH_CONSENSUS_VERSION;
use mediatype::{MediaType, MediaTypeList};
use mime::APPLICATION_OCTET_STREAM;
use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr, SerializeDisplay};
use ssz::Encode;
use types::{bellatrix::primitives::Wei, nonstandard::Phase};

use crate::error::Error;

const ETH_CONSENSUS_BLOCK_VALUE: &str = "eth-consensus-block-value";
const ETH_EXECUTION_PAYLOAD_BLINDED: &str = "eth-execution-payload-blinded";
const ETH_EXECUTION_PAYLOAD_VALUE: &str = "eth-execution-payload-value";

pub struct AlwaysJson;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum JsonOrSsz {
    Json,
    Ssz,
}

// Rewards are not defined for Phase 0 blocks. Their value is reported as an empty string.
#[derive(Clone, Copy, Debug, SerializeDisplay)]
struct BlockValue(Option<Wei>);

impl Display for BlockValue {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        match self.0 {
            Some(value) => Display::fmt(&value, formatter),
            None => Ok(()),
        }
    }
}

#[serde_as]
#[derive(Serialize)]
pub struct EthResponse<T, F = AlwaysJson> {
    // These are returned in both JSON body fields and headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    execution_payload_blinded: Option<bool>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    execution_payload_value: Option<Wei>,
    #[serde(skip_serializing_if = "Option::is_none")]
    consensus_block_value: Option<BlockValue>,

    data: T,

    #[serde(skip)]
    ssz_file_name: Option<&'static str>,
    #[serde(skip)]
    format: F,
}

impl<T: Serialize> IntoResponse for EthResponse<T, AlwaysJson> {
    fn into_response(self) -> Response {
        let run = || {
            let response_headers = self.response_headers()?;
            let response_body = self.into_json();
            Ok((response_headers, response_body))
        };

        run().map_err(Error::Internal).into_response()
    }
}

impl<T: Encode + Serialize> IntoResponse for EthResponse<T, JsonOrSsz> {
    fn into_response(self) -> Response {
        let run = || {
            let mut response_headers = self.response_headers()?;

            let response_body = match self.format {
                JsonOrSsz::Json => self.into_json().into_response(),
                JsonOrSsz::Ssz => {
                    response_headers.insert(
                        CONTENT_TYPE,
                        HeaderValue::from_static(APPLICATION_OCTET_STREAM.as_ref()),
                    );

                    if let Some(file_name) = self.ssz_file_name {
                        let header_value =
                            format!("attachment; filename=\"{file_name}\"").try_into()?;
                        response_headers.insert(CONTENT_DISPOSITION, header_value);
                    }

                    self.data.as_ssz_bytes().into_response()
                }
            };

            Ok((response_headers, response_body))
        };

        run().map_err(Error::Internal).into_response()
    }
}

impl<T, F> EthResponse<T, F> {
    const fn new(data: T, format: F) -> Self {
        Self {
            version: None,
            execution_payload_blinded: None,
            execution_payload_value: None,
            consensus_block_value: None,
            data,
            ssz_file_name: None,
            format,
        }
    }

    pub const fn version(mut self, phase: Phase) -> Self {
        self.version = Some(phase);
        self
    }

    /// `None` is reported as an empty string rather than omitted.
    pub const fn consensus_block_value(mut self, consensus_block_value: Option<Wei>) -> Self {
        self.consensus_block_value = Some(BlockValue(consensus_block_value));
        self
    }

    pub const fn execution_payload_blinded(mut self, execution_payload_blinded: bool) -> Self {
        self.execution_payload_blinded = Some(execution_payload_blinded);
        self
    }

    pub const fn execution_payload_value(mut self, execution_payload_value: Wei) -> Self {
        self.execution_payload_value = Some(execution_payload_value);
        self
    }

    pub const fn ssz_file_name(mut self, ssz_file_name: &'static str) -> Self {
        self.ssz_file_name = Some(ssz_file_name);
        self
    }

    fn response_headers(&self) -> Result<HeaderMap> {
        let mut response_headers = HeaderMap::new();

        if let Some(phase) = self.version {
            let header_value = phase.as_ref().try_into()?;
            response_headers.insert(ETH_CONSENSUS_VERSION, header_value);
        }

        if let Some(blinded) = self.execution_payload_blinded {
            let header_value = HeaderValue::from_static(if blinded { "true" } else { "false" });
            response_headers.insert(ETH_EXECUTION_PAYLOAD_BLINDED, header_value);
        }

        if let Some(value) = self.execution_payload_value {
            let header_value = value.to_string().try_into()?;
            response_headers.insert(ETH_EXECUTION_PAYLOAD_VALUE, header_value);
        }

        if let Some(value) = self.consensus_block_value {
            let header_value = value.to_string().try_into()?;
            response_headers.insert(ETH_CONSENSUS_BLOCK_VALUE, header_value);
        }

        Ok(response_headers)
    }

    fn into_json(self) -> Json<EthResponse<T, AlwaysJson>> {
        let Self {
            version,
            execution_payload_blinded,
            execution_payload_value,
            consensus_block_value,
            data,
            ssz_file_name,
            format: _,
        } = self;

        let response_body = EthResponse {
            version,
            execution_payload_blinded,
            execution_payload_value,
            consensus_block_value,
            data,
            ssz_file_name,
            format: AlwaysJson,
        };

        Json(response_body)
    }
}

impl<T> EthResponse<T, AlwaysJson> {
    pub const fn json(data: T) -> Self {
        Self::new(data, AlwaysJson)
    }
}

impl<T> EthResponse<T, JsonOrSsz> {
    pub const fn json_or_ssz(data: T, format: JsonOrSsz) -> Self {
        Self::new(data, format)
    }
}

impl JsonOrSsz {
    // `axum` recommends using `axum::TypedHeader` instead of extracting all headers,
    // but the `headers` crate does not provide a type for the `Accept` header.
    // See <https://github.com/hyperium/headers/issues/53>.
    //
    // An `Accept` header that cannot be read is treated as if it were absent.
    #[must_use]
    pub fn from_request_headers(request_headers: &HeaderMap) -> Self {
        let accept = request_headers
            .get(ACCEPT)
            .and_then(|accept_header| accept_header.to_str().ok())
            .and_then(accept_content_type);

        if accept.as_deref() == Some(APPLICATION_OCTET_STREAM.as_ref()) {
            Self::Ssz
        } else {
            Self::Json
        }
    }
}

// Media types without a valid `q` parameter have a weight of 1.
// Media types that cannot be parsed are skipped.
// The first of several equally weighted types is preferred.
fn accept_content_type(accept_header: &str) -> Option<String> {
    let mut preferred: Option<(f32, String)> = None;

    for MediaType {
        ty, subty, params, ..
    } in MediaTypeList::new(accept_header).flatten()
    {
        let essence = format!("{ty}/{subty}");

        let q = params
            .iter()
            .find(|(name, _)| name == "q")
            .and_then(|(_, value)| value.as_str().parse::<f32>().ok())
            .unwrap_or(1.0);

        if preferred.as_ref().is_none_or(|(best, _)| q > *best) {
            preferred = Some((q, essence));
        }
    }

    preferred.map(|(_, essence)| essence)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_accept_content_type() {
        assert_eq!(
            accept_content_type("application/octet-stream;q=1,application/json;q=0.9"),
            Some("application/octet-stream".to_owned()),
        );

        assert_eq!(
            accept_content_type("application/octet-stream;q=0.9,application/json;q=1"),
            Some("application/json".to_owned()),
        );

        assert_eq!(
            accept_content_type("application/octet-stream"),
            Some("application/octet-stream".to_owned()),
        );

        assert_eq!(
            accept_content_type("application/octet-stream,application/json;q=0.9"),
            Some("application/octet-stream".to_owned()),
        );

        assert_eq!(
            accept_content_type("application/json,application/octet-stream"),
            Some("application/json".to_owned()),
        );

        assert_eq!(accept_content_type(""), None);
    }

    #[test]
    fn malformed_weight_counts_as_one() {
        assert_eq!(
            accept_content_type("application/json;q=0.5,application/octet-stream;q=high"),
            Some("application/octet-stream".to_owned()),
        );
    }

    #[test_case("application/octet-stream;q=high", JsonOrSsz::Ssz)]
    #[test_case("application/json;q=0.5,application/octet-stream;q=0.9", JsonOrSsz::Ssz)]
    #[test_case("application/octet-stream;q=0.5,application/json", JsonOrSsz::Json)]
    #[test_case("not a media type", JsonOrSsz::Json)]
    fn format_is_chosen_from_accept_header(accept: &'static str, expected: JsonOrSsz) {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static(accept));

        assert_eq!(JsonOrSsz::from_request_headers(&headers), expected);
    }

    #[test]
    fn missing_consensus_block_value_is_serialized_as_empty_string() -> serde_json::Result<()> {
        let response = EthResponse::json(json!({}))
            .version(Phase::Phase0)
            .execution_payload_blinded(false)
            .execution_payload_value(Wei::ZERO)
            .consensus_block_value(None);

        assert_eq!(
            serde_json::to_string(&response)?,
            r#"{"version":"phase0","execution_payload_blinded":false,"execution_payload_value":"0","consensus_block_value":"","data":{}}"#,
        );

        Ok(())
    }

    #[test]
    fn values_are_copied_into_headers() -> Result<()> {
        let response = EthResponse::json(())
            .version(Phase::Capella)
            .execution_payload_blinded(true)
            .execution_payload_value(Wei::from(2000))
            .consensus_block_value(Some(Wei::from(10_000_000_000_u64)));

        let headers = response.response_headers()?;

        assert_eq!(headers[ETH_CONSENSUS_VERSION], "capella");
        assert_eq!(headers[ETH_EXECUTION_PAYLOAD_BLINDED], "true");
        assert_eq!(headers[ETH_EXECUTION_PAYLOAD_VALUE], "2000");
        assert_eq!(headers[ETH_CONSENSUS_BLOCK_VALUE], "10000000000");

        Ok(())
    }

    #[test]
    fn json_is_served_without_accept_header() {
        assert_eq!(JsonOrSsz::from_request_headers(&HeaderMap::new()), JsonOrSsz::Json);
    }
}
