use std::sync::Arc;

use alloy_primitives::FixedBytes;
use anyhow::{anyhow, Result as AnyhowResult};
use axum::{extract::State, http::HeaderMap};
use block_producer::{
    BlockProducer, BlockRequest, BlockRewardFetcher, ProducedBlock, ValidatorBlock,
};
use log::warn;
use serde::Deserialize;
use tap::Pipe as _;
use types::{
    bellatrix::primitives::Wei,
    nonstandard::Phase,
    phase0::{
        consts::SIGNATURE_POINT_AT_INFINITY,
        primitives::{Slot, H256},
    },
    preset::Preset,
};

use crate::{
    error::Error,
    extractors::{EthPath, EthQuery},
    misc::OptimisticModeFetcher,
    response::{EthResponse, JsonOrSsz},
};

// Parameters are kept as strings so that each one can be rejected with its own message.
#[derive(Default, Deserialize)]
// Allow custom fields in `ValidatorBlockQuery`.
// This is required for Lodestar interoperability.
// #[serde(deny_unknown_fields)]
pub struct ValidatorBlockQuery {
    randao_reveal: Option<String>,
    graffiti: Option<String>,
    skip_randao_verification: Option<String>,
    builder_boost_factor: Option<String>,
}

impl ValidatorBlockQuery {
    fn into_block_request(
        self,
        slot: Slot,
        required_block_type: RequiredBlockType,
    ) -> Result<BlockRequest, Error> {
        let Self {
            randao_reveal,
            graffiti,
            skip_randao_verification,
            builder_boost_factor,
        } = self;

        let skip_randao_verification = skip_randao_verification.as_deref() == Some("true");

        let randao_reveal = if skip_randao_verification {
            SIGNATURE_POINT_AT_INFINITY
        } else {
            let randao_reveal = randao_reveal.ok_or(Error::RandaoRevealRequired)?;
            decode_hex(&randao_reveal).map_err(Error::InvalidRandaoReveal)?
        };

        let graffiti = match graffiti.as_deref() {
            None | Some("") => H256::ZERO,
            Some(graffiti) => decode_hex(graffiti).map_err(Error::InvalidGraffiti)?,
        };

        let builder_boost_factor = match required_block_type {
            RequiredBlockType::Any => builder_boost_factor
                .as_deref()
                .map(str::parse::<u64>)
                .transpose()
                .map_err(Error::InvalidBuilderBoostFactor)?,
            RequiredBlockType::Full | RequiredBlockType::Blinded => None,
        };

        Ok(BlockRequest {
            slot,
            randao_reveal,
            graffiti,
            skip_mev_boost: required_block_type.skip_mev_boost(),
            builder_boost_factor,
        })
    }
}

/// Kind of block an endpoint is allowed to return.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RequiredBlockType {
    /// Whichever the block producer prefers.
    Any,
    Full,
    Blinded,
}

impl RequiredBlockType {
    const fn skip_mev_boost(self) -> bool {
        matches!(self, Self::Full)
    }

    fn check<P: Preset>(self, block: &ValidatorBlock<P>) -> Result<(), Error> {
        match (self, block.is_blinded()) {
            (Self::Full, true) => Err(Error::PreparedBlockIsBlinded),
            (Self::Blinded, false) => Err(Error::PreparedBlockIsNotBlinded),
            (Self::Any, _) | (Self::Full, false) | (Self::Blinded, true) => Ok(()),
        }
    }
}

/// `GET /eth/v1/validator/blinded_blocks/{slot}`
pub async fn validator_blinded_block<P: Preset>(
    State(block_producer): State<Arc<dyn BlockProducer<P>>>,
    State(reward_fetcher): State<Arc<dyn BlockRewardFetcher<P>>>,
    State(optimistic_mode_fetcher): State<Arc<dyn OptimisticModeFetcher>>,
    EthPath(slot): EthPath<Slot>,
    EthQuery(query): EthQuery<ValidatorBlockQuery>,
    headers: HeaderMap,
) -> Result<EthResponse<ValidatorBlock<P>, JsonOrSsz>, Error> {
    produce_block(
        block_producer.as_ref(),
        reward_fetcher.as_ref(),
        optimistic_mode_fetcher.as_ref(),
        query.into_block_request(slot, RequiredBlockType::Blinded)?,
        RequiredBlockType::Blinded,
        &headers,
    )
    .await
}

/// `GET /eth/v2/validator/blocks/{slot}`
pub async fn validator_block<P: Preset>(
    State(block_producer): State<Arc<dyn BlockProducer<P>>>,
    State(reward_fetcher): State<Arc<dyn BlockRewardFetcher<P>>>,
    State(optimistic_mode_fetcher): State<Arc<dyn OptimisticModeFetcher>>,
    EthPath(slot): EthPath<Slot>,
    EthQuery(query): EthQuery<ValidatorBlockQuery>,
    headers: HeaderMap,
) -> Result<EthResponse<ValidatorBlock<P>, JsonOrSsz>, Error> {
    produce_block(
        block_producer.as_ref(),
        reward_fetcher.as_ref(),
        optimistic_mode_fetcher.as_ref(),
        query.into_block_request(slot, RequiredBlockType::Full)?,
        RequiredBlockType::Full,
        &headers,
    )
    .await
}

/// `GET /eth/v3/validator/blocks/{slot}`
pub async fn validator_block_v3<P: Preset>(
    State(block_producer): State<Arc<dyn BlockProducer<P>>>,
    State(reward_fetcher): State<Arc<dyn BlockRewardFetcher<P>>>,
    State(optimistic_mode_fetcher): State<Arc<dyn OptimisticModeFetcher>>,
    EthPath(slot): EthPath<Slot>,
    EthQuery(query): EthQuery<ValidatorBlockQuery>,
    headers: HeaderMap,
) -> Result<EthResponse<ValidatorBlock<P>, JsonOrSsz>, Error> {
    produce_block(
        block_producer.as_ref(),
        reward_fetcher.as_ref(),
        optimistic_mode_fetcher.as_ref(),
        query.into_block_request(slot, RequiredBlockType::Any)?,
        RequiredBlockType::Any,
        &headers,
    )
    .await
}

async fn produce_block<P: Preset>(
    block_producer: &dyn BlockProducer<P>,
    reward_fetcher: &dyn BlockRewardFetcher<P>,
    optimistic_mode_fetcher: &dyn OptimisticModeFetcher,
    request: BlockRequest,
    required_block_type: RequiredBlockType,
    headers: &HeaderMap,
) -> Result<EthResponse<ValidatorBlock<P>, JsonOrSsz>, Error> {
    let format = JsonOrSsz::from_request_headers(headers);

    let ProducedBlock {
        block,
        payload_value,
    } = block_producer
        .get_beacon_block(request)
        .await
        .map_err(Error::UnableToProduceBeaconBlock)?;

    required_block_type.check(&block)?;

    let consensus_block_value = consensus_block_value(reward_fetcher, &block).await?;
    let version = block.phase();

    // The head may have become optimistic while the block was being built.
    if version.is_post_merge()
        && optimistic_mode_fetcher
            .is_optimistic()
            .await
            .map_err(Error::OptimisticStatusUnavailable)?
    {
        return Err(Error::HeadIsOptimistic);
    }

    let blinded = block.is_blinded();
    let ssz_file_name = block.ssz_file_name();

    EthResponse::json_or_ssz(block, format)
        .version(version)
        .execution_payload_blinded(blinded)
        .execution_payload_value(payload_value)
        .consensus_block_value(consensus_block_value)
        .ssz_file_name(ssz_file_name)
        .pipe(Ok)
}

/// Total proposer reward for `block` in Wei. `None` for Phase 0 blocks.
async fn consensus_block_value<P: Preset>(
    reward_fetcher: &dyn BlockRewardFetcher<P>,
    block: &ValidatorBlock<P>,
) -> Result<Option<Wei>, Error> {
    if block.phase() == Phase::Phase0 {
        return Ok(None);
    }

    let signed_block = block.with_zero_signature();

    let block_rewards = reward_fetcher
        .block_rewards(&signed_block)
        .await
        .inspect_err(|error| {
            warn!(
                "failed to compute rewards for block at slot {}: {error}",
                block.slot(),
            );
        })?;

    Ok(Some(block_rewards.total_in_wei()))
}

fn decode_hex<const N: usize>(string: &str) -> AnyhowResult<FixedBytes<N>> {
    let digits = string
        .strip_prefix("0x")
        .ok_or_else(|| anyhow!("hex string is missing 0x prefix"))?;

    let mut bytes = [0; N];
    hex::decode_to_slice(digits, &mut bytes)?;
    Ok(FixedBytes(bytes))
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use test_case::test_case;

    use super::*;

    const RANDAO_REVEAL: &str = "0xa1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90\
        a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90\
        a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";

    fn query(randao_reveal: &str) -> ValidatorBlockQuery {
        ValidatorBlockQuery {
            randao_reveal: Some(randao_reveal.to_owned()),
            ..ValidatorBlockQuery::default()
        }
    }

    #[test]
    fn randao_reveal_and_graffiti_are_decoded() -> Result<(), Error> {
        let request = ValidatorBlockQuery {
            graffiti: Some(format!("0x{}", "ab".repeat(32))),
            ..query(RANDAO_REVEAL)
        }
        .into_block_request(5, RequiredBlockType::Any)?;

        assert_eq!(request.slot, 5);
        assert_eq!(request.randao_reveal.as_slice()[..4], hex!("a1b2c3d4"));
        assert_eq!(request.graffiti, H256::repeat_byte(0xab));
        assert!(!request.skip_mev_boost);
        assert_eq!(request.builder_boost_factor, None);

        Ok(())
    }

    #[test]
    fn hex_without_prefix_is_rejected() {
        let result = query(RANDAO_REVEAL.trim_start_matches("0x"))
            .into_block_request(1, RequiredBlockType::Full);

        assert!(matches!(result, Err(Error::InvalidRandaoReveal(_))));
    }

    #[test_case(None)]
    #[test_case(Some(""))]
    fn missing_graffiti_is_zero(graffiti: Option<&str>) -> Result<(), Error> {
        let request = ValidatorBlockQuery {
            graffiti: graffiti.map(str::to_owned),
            ..query(RANDAO_REVEAL)
        }
        .into_block_request(1, RequiredBlockType::Any)?;

        assert_eq!(request.graffiti, H256::ZERO);

        Ok(())
    }

    #[test_case(Some("0xc0ffee"))]
    #[test_case(None)]
    fn skipping_randao_verification_uses_point_at_infinity(
        randao_reveal: Option<&str>,
    ) -> Result<(), Error> {
        let request = ValidatorBlockQuery {
            randao_reveal: randao_reveal.map(str::to_owned),
            skip_randao_verification: Some("true".to_owned()),
            ..ValidatorBlockQuery::default()
        }
        .into_block_request(1, RequiredBlockType::Any)?;

        assert_eq!(request.randao_reveal, SIGNATURE_POINT_AT_INFINITY);

        Ok(())
    }

    #[test]
    fn randao_reveal_is_checked_unless_flag_is_literally_true() {
        let result = ValidatorBlockQuery {
            randao_reveal: Some("0xc0ffee".to_owned()),
            skip_randao_verification: Some(String::new()),
            ..ValidatorBlockQuery::default()
        }
        .into_block_request(1, RequiredBlockType::Any);

        assert!(matches!(result, Err(Error::InvalidRandaoReveal(_))));
    }

    #[test]
    fn randao_reveal_is_required() {
        let result = ValidatorBlockQuery::default().into_block_request(1, RequiredBlockType::Any);

        assert!(matches!(result, Err(Error::RandaoRevealRequired)));
    }

    #[test_case("0x1234"; "too short")]
    #[test_case("0xzz"; "not hex")]
    #[test_case(&"ab".repeat(32); "no prefix")]
    fn malformed_graffiti_is_rejected(graffiti: &str) {
        let result = ValidatorBlockQuery {
            graffiti: Some(graffiti.to_owned()),
            ..query(RANDAO_REVEAL)
        }
        .into_block_request(1, RequiredBlockType::Any);

        assert!(matches!(result, Err(Error::InvalidGraffiti(_))));
    }

    #[test_case(RequiredBlockType::Any, false, Some(90))]
    #[test_case(RequiredBlockType::Full, true, None)]
    #[test_case(RequiredBlockType::Blinded, false, None)]
    fn endpoint_determines_mev_boost_and_boost_factor(
        required_block_type: RequiredBlockType,
        skip_mev_boost: bool,
        builder_boost_factor: Option<u64>,
    ) -> Result<(), Error> {
        let request = ValidatorBlockQuery {
            builder_boost_factor: Some("90".to_owned()),
            ..query(RANDAO_REVEAL)
        }
        .into_block_request(1, required_block_type)?;

        assert_eq!(request.skip_mev_boost, skip_mev_boost);
        assert_eq!(request.builder_boost_factor, builder_boost_factor);

        Ok(())
    }

    #[test]
    fn malformed_builder_boost_factor_is_rejected() {
        let result = ValidatorBlockQuery {
            builder_boost_factor: Some("-1".to_owned()),
            ..query(RANDAO_REVEAL)
        }
        .into_block_request(1, RequiredBlockType::Any);

        assert!(matches!(result, Err(Error::InvalidBuilderBoostFactor(_))));
    }
}
