use alloy_primitives::U256;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    bellatrix::primitives::Wei,
    phase0::primitives::{Gwei, ValidatorIndex},
};

pub const WEI_IN_GWEI: Wei = U256::from_limbs([1_000_000_000, 0, 0, 0]);

#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    DeserializeFromStr,
    SerializeDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Phase {
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
}

impl Phase {
    /// Whether blocks of this phase carry an execution payload.
    #[must_use]
    pub const fn is_post_merge(self) -> bool {
        !matches!(self, Self::Phase0 | Self::Altair)
    }
}

/// Proposer reward for a block, broken down by source. All amounts are in Gwei.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct BlockRewards {
    pub proposer_index: ValidatorIndex,
    pub total: Gwei,
    pub attestations: Gwei,
    pub sync_aggregate: Gwei,
    pub proposer_slashings: Gwei,
    pub attester_slashings: Gwei,
}

impl BlockRewards {
    #[must_use]
    pub fn total_in_wei(self) -> Wei {
        U256::from(self.total) * WEI_IN_GWEI
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator as _;
    use test_case::test_case;

    use super::*;

    #[test_case(Phase::Phase0, "phase0")]
    #[test_case(Phase::Altair, "altair")]
    #[test_case(Phase::Bellatrix, "bellatrix")]
    #[test_case(Phase::Capella, "capella")]
    #[test_case(Phase::Deneb, "deneb")]
    fn phase_is_displayed_in_lowercase(phase: Phase, expected: &str) {
        assert_eq!(phase.to_string(), expected);
        assert_eq!(phase.as_ref(), expected);
        assert_eq!(expected.parse::<Phase>(), Ok(phase));
    }

    #[test]
    fn phase_serializes_as_string() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Phase::Capella)?, r#""capella""#);
        assert_eq!(serde_json::from_str::<Phase>(r#""Deneb""#)?, Phase::Deneb);
        Ok(())
    }

    #[test]
    fn only_phases_after_the_merge_carry_execution_payloads() {
        let post_merge = Phase::iter()
            .filter(|phase| phase.is_post_merge())
            .collect::<Vec<_>>();

        assert_eq!(
            post_merge,
            [Phase::Bellatrix, Phase::Capella, Phase::Deneb],
        );
    }

    #[test]
    fn total_reward_is_converted_to_wei() {
        let rewards = BlockRewards {
            total: 10,
            ..BlockRewards::default()
        };

        assert_eq!(rewards.total_in_wei(), U256::from(10_000_000_000_u64));
    }

    #[test]
    fn zero_reward_is_zero_wei() {
        assert_eq!(BlockRewards::default().total_in_wei(), U256::ZERO);
    }
}
