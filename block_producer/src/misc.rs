use derive_more::From;
use serde::Serialize;
use ssz_derive::Encode;
use types::{
    altair::containers::BeaconBlock as AltairBeaconBlock,
    bellatrix::containers::{
        BeaconBlock as BellatrixBeaconBlock, BlindedBeaconBlock as BellatrixBlindedBeaconBlock,
    },
    capella::containers::{
        BeaconBlock as CapellaBeaconBlock, BlindedBeaconBlock as CapellaBlindedBeaconBlock,
    },
    combined::{BeaconBlock, BlindedBeaconBlock, SignedBeaconBlock, SignedBlindedBeaconBlock},
    deneb::containers::{BlindedBeaconBlock as DenebBlindedBeaconBlock, BlockContents},
    nonstandard::Phase,
    phase0::{containers::BeaconBlock as Phase0BeaconBlock, primitives::Slot},
    preset::Preset,
};

/// Block returned by the block builder, one variant per fork and blindedness.
///
/// Full Deneb blocks come with the blobs and proofs needed to publish them.
/// Blinded blocks replace the execution payload with its header.
#[derive(Clone, PartialEq, Eq, Debug, From, Serialize, Encode)]
#[serde(bound = "", untagged)]
#[ssz(enum_behaviour = "transparent")]
pub enum ValidatorBlock<P: Preset> {
    Phase0(Phase0BeaconBlock<P>),
    Altair(AltairBeaconBlock<P>),
    Bellatrix(BellatrixBeaconBlock<P>),
    BlindedBellatrix(BellatrixBlindedBeaconBlock<P>),
    Capella(CapellaBeaconBlock<P>),
    BlindedCapella(CapellaBlindedBeaconBlock<P>),
    Deneb(BlockContents<P>),
    BlindedDeneb(DenebBlindedBeaconBlock<P>),
}

impl<P: Preset> ValidatorBlock<P> {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Phase0(_) => Phase::Phase0,
            Self::Altair(_) => Phase::Altair,
            Self::Bellatrix(_) | Self::BlindedBellatrix(_) => Phase::Bellatrix,
            Self::Capella(_) | Self::BlindedCapella(_) => Phase::Capella,
            Self::Deneb(_) | Self::BlindedDeneb(_) => Phase::Deneb,
        }
    }

    #[must_use]
    pub const fn is_blinded(&self) -> bool {
        matches!(
            self,
            Self::BlindedBellatrix(_) | Self::BlindedCapella(_) | Self::BlindedDeneb(_),
        )
    }

    #[must_use]
    pub const fn slot(&self) -> Slot {
        match self {
            Self::Phase0(block) => block.slot,
            Self::Altair(block) => block.slot,
            Self::Bellatrix(block) => block.slot,
            Self::BlindedBellatrix(block) => block.slot,
            Self::Capella(block) => block.slot,
            Self::BlindedCapella(block) => block.slot,
            Self::Deneb(contents) => contents.block.slot,
            Self::BlindedDeneb(block) => block.slot,
        }
    }

    /// File name suggested to clients that download the block in SSZ form.
    #[must_use]
    pub const fn ssz_file_name(&self) -> &'static str {
        match self {
            Self::Phase0(_) => "phase0Block.ssz",
            Self::Altair(_) => "altairBlock.ssz",
            Self::Bellatrix(_) => "bellatrixBlock.ssz",
            Self::BlindedBellatrix(_) => "blindedBellatrixBlock.ssz",
            Self::Capella(_) => "capellaBlock.ssz",
            Self::BlindedCapella(_) => "blindedCapellaBlock.ssz",
            Self::Deneb(_) => "denebBlockContents.ssz",
            Self::BlindedDeneb(_) => "blindedDenebBlockContents.ssz",
        }
    }

    /// Signs the block with an all-zero signature.
    ///
    /// The result is only good for computing rewards. Blobs and proofs of full Deneb blocks are
    /// left out because reward computation does not look at them.
    #[must_use]
    pub fn with_zero_signature(&self) -> SignedValidatorBlock<P> {
        match self {
            Self::Phase0(block) => BeaconBlock::from(block.clone()).with_zero_signature().into(),
            Self::Altair(block) => BeaconBlock::from(block.clone()).with_zero_signature().into(),
            Self::Bellatrix(block) => BeaconBlock::from(block.clone())
                .with_zero_signature()
                .into(),
            Self::BlindedBellatrix(block) => BlindedBeaconBlock::from(block.clone())
                .with_zero_signature()
                .into(),
            Self::Capella(block) => BeaconBlock::from(block.clone()).with_zero_signature().into(),
            Self::BlindedCapella(block) => BlindedBeaconBlock::from(block.clone())
                .with_zero_signature()
                .into(),
            Self::Deneb(contents) => BeaconBlock::from(contents.block.clone())
                .with_zero_signature()
                .into(),
            Self::BlindedDeneb(block) => BlindedBeaconBlock::from(block.clone())
                .with_zero_signature()
                .into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, From)]
pub enum SignedValidatorBlock<P: Preset> {
    Full(SignedBeaconBlock<P>),
    Blinded(SignedBlindedBeaconBlock<P>),
}

impl<P: Preset> SignedValidatorBlock<P> {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Full(block) => block.phase(),
            Self::Blinded(block) => block.phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ssz::Encode as _;
    use test_case::test_case;
    use types::{phase0::primitives::SignatureBytes, preset::Minimal};

    use super::*;

    #[test_case(
        Phase0BeaconBlock::default().into(),
        Phase::Phase0, false, "phase0Block.ssz";
        "phase0"
    )]
    #[test_case(
        AltairBeaconBlock::default().into(),
        Phase::Altair, false, "altairBlock.ssz";
        "altair"
    )]
    #[test_case(
        BellatrixBeaconBlock::default().into(),
        Phase::Bellatrix, false, "bellatrixBlock.ssz";
        "bellatrix"
    )]
    #[test_case(
        BellatrixBlindedBeaconBlock::default().into(),
        Phase::Bellatrix, true, "blindedBellatrixBlock.ssz";
        "blinded bellatrix"
    )]
    #[test_case(
        CapellaBeaconBlock::default().into(),
        Phase::Capella, false, "capellaBlock.ssz";
        "capella"
    )]
    #[test_case(
        CapellaBlindedBeaconBlock::default().into(),
        Phase::Capella, true, "blindedCapellaBlock.ssz";
        "blinded capella"
    )]
    #[test_case(
        BlockContents::default().into(),
        Phase::Deneb, false, "denebBlockContents.ssz";
        "deneb"
    )]
    #[test_case(
        DenebBlindedBeaconBlock::default().into(),
        Phase::Deneb, true, "blindedDenebBlockContents.ssz";
        "blinded deneb"
    )]
    fn variant_determines_phase_blindedness_and_file_name(
        block: ValidatorBlock<Minimal>,
        phase: Phase,
        blinded: bool,
        file_name: &str,
    ) {
        assert_eq!(block.phase(), phase);
        assert_eq!(block.is_blinded(), blinded);
        assert_eq!(block.ssz_file_name(), file_name);

        let signed_block = block.with_zero_signature();

        assert_eq!(signed_block.phase(), phase);
        assert_eq!(matches!(signed_block, SignedValidatorBlock::Blinded(_)), blinded);
    }

    #[test]
    fn signed_deneb_block_is_taken_out_of_block_contents() {
        let contents = BlockContents::<Minimal> {
            block: types::deneb::containers::BeaconBlock {
                slot: 9,
                ..Default::default()
            },
            ..BlockContents::default()
        };

        let expected = contents.block.clone().with_signature(SignatureBytes::ZERO);
        let actual = ValidatorBlock::from(contents).with_zero_signature();

        assert_eq!(
            actual,
            SignedValidatorBlock::Full(SignedBeaconBlock::from(expected)),
        );
    }

    #[test]
    fn ssz_encoding_is_that_of_the_wrapped_container() {
        let contents = BlockContents::<Minimal> {
            block: types::deneb::containers::BeaconBlock {
                slot: 2,
                ..Default::default()
            },
            ..BlockContents::default()
        };

        let expected = contents.as_ssz_bytes();

        assert_eq!(ValidatorBlock::from(contents).as_ssz_bytes(), expected);
    }

    #[test]
    fn slot_is_read_from_the_block() {
        let block = ValidatorBlock::<Minimal>::from(CapellaBlindedBeaconBlock {
            slot: 33,
            ..CapellaBlindedBeaconBlock::default()
        });

        assert_eq!(block.slot(), 33);
    }
}
