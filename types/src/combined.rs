use derive_more::From;
use serde::Serialize;
use ssz_derive::Encode;

use crate::{
    altair::containers::{
        BeaconBlock as AltairBeaconBlock, SignedBeaconBlock as AltairSignedBeaconBlock,
    },
    bellatrix::containers::{
        BeaconBlock as BellatrixBeaconBlock, BlindedBeaconBlock as BellatrixBlindedBeaconBlock,
        SignedBeaconBlock as BellatrixSignedBeaconBlock,
        SignedBlindedBeaconBlock as BellatrixSignedBlindedBeaconBlock,
    },
    capella::containers::{
        BeaconBlock as CapellaBeaconBlock, BlindedBeaconBlock as CapellaBlindedBeaconBlock,
        SignedBeaconBlock as CapellaSignedBeaconBlock,
        SignedBlindedBeaconBlock as CapellaSignedBlindedBeaconBlock,
    },
    deneb::containers::{
        BeaconBlock as DenebBeaconBlock, BlindedBeaconBlock as DenebBlindedBeaconBlock,
        SignedBeaconBlock as DenebSignedBeaconBlock,
        SignedBlindedBeaconBlock as DenebSignedBlindedBeaconBlock,
    },
    nonstandard::Phase,
    phase0::{
        containers::{
            BeaconBlock as Phase0BeaconBlock, SignedBeaconBlock as Phase0SignedBeaconBlock,
        },
        primitives::SignatureBytes,
    },
    preset::Preset,
};

#[derive(Clone, PartialEq, Eq, Debug, From, Serialize, Encode)]
#[serde(bound = "", untagged)]
#[ssz(enum_behaviour = "transparent")]
pub enum BeaconBlock<P: Preset> {
    Phase0(Phase0BeaconBlock<P>),
    Altair(AltairBeaconBlock<P>),
    Bellatrix(BellatrixBeaconBlock<P>),
    Capella(CapellaBeaconBlock<P>),
    Deneb(DenebBeaconBlock<P>),
}

impl<P: Preset> BeaconBlock<P> {
    #[must_use]
    pub fn with_signature(self, signature: SignatureBytes) -> SignedBeaconBlock<P> {
        match self {
            Self::Phase0(message) => message.with_signature(signature).into(),
            Self::Altair(message) => message.with_signature(signature).into(),
            Self::Bellatrix(message) => message.with_signature(signature).into(),
            Self::Capella(message) => message.with_signature(signature).into(),
            Self::Deneb(message) => message.with_signature(signature).into(),
        }
    }

    #[must_use]
    pub fn with_zero_signature(self) -> SignedBeaconBlock<P> {
        self.with_signature(SignatureBytes::ZERO)
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Phase0(_) => Phase::Phase0,
            Self::Altair(_) => Phase::Altair,
            Self::Bellatrix(_) => Phase::Bellatrix,
            Self::Capella(_) => Phase::Capella,
            Self::Deneb(_) => Phase::Deneb,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, From, Serialize, Encode)]
#[serde(bound = "", untagged)]
#[ssz(enum_behaviour = "transparent")]
pub enum BlindedBeaconBlock<P: Preset> {
    Bellatrix(BellatrixBlindedBeaconBlock<P>),
    Capella(CapellaBlindedBeaconBlock<P>),
    Deneb(DenebBlindedBeaconBlock<P>),
}

impl<P: Preset> BlindedBeaconBlock<P> {
    #[must_use]
    pub fn with_signature(self, signature: SignatureBytes) -> SignedBlindedBeaconBlock<P> {
        match self {
            Self::Bellatrix(message) => message.with_signature(signature).into(),
            Self::Capella(message) => message.with_signature(signature).into(),
            Self::Deneb(message) => message.with_signature(signature).into(),
        }
    }

    #[must_use]
    pub fn with_zero_signature(self) -> SignedBlindedBeaconBlock<P> {
        self.with_signature(SignatureBytes::ZERO)
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Bellatrix(_) => Phase::Bellatrix,
            Self::Capella(_) => Phase::Capella,
            Self::Deneb(_) => Phase::Deneb,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, From, Serialize, Encode)]
#[serde(bound = "", untagged)]
#[ssz(enum_behaviour = "transparent")]
pub enum SignedBeaconBlock<P: Preset> {
    Phase0(Phase0SignedBeaconBlock<P>),
    Altair(AltairSignedBeaconBlock<P>),
    Bellatrix(BellatrixSignedBeaconBlock<P>),
    Capella(CapellaSignedBeaconBlock<P>),
    Deneb(DenebSignedBeaconBlock<P>),
}

impl<P: Preset> SignedBeaconBlock<P> {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Phase0(_) => Phase::Phase0,
            Self::Altair(_) => Phase::Altair,
            Self::Bellatrix(_) => Phase::Bellatrix,
            Self::Capella(_) => Phase::Capella,
            Self::Deneb(_) => Phase::Deneb,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, From, Serialize, Encode)]
#[serde(bound = "", untagged)]
#[ssz(enum_behaviour = "transparent")]
pub enum SignedBlindedBeaconBlock<P: Preset> {
    Bellatrix(BellatrixSignedBlindedBeaconBlock<P>),
    Capella(CapellaSignedBlindedBeaconBlock<P>),
    Deneb(DenebSignedBlindedBeaconBlock<P>),
}

impl<P: Preset> SignedBlindedBeaconBlock<P> {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Bellatrix(_) => Phase::Bellatrix,
            Self::Capella(_) => Phase::Capella,
            Self::Deneb(_) => Phase::Deneb,
        }
    }
}

#[cfg(test)]
mod tests {
    use ssz::Encode as _;

    use crate::preset::Minimal;

    use super::*;

    #[test]
    fn zero_signature_is_attached_to_block_of_same_phase() {
        let block = BeaconBlock::<Minimal>::from(AltairBeaconBlock {
            slot: 7,
            ..AltairBeaconBlock::default()
        });

        let signed_block = block.with_zero_signature();

        let SignedBeaconBlock::Altair(signed_block) = signed_block else {
            panic!("block should stay in Altair: {signed_block:?}");
        };

        assert_eq!(signed_block.message.slot, 7);
        assert_eq!(signed_block.signature, SignatureBytes::ZERO);
    }

    #[test]
    fn blinded_block_keeps_its_phase_when_signed() {
        let block = BlindedBeaconBlock::<Minimal>::from(CapellaBlindedBeaconBlock::default());

        assert_eq!(block.phase(), Phase::Capella);
        assert_eq!(block.with_zero_signature().phase(), Phase::Capella);
    }

    #[test]
    fn combined_block_is_encoded_without_selector() {
        let message = BellatrixBeaconBlock::<Minimal> {
            slot: 3,
            ..BellatrixBeaconBlock::default()
        };

        assert_eq!(
            BeaconBlock::from(message.clone()).as_ssz_bytes(),
            message.as_ssz_bytes(),
        );
    }
}
