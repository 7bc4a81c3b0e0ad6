#![allow(clippy::module_name_repetitions)]

use core::{fmt::Debug, hash::Hash};

use typenum::{
    Prod, Unsigned, U1048576, U1073741824, U128, U16, U2, U2048, U256, U32, U4, U4096, U512, U6,
};

use crate::deneb::consts::BytesPerFieldElement;

/// Compile-time configuration variables.
///
/// Only the variables that bound the size of block containers are included.
///
/// See [presets in `consensus-specs`](https://github.com/ethereum/consensus-specs/tree/aac851f860fa384916f62027b2dbe3318a354c5b/presets).
pub trait Preset: Copy + Eq + Ord + Hash + Default + Debug + Send + Sync + 'static {
    // Phase 0
    type MaxAttestations: Unsigned + Eq + Debug + Send + Sync;
    type MaxAttesterSlashings: Unsigned + Eq + Debug + Send + Sync;
    type MaxDeposits: Unsigned + Eq + Debug + Send + Sync;
    type MaxProposerSlashings: Unsigned + Eq + Debug + Send + Sync;
    type MaxValidatorsPerCommittee: Unsigned + Eq + Debug + Send + Sync;
    type MaxVoluntaryExits: Unsigned + Eq + Debug + Send + Sync;

    // Altair
    type SyncCommitteeSize: Unsigned + Eq + Debug + Send + Sync;

    // Bellatrix
    type BytesPerLogsBloom: Unsigned + Eq + Debug + Send + Sync;
    type MaxBytesPerTransaction: Unsigned + Eq + Debug + Send + Sync;
    type MaxExtraDataBytes: Unsigned + Eq + Debug + Send + Sync;
    type MaxTransactionsPerPayload: Unsigned + Eq + Debug + Send + Sync;

    // Capella
    type MaxBlsToExecutionChanges: Unsigned + Eq + Debug + Send + Sync;
    type MaxWithdrawalsPerPayload: Unsigned + Eq + Debug + Send + Sync;

    // Deneb
    type FieldElementsPerBlob: Unsigned + Eq + Debug + Send + Sync;
    type MaxBlobCommitmentsPerBlock: Unsigned + Eq + Debug + Send + Sync;
    type MaxBlobsPerBlock: Unsigned + Eq + Debug + Send + Sync;

    // Derived type-level variables
    type BytesPerBlob: Unsigned + Eq + Debug + Send + Sync;
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Mainnet;

impl Preset for Mainnet {
    // Phase 0
    type MaxAttestations = U128;
    type MaxAttesterSlashings = U2;
    type MaxDeposits = U16;
    type MaxProposerSlashings = U16;
    type MaxValidatorsPerCommittee = U2048;
    type MaxVoluntaryExits = U16;

    // Altair
    type SyncCommitteeSize = U512;

    // Bellatrix
    type BytesPerLogsBloom = U256;
    type MaxBytesPerTransaction = U1073741824;
    type MaxExtraDataBytes = U32;
    type MaxTransactionsPerPayload = U1048576;

    // Capella
    type MaxBlsToExecutionChanges = U16;
    type MaxWithdrawalsPerPayload = U16;

    // Deneb
    type FieldElementsPerBlob = U4096;
    type MaxBlobCommitmentsPerBlock = U4096;
    type MaxBlobsPerBlock = U6;

    // Derived type-level variables
    type BytesPerBlob = Prod<BytesPerFieldElement, Self::FieldElementsPerBlob>;
}

/// [Minimal preset](https://github.com/ethereum/consensus-specs/tree/aac851f860fa384916f62027b2dbe3318a354c5b/presets/minimal).
///
/// Most variables are shared with [`Mainnet`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Minimal;

impl Preset for Minimal {
    type MaxAttestations = <Mainnet as Preset>::MaxAttestations;
    type MaxAttesterSlashings = <Mainnet as Preset>::MaxAttesterSlashings;
    type MaxDeposits = <Mainnet as Preset>::MaxDeposits;
    type MaxProposerSlashings = <Mainnet as Preset>::MaxProposerSlashings;
    type MaxValidatorsPerCommittee = <Mainnet as Preset>::MaxValidatorsPerCommittee;
    type MaxVoluntaryExits = <Mainnet as Preset>::MaxVoluntaryExits;

    type SyncCommitteeSize = U32;

    type BytesPerLogsBloom = <Mainnet as Preset>::BytesPerLogsBloom;
    type MaxBytesPerTransaction = <Mainnet as Preset>::MaxBytesPerTransaction;
    type MaxExtraDataBytes = <Mainnet as Preset>::MaxExtraDataBytes;
    type MaxTransactionsPerPayload = <Mainnet as Preset>::MaxTransactionsPerPayload;

    type MaxBlsToExecutionChanges = <Mainnet as Preset>::MaxBlsToExecutionChanges;
    type MaxWithdrawalsPerPayload = U4;

    type FieldElementsPerBlob = <Mainnet as Preset>::FieldElementsPerBlob;
    type MaxBlobCommitmentsPerBlock = U16;
    type MaxBlobsPerBlock = <Mainnet as Preset>::MaxBlobsPerBlock;

    type BytesPerBlob = Prod<BytesPerFieldElement, Self::FieldElementsPerBlob>;
}
