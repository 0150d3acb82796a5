use thiserror::Error;

use pow_crypto::CryptoError;
use pow_types::{BlockHash, CompactTarget, TypesError};

/// Why a compact target is outside the range a block may claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TargetRejection {
    #[error("sign bit set")]
    Negative,

    #[error("target is zero")]
    Zero,

    #[error("target overflows 256 bits")]
    Overflow,

    #[error("target above proof-of-work limit")]
    AboveLimit,
}

#[derive(Debug, Error)]
pub enum WorkError {
    #[error("invalid target {bits}: {reason}")]
    InvalidTarget {
        bits: CompactTarget,
        reason: TargetRejection,
    },

    #[error("hash {hash} above target {bits}")]
    InsufficientWork { hash: BlockHash, bits: CompactTarget },

    #[error("equihash solution rejected")]
    InvalidProof,

    #[error("no ancestor at height {height}")]
    NoSuchAncestor { height: i64 },

    #[error(transparent)]
    InvalidParams(#[from] TypesError),

    #[error(transparent)]
    InvalidPersonalization(#[from] CryptoError),
}

impl WorkError {
    /// Whether this is a verdict on the block, as opposed to caller misuse.
    pub fn is_consensus_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidTarget { .. } | Self::InsufficientWork { .. } | Self::InvalidProof
        )
    }
}
