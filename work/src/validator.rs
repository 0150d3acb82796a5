//! Proof-of-work validation: does a hash meet the target a header claims?

use pow_types::{BlockHash, CompactTarget, ConsensusParams, Target};

use crate::error::{TargetRejection, WorkError};

/// Expand `bits` and check it is a usable target no easier than the
/// network's limit.
///
/// Rejections are checked in the order negative, zero, overflow, above
/// limit; an overflowing value that truncates to zero reports `Zero`.
pub fn checked_target(bits: CompactTarget, params: &ConsensusParams) -> Result<Target, WorkError> {
    let decoded = bits.decode();
    let reason = if decoded.negative {
        Some(TargetRejection::Negative)
    } else if decoded.target.is_zero() {
        Some(TargetRejection::Zero)
    } else if decoded.overflow {
        Some(TargetRejection::Overflow)
    } else if decoded.target > params.pow_limit {
        Some(TargetRejection::AboveLimit)
    } else {
        None
    };

    match reason {
        Some(reason) => Err(WorkError::InvalidTarget { bits, reason }),
        None => Ok(decoded.target),
    }
}

/// Check that `hash`, read as a little-endian 256-bit integer, does not
/// exceed the target encoded by `bits`.
pub fn check_proof_of_work(
    hash: &BlockHash,
    bits: CompactTarget,
    params: &ConsensusParams,
) -> Result<(), WorkError> {
    let target = checked_target(bits, params)?;
    if hash.to_target() > target {
        return Err(WorkError::InsufficientWork { hash: *hash, bits });
    }
    Ok(())
}

pub fn is_valid_proof_of_work(
    hash: &BlockHash,
    bits: CompactTarget,
    params: &ConsensusParams,
) -> bool {
    check_proof_of_work(hash, bits, params).is_ok()
}
