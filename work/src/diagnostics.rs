//! Structured logging of proof-of-work outcomes.
//!
//! The rule functions are pure and never log; callers that want a record of
//! why a header was rejected or which retarget rule applied route results
//! through here.

use pow_types::BlockTimeSample;

use crate::error::WorkError;
use crate::retarget::{Retarget, RetargetRule};

/// Log a failed check. Consensus failures go to `warn`, misuse to `error`.
pub fn record_rejection(err: &WorkError) {
    match err {
        WorkError::InvalidTarget { bits, reason } => {
            tracing::warn!(bits = %bits, reason = %reason, "header target out of range");
        }
        WorkError::InsufficientWork { hash, bits } => {
            tracing::warn!(hash = %hash, bits = %bits, "hash does not meet target");
        }
        WorkError::InvalidProof => {
            tracing::warn!("equihash solution rejected");
        }
        other => {
            tracing::error!(error = %other, "proof-of-work check could not be evaluated");
        }
    }
}

pub fn record_retarget(tip: &BlockTimeSample, retarget: &Retarget) {
    let next_height = u64::from(tip.height) + 1;
    match retarget.rule {
        RetargetRule::MinDifficultyGap => {
            tracing::debug!(
                height = next_height,
                bits = %retarget.bits,
                "minimum difficulty after block gap"
            );
        }
        RetargetRule::InsufficientHistory => {
            tracing::debug!(
                height = next_height,
                bits = %retarget.bits,
                "chain shorter than averaging window"
            );
        }
        RetargetRule::Lwma { floored } => {
            tracing::debug!(height = next_height, bits = %retarget.bits, floored, "lwma retarget");
        }
    }
}
