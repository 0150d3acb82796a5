//! Header-level proof-of-work checks bound to one parameter set.

use pow_crypto::{hash_header, EquihashVerifier};
use pow_types::{
    AncestorLookup, BlockHash, BlockHeader, BlockTimeSample, CompactTarget, ConsensusParams,
};

use crate::diagnostics;
use crate::equihash::verify_equihash_solution;
use crate::error::WorkError;
use crate::retarget::retarget;
use crate::validator::check_proof_of_work;

/// Applies the work and solution checks to headers and computes the target
/// for the next block, logging each outcome.
///
/// The two checks are independent; a header passes only if both do. When
/// both fail the work failure is reported.
pub struct HeaderValidator<V> {
    params: ConsensusParams,
    verifier: V,
}

impl<V: EquihashVerifier> HeaderValidator<V> {
    pub fn new(params: ConsensusParams, verifier: V) -> Result<Self, WorkError> {
        params.validate()?;
        Ok(Self { params, verifier })
    }

    pub fn params(&self) -> &ConsensusParams {
        &self.params
    }

    /// Validate a header against its SHA-256d block hash.
    pub fn validate(&self, header: &BlockHeader) -> Result<(), WorkError> {
        self.validate_with_hash(header, &hash_header(header))
    }

    /// Validate a header against a block hash computed elsewhere.
    pub fn validate_with_hash(
        &self,
        header: &BlockHeader,
        hash: &BlockHash,
    ) -> Result<(), WorkError> {
        let work = check_proof_of_work(hash, header.bits, &self.params);
        let proof = verify_equihash_solution(
            header,
            self.params.equihash,
            &self.params.personalization,
            &self.verifier,
        );

        for err in [&work, &proof].into_iter().filter_map(|r| r.as_ref().err()) {
            diagnostics::record_rejection(err);
        }
        work.and(proof)
    }

    /// The compact target required of the block after `tip`.
    pub fn next_work_required<C: AncestorLookup + ?Sized>(
        &self,
        chain: &C,
        tip: &BlockTimeSample,
        candidate_time: i64,
    ) -> Result<CompactTarget, WorkError> {
        match retarget(chain, tip, candidate_time, &self.params) {
            Ok(r) => {
                diagnostics::record_retarget(tip, &r);
                Ok(r.bits)
            }
            Err(err) => {
                diagnostics::record_rejection(&err);
                Err(err)
            }
        }
    }
}
