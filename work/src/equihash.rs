//! Equihash solution checking for block headers.

use pow_crypto::{proof_preimage, state_for_preimage, EquihashVerifier};
use pow_types::{BlockHeader, EquihashParams};

use crate::error::WorkError;

/// Check the header's Equihash solution.
///
/// Builds the personalized BLAKE2b state, absorbs the 108-byte proof
/// preimage (the header without its solution) and hands the state to
/// `verifier`. A personalization or parameter set the state cannot be built
/// from is an error, not a rejection.
pub fn verify_equihash_solution<V: EquihashVerifier + ?Sized>(
    header: &BlockHeader,
    params: EquihashParams,
    personalization: &str,
    verifier: &V,
) -> Result<(), WorkError> {
    let state = state_for_preimage(params, personalization, &proof_preimage(header))?;
    if verifier.is_valid_solution(params, &state, &header.solution) {
        Ok(())
    } else {
        Err(WorkError::InvalidProof)
    }
}

/// Boolean form of [`verify_equihash_solution`]; errors count as invalid.
pub fn check_equihash_solution<V: EquihashVerifier + ?Sized>(
    header: &BlockHeader,
    params: EquihashParams,
    personalization: &str,
    verifier: &V,
) -> bool {
    verify_equihash_solution(header, params, personalization, verifier).is_ok()
}
