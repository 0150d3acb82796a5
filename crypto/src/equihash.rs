//! Equihash BLAKE2b state initialisation.
//!
//! The generalized-birthday verifier consumes a BLAKE2b state that has been
//! domain-separated by the personalization prefix and the `(n, k)` pair and
//! then fed the proof preimage. Building that state is the only part of the
//! Equihash scheme implemented here; the solution check itself is delegated.

use blake2b_simd::{Params, State};

use crate::error::CryptoError;
use pow_types::{EquihashParams, MAX_PERSONALIZATION_LEN};

/// The generalized-birthday solution check, treated as an oracle.
///
/// Given the parameters, a state that has absorbed the proof preimage, and
/// the proposed solution, decide validity. Implementations must not mutate
/// observable state and must be deterministic.
pub trait EquihashVerifier {
    fn is_valid_solution(&self, params: EquihashParams, state: &State, solution: &[u8]) -> bool;
}

impl<T: EquihashVerifier + ?Sized> EquihashVerifier for &T {
    fn is_valid_solution(&self, params: EquihashParams, state: &State, solution: &[u8]) -> bool {
        (**self).is_valid_solution(params, state, solution)
    }
}

/// BLAKE2b output length for `(n, k)`: as many whole `n`-bit strings as fit in 512 bits.
pub fn hash_output_len(params: EquihashParams) -> usize {
    ((512 / params.n) * params.n / 8) as usize
}

/// Start a BLAKE2b state with `personalization || le32(n) || le32(k)` as the
/// personal bytes. A short personalization is zero-padded to 8 bytes, so `n`
/// and `k` always occupy bytes 8..12 and 12..16.
pub fn initialise_state(
    params: EquihashParams,
    personalization: &str,
) -> Result<State, CryptoError> {
    if !params.is_valid() || params.n > 512 {
        return Err(CryptoError::InvalidEquihashParams {
            n: params.n,
            k: params.k,
        });
    }
    let prefix = personalization.as_bytes();
    if prefix.len() > MAX_PERSONALIZATION_LEN {
        return Err(CryptoError::PersonalizationTooLong(prefix.len()));
    }

    let mut personal = Vec::with_capacity(MAX_PERSONALIZATION_LEN + 8);
    personal.extend_from_slice(prefix);
    personal.resize(MAX_PERSONALIZATION_LEN, 0);
    personal.extend_from_slice(&params.n.to_le_bytes());
    personal.extend_from_slice(&params.k.to_le_bytes());

    Ok(Params::new()
        .hash_length(hash_output_len(params))
        .personal(&personal)
        .to_state())
}

/// Initialise a state and absorb `preimage`.
pub fn state_for_preimage(
    params: EquihashParams,
    personalization: &str,
    preimage: &[u8],
) -> Result<State, CryptoError> {
    let mut state = initialise_state(params, personalization)?;
    state.update(preimage);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lengths() {
        assert_eq!(hash_output_len(EquihashParams::new(200, 9)), 50);
        assert_eq!(hash_output_len(EquihashParams::new(144, 5)), 54);
        assert_eq!(hash_output_len(EquihashParams::new(48, 5)), 60);
    }

    #[test]
    fn personal_bytes_match_manual_construction() {
        let params = EquihashParams::new(200, 9);
        let mut expected_personal = b"ZcashPoW".to_vec();
        expected_personal.extend_from_slice(&200u32.to_le_bytes());
        expected_personal.extend_from_slice(&9u32.to_le_bytes());
        let expected = Params::new()
            .hash_length(50)
            .personal(&expected_personal)
            .hash(b"input");

        let mut state = initialise_state(params, "ZcashPoW").unwrap();
        state.update(b"input");
        assert_eq!(state.finalize(), expected);
    }

    #[test]
    fn short_personalization_is_zero_padded() {
        let params = EquihashParams::new(48, 5);
        let mut personal = [0u8; 16];
        personal[..7].copy_from_slice(b"TestPoW");
        personal[8..12].copy_from_slice(&48u32.to_le_bytes());
        personal[12..16].copy_from_slice(&5u32.to_le_bytes());
        let expected = Params::new()
            .hash_length(hash_output_len(params))
            .personal(&personal)
            .hash(b"x");

        let state = state_for_preimage(params, "TestPoW", b"x").unwrap();
        assert_eq!(state.finalize(), expected);

        let empty = state_for_preimage(params, "", b"x").unwrap();
        personal[..8].fill(0);
        let expected = Params::new()
            .hash_length(hash_output_len(params))
            .personal(&personal)
            .hash(b"x");
        assert_eq!(empty.finalize(), expected);
    }

    #[test]
    fn personalization_separates_domains() {
        let params = EquihashParams::new(144, 5);
        let a = state_for_preimage(params, "ZcashPoW", b"x").unwrap().finalize();
        let b = state_for_preimage(params, "BgoldPoW", b"x").unwrap().finalize();
        assert_ne!(a, b);
    }

    #[test]
    fn params_separate_domains() {
        let a = state_for_preimage(EquihashParams::new(144, 5), "ZcashPoW", b"x")
            .unwrap()
            .finalize();
        let b = state_for_preimage(EquihashParams::new(48, 5), "ZcashPoW", b"x")
            .unwrap()
            .finalize();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            initialise_state(EquihashParams::new(144, 5), "NinePerso"),
            Err(CryptoError::PersonalizationTooLong(9))
        ));
        assert!(matches!(
            initialise_state(EquihashParams::new(200, 8), "ZcashPoW"),
            Err(CryptoError::InvalidEquihashParams { n: 200, k: 8 })
        ));
        assert!(initialise_state(EquihashParams::new(1024, 7), "ZcashPoW").is_err());
    }
}
