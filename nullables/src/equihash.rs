//! Nullable Equihash oracle: deterministic solution checks for testing.

use pow_crypto::{initialise_state, proof_preimage, Blake2bState, CryptoError, EquihashVerifier};
use pow_types::{BlockHeader, EquihashParams};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Digest,
    AcceptAll,
    RejectAll,
}

/// A stand-in for the generalized-birthday verifier.
///
/// In the default mode a solution is valid exactly when it equals the
/// finalized digest of the supplied state, so any change to the preimage
/// or the domain separation invalidates it, just as with the real scheme.
#[derive(Clone, Copy, Debug)]
pub struct NullEquihash {
    mode: Mode,
}

impl NullEquihash {
    pub fn new() -> Self {
        Self { mode: Mode::Digest }
    }

    pub fn accept_all() -> Self {
        Self {
            mode: Mode::AcceptAll,
        }
    }

    pub fn reject_all() -> Self {
        Self {
            mode: Mode::RejectAll,
        }
    }

    /// The solution this oracle accepts for `header`.
    pub fn solve(
        params: EquihashParams,
        personalization: &str,
        header: &BlockHeader,
    ) -> Result<Vec<u8>, CryptoError> {
        let mut state = initialise_state(params, personalization)?;
        state.update(&proof_preimage(header));
        Ok(state.finalize().as_bytes().to_vec())
    }
}

impl Default for NullEquihash {
    fn default() -> Self {
        Self::new()
    }
}

impl EquihashVerifier for NullEquihash {
    fn is_valid_solution(
        &self,
        _params: EquihashParams,
        state: &Blake2bState,
        solution: &[u8],
    ) -> bool {
        match self.mode {
            Mode::Digest => state.finalize().as_bytes() == solution,
            Mode::AcceptAll => true,
            Mode::RejectAll => false,
        }
    }
}
