//! Cryptographic primitives for the proof-of-work rules.
//!
//! - **SHA-256d** for block header hashes
//! - **BLAKE2b** (personalized) for the Equihash hash state
//! - Byte-exact header and proof preimage serialization

pub mod equihash;
pub mod error;
pub mod hash;
pub mod preimage;

pub use blake2b_simd::State as Blake2bState;
pub use equihash::{hash_output_len, initialise_state, state_for_preimage, EquihashVerifier};
pub use error::CryptoError;
pub use hash::{hash_header, sha256d};
pub use preimage::{
    equihash_input, proof_preimage, serialize_header, EQUIHASH_INPUT_SIZE, PROOF_PREIMAGE_SIZE,
};
