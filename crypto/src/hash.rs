//! SHA-256d block header hashing.

use sha2::{Digest, Sha256};

use crate::preimage::serialize_header;
use pow_types::{BlockHash, BlockHeader};

/// Double SHA-256 of arbitrary data.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut output = [0u8; 32];
    output.copy_from_slice(&second);
    output
}

/// Hash a full header, solution included, to produce its `BlockHash`.
pub fn hash_header(header: &BlockHeader) -> BlockHash {
    BlockHash::new(sha256d(&serialize_header(header)))
}
