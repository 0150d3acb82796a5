//! Block header as seen by the proof-of-work rules.

use serde::{Deserialize, Serialize};

use crate::compact::CompactTarget;
use crate::hash::BlockHash;

/// Size of the Equihash nonce in bytes.
pub const NONCE_SIZE: usize = 32;

/// A block header carrying an Equihash solution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block: BlockHash,
    pub merkle_root: BlockHash,
    pub time: u32,
    pub bits: CompactTarget,
    pub nonce: [u8; NONCE_SIZE],
    pub solution: Vec<u8>,
}

impl BlockHeader {
    /// Block time widened to the signed width used in solvetime arithmetic.
    pub fn block_time(&self) -> i64 {
        i64::from(self.time)
    }
}
