//! Nullable chain index: an in-memory `AncestorLookup` for testing.

use pow_types::{AncestorLookup, BlockTimeSample, CompactTarget};

/// An in-memory chain indexed by height, starting at height 0.
///
/// Blocks are appended in height order; the last block is the tip.
#[derive(Clone, Debug, Default)]
pub struct NullChain {
    blocks: Vec<BlockTimeSample>,
}

impl NullChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A genesis block at `start_time` followed by `len - 1` blocks exactly
    /// `spacing` seconds apart, all carrying `bits`.
    pub fn steady(len: u32, start_time: i64, spacing: i64, bits: CompactTarget) -> Self {
        let mut chain = Self::new();
        for height in 0..len {
            chain.push(start_time + i64::from(height) * spacing, bits);
        }
        chain
    }

    /// A genesis block at `start_time` followed by one block per solvetime.
    pub fn from_solvetimes(start_time: i64, bits: CompactTarget, solvetimes: &[i64]) -> Self {
        let mut chain = Self::new();
        chain.push(start_time, bits);
        let mut time = start_time;
        for solvetime in solvetimes {
            time += solvetime;
            chain.push(time, bits);
        }
        chain
    }

    /// Append a block at the next height.
    pub fn push(&mut self, time: i64, bits: CompactTarget) -> &mut Self {
        let height = self.blocks.len() as u32;
        self.blocks.push(BlockTimeSample::new(height, time, bits));
        self
    }

    /// Overwrite the timestamp of an existing block.
    pub fn set_time(&mut self, height: u32, time: i64) {
        if let Some(block) = self.blocks.get_mut(height as usize) {
            block.time = time;
        }
    }

    /// Overwrite the compact target of an existing block.
    pub fn set_bits(&mut self, height: u32, bits: CompactTarget) {
        if let Some(block) = self.blocks.get_mut(height as usize) {
            block.bits = bits;
        }
    }

    pub fn tip(&self) -> Option<BlockTimeSample> {
        self.blocks.last().copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl AncestorLookup for NullChain {
    fn ancestor(&self, height: u32) -> Option<BlockTimeSample> {
        self.blocks.get(height as usize).copied()
    }
}
