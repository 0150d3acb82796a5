//! Block window files for the `next-target` command.
//!
//! ```toml
//! candidate_time = 1600027600   # optional
//!
//! [[blocks]]
//! height = 100
//! time = 1600000000
//! bits = "1d00ffff"
//! ```
//!
//! Heights must be consecutive and ascending; the last block is the tip.

use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use pow_types::{AncestorLookup, BlockTimeSample};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowFile {
    pub candidate_time: Option<i64>,
    pub blocks: Vec<BlockTimeSample>,
}

/// A contiguous run of indexed blocks.
#[derive(Debug)]
pub struct BlockWindow {
    blocks: Vec<BlockTimeSample>,
}

impl WindowFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read window file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid window file {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

impl BlockWindow {
    pub fn new(blocks: Vec<BlockTimeSample>) -> anyhow::Result<Self> {
        if blocks.is_empty() {
            bail!("window contains no blocks");
        }
        for pair in blocks.windows(2) {
            if pair[0].height.checked_add(1) != Some(pair[1].height) {
                bail!(
                    "block heights must be consecutive: {} followed by {}",
                    pair[0].height,
                    pair[1].height
                );
            }
        }
        Ok(Self { blocks })
    }

    pub fn tip(&self) -> BlockTimeSample {
        // Non-empty by construction.
        self.blocks[self.blocks.len() - 1]
    }
}

impl AncestorLookup for BlockWindow {
    fn ancestor(&self, height: u32) -> Option<BlockTimeSample> {
        let first = self.blocks.first()?.height;
        let offset = height.checked_sub(first)?;
        self.blocks.get(offset as usize).copied()
    }
}
