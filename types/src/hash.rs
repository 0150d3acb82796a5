//! Block hash type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;
use crate::target::Target;

/// A 32-byte block hash in internal byte order.
///
/// The bytes are the raw digest output; read as a number they are
/// little-endian, which is how the proof-of-work comparison sees them.
/// `Display` prints the reversed (big-endian) form used by explorers and RPC.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHash([u8; 32]);

impl Default for BlockHash {
    fn default() -> Self {
        Self::ZERO
    }
}

impl BlockHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The hash as a 256-bit unsigned integer.
    pub fn to_target(&self) -> Target {
        Target::from_le_bytes(self.0)
    }

    /// The hash whose numeric value equals `target`.
    pub fn from_target(target: &Target) -> Self {
        Self(target.to_le_bytes())
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash(")?;
        for b in self.0.iter().rev().take(4) {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "\u{2026})")
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter().rev() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for BlockHash {
    type Err = TypesError;

    /// Parses the big-endian display form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = Target::from_hex(s)?.to_be_bytes();
        bytes.reverse();
        Ok(Self(bytes))
    }
}
