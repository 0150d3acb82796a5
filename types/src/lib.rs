//! Fundamental types for the proof-of-work rules.
//!
//! This crate defines the values shared across the workspace: 256-bit
//! targets and their compact encoding, block hashes and headers, the chain
//! index view used for retargeting, and consensus parameters.

pub mod block;
pub mod chain;
pub mod compact;
pub mod error;
pub mod hash;
pub mod network;
pub mod params;
pub mod target;

pub use block::{BlockHeader, NONCE_SIZE};
pub use chain::{AncestorLookup, BlockTimeSample};
pub use compact::{CompactTarget, DecodedTarget};
pub use error::TypesError;
pub use hash::BlockHash;
pub use network::NetworkId;
pub use params::{ConsensusParams, EquihashParams, MAX_PERSONALIZATION_LEN};
pub use target::{Target, TARGET_BITS};
