//! Nullable infrastructure for deterministic testing.
//!
//! The retarget and proof rules consume two collaborators: a chain index and
//! an Equihash verifier. This crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be built and edited programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod chain;
pub mod equihash;

pub use chain::NullChain;
pub use equihash::NullEquihash;
