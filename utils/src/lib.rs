//! Shared utilities for the proof-of-work tooling.

pub mod logging;

pub use logging::init_tracing;
