//! Proof-of-work consensus rules.
//!
//! Three pure checks a node applies to block headers:
//! - the target required of the next block (LWMA retargeting),
//! - whether a block hash meets the target its header claims,
//! - whether the header's Equihash solution is valid.
//!
//! All functions take their consensus parameters explicitly and never log.
//! [`HeaderValidator`] bundles them with a parameter set and an Equihash
//! verifier and reports outcomes through [`diagnostics`].

pub mod diagnostics;
pub mod equihash;
pub mod error;
pub mod header;
pub mod retarget;
pub mod validator;

pub use equihash::{check_equihash_solution, verify_equihash_solution};
pub use error::{TargetRejection, WorkError};
pub use header::HeaderValidator;
pub use retarget::{
    clamp_solvetime, lwma_window, next_work_required, retarget, LwmaWindow, Retarget,
    RetargetRule, SOLVETIME_LIMIT,
};
pub use validator::{check_proof_of_work, checked_target, is_valid_proof_of_work};
