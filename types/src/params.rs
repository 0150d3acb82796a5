//! Consensus parameters for the proof-of-work rules.
//!
//! Every operation takes a `ConsensusParams` value explicitly. The presets
//! below are for collaborators that select a network; the rules themselves
//! never consult a global.

use serde::{Deserialize, Serialize};

use crate::compact::CompactTarget;
use crate::error::TypesError;
use crate::network::NetworkId;
use crate::target::Target;

/// Maximum personalization length; the remaining 8 personal bytes hold `n` and `k`.
pub const MAX_PERSONALIZATION_LEN: usize = 8;

/// Equihash `(n, k)` parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquihashParams {
    pub n: u32,
    pub k: u32,
}

impl EquihashParams {
    pub const fn new(n: u32, k: u32) -> Self {
        Self { n, k }
    }

    /// Whether `(n, k)` describes a well-formed Equihash instance.
    pub fn is_valid(&self) -> bool {
        self.k >= 1 && self.n > self.k && self.n % 8 == 0 && self.n % (self.k + 1) == 0
    }
}

/// Network-wide proof-of-work parameters, constant per consensus epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Largest permitted target (minimum difficulty).
    pub pow_limit: Target,
    /// Expected seconds between blocks.
    pub target_spacing: i64,
    /// Number of solvetimes in the LWMA window.
    pub averaging_window: u32,
    /// Permit a minimum-difficulty block after a gap of two spacings.
    pub allow_min_difficulty: bool,
    /// Equihash BLAKE2b personalization prefix.
    pub personalization: String,
    pub equihash: EquihashParams,
}

impl ConsensusParams {
    pub fn mainnet() -> Self {
        Self {
            pow_limit: CompactTarget::from_consensus(0x1f07_ffff).decode().target,
            target_spacing: 600,
            averaging_window: 45,
            allow_min_difficulty: false,
            equihash: EquihashParams::new(144, 5),
            personalization: "ZcashPoW".into(),
        }
    }

    pub fn testnet() -> Self {
        Self {
            allow_min_difficulty: true,
            ..Self::mainnet()
        }
    }

    pub fn regtest() -> Self {
        Self {
            pow_limit: CompactTarget::from_consensus(0x200f_0f0f).decode().target,
            allow_min_difficulty: true,
            equihash: EquihashParams::new(48, 5),
            ..Self::mainnet()
        }
    }

    pub fn for_network(network: NetworkId) -> Self {
        match network {
            NetworkId::Main => Self::mainnet(),
            NetworkId::Test => Self::testnet(),
            NetworkId::Regtest => Self::regtest(),
        }
    }

    /// The LWMA normaliser `k = N * (N + 1) * T / 2`, if it fits in an `i64`.
    pub fn lwma_k(&self) -> Option<i64> {
        let n = i64::from(self.averaging_window);
        n.checked_mul(n + 1)?
            .checked_mul(self.target_spacing)
            .map(|v| v / 2)
    }

    /// Reject parameter sets the retarget and proof rules cannot evaluate.
    pub fn validate(&self) -> Result<(), TypesError> {
        self.validate_retarget()?;
        if !self.equihash.is_valid() {
            return Err(TypesError::InvalidParams(format!(
                "invalid equihash parameters n={} k={}",
                self.equihash.n, self.equihash.k
            )));
        }
        if self.personalization.len() > MAX_PERSONALIZATION_LEN {
            return Err(TypesError::InvalidParams(format!(
                "personalization longer than {MAX_PERSONALIZATION_LEN} bytes"
            )));
        }
        Ok(())
    }

    /// Check only the fields difficulty retargeting and the work check read:
    /// window, spacing, limit and the LWMA arithmetic bounds.
    pub fn validate_retarget(&self) -> Result<(), TypesError> {
        if self.averaging_window == 0 {
            return Err(TypesError::InvalidParams("averaging_window must be at least 1".into()));
        }
        if self.target_spacing <= 0 {
            return Err(TypesError::InvalidParams("target_spacing must be positive".into()));
        }
        if self.pow_limit.is_zero() {
            return Err(TypesError::InvalidParams("pow_limit must be nonzero".into()));
        }
        let k = self
            .lwma_k()
            .ok_or_else(|| TypesError::InvalidParams("LWMA normaliser overflows".into()))?;
        let divisor = k.checked_mul(i64::from(self.averaging_window));
        // Six-spacing solvetimes weighted by 1..=N must also fit.
        let max_weighted = self.target_spacing.checked_mul(6).and_then(|t| t.checked_mul(k));
        match (divisor, max_weighted) {
            (Some(d), Some(_)) if d > 0 => {}
            _ => return Err(TypesError::InvalidParams("LWMA window arithmetic overflows".into())),
        }
        Ok(())
    }
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self::mainnet()
    }
}
