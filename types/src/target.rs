//! Unsigned 256-bit target arithmetic.
//!
//! Consensus code needs the exact semantics of a fixed-width 256-bit
//! register: shifts drop bits past the top, multiplication and addition wrap
//! modulo 2^256, division truncates. `Target` wraps a `BigUint` and re-masks
//! after every operation that could grow it.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Width of a target in bits.
pub const TARGET_BITS: u32 = 256;

/// A 256-bit unsigned integer used for proof-of-work targets and hashes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Target(BigUint);

impl Target {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// The largest representable value, `2^256 - 1`.
    pub fn max_value() -> Self {
        Self((BigUint::from(1u8) << TARGET_BITS) - 1u8)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(BigUint::from_bytes_be(&bytes))
    }

    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        Self(BigUint::from_bytes_le(&bytes))
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let raw = self.0.to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - raw.len()..].copy_from_slice(&raw);
        out
    }

    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut out = self.to_be_bytes();
        out.reverse();
        out
    }

    /// Parse 64 big-endian hex digits (an optional `0x` prefix is accepted).
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 32] = raw
            .as_slice()
            .try_into()
            .map_err(|_| TypesError::InvalidLength {
                expected: 32,
                actual: raw.len(),
            })?;
        Ok(Self::from_be_bytes(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Number of significant bits (0 for zero).
    pub fn bits(&self) -> u32 {
        // Bounded by TARGET_BITS, so the narrowing is lossless.
        self.0.bits() as u32
    }

    /// The least significant 64 bits.
    pub fn low_u64(&self) -> u64 {
        self.0.iter_u64_digits().next().unwrap_or(0)
    }

    /// Left shift, discarding bits shifted past bit 255.
    pub fn shl(&self, shift: u32) -> Self {
        if shift >= TARGET_BITS {
            return Self::zero();
        }
        Self::wrap(&self.0 << shift)
    }

    pub fn shr(&self, shift: u32) -> Self {
        if shift >= TARGET_BITS {
            return Self::zero();
        }
        Self(&self.0 >> shift)
    }

    /// Multiplication modulo 2^256.
    pub fn wrapping_mul_u64(&self, rhs: u64) -> Self {
        Self::wrap(&self.0 * rhs)
    }

    /// Addition modulo 2^256.
    pub fn wrapping_add(&self, rhs: &Target) -> Self {
        Self::wrap(&self.0 + &rhs.0)
    }

    /// Truncating division. Returns `None` when `rhs` is zero.
    pub fn checked_div_u64(&self, rhs: u64) -> Option<Self> {
        if rhs == 0 {
            return None;
        }
        Some(Self(&self.0 / rhs))
    }

    /// Value as `f64`, for display only.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::INFINITY)
    }

    fn wrap(value: BigUint) -> Self {
        if value.bits() > u64::from(TARGET_BITS) {
            Self(value & Self::max_value().0)
        } else {
            Self(value)
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.to_hex())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Target {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
