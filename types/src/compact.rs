//! Compact ("nBits") target encoding.
//!
//! A floating-point style 32-bit encoding of a 256-bit target: the top byte
//! is a base-256 exponent (the byte length of the value), the low three
//! bytes a mantissa whose bit 23 is a sign flag.
//!
//! The exact bit pattern is consensus-critical. Several 256-bit values share
//! one compact form, so targets produced by the retarget algorithm must be
//! round-tripped through [`CompactTarget::encode`] before they are compared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;
use crate::target::Target;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// A 32-bit compact target as carried in block headers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CompactTarget(u32);

/// The result of expanding a [`CompactTarget`].
///
/// `target` is the magnitude with the sign bit stripped; the flags are
/// reported separately so callers decide what to reject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedTarget {
    pub target: Target,
    pub negative: bool,
    pub overflow: bool,
}

impl CompactTarget {
    pub const fn from_consensus(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn to_consensus(self) -> u32 {
        self.0
    }

    pub fn exponent(self) -> u32 {
        self.0 >> 24
    }

    /// Expand to a 256-bit target. Never fails.
    pub fn decode(self) -> DecodedTarget {
        let size = self.exponent();
        let mut word = self.0 & MANTISSA_MASK;

        let target = if size <= 3 {
            word >>= 8 * (3 - size);
            Target::from_u64(u64::from(word))
        } else {
            Target::from_u64(u64::from(word)).shl(8 * (size - 3))
        };

        let negative = word != 0 && self.0 & SIGN_BIT != 0;
        let overflow = word != 0
            && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

        DecodedTarget {
            target,
            negative,
            overflow,
        }
    }

    /// Encode a target, choosing the shortest exponent whose mantissa leaves
    /// the sign bit clear.
    pub fn encode(target: &Target) -> Self {
        let mut size = target.bits().div_ceil(8);
        // Only the low 24 bits survive the mask below.
        let mut compact = if size <= 3 {
            (target.low_u64() << (8 * (3 - size))) as u32
        } else {
            target.shr(8 * (size - 3)).low_u64() as u32
        };

        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }

        Self((compact & 0x00ff_ffff) | (size << 24))
    }

    /// The target if it is usable as a proof-of-work bound: not negative,
    /// not overflowed and not zero.
    pub fn to_target(self) -> Option<Target> {
        let decoded = self.decode();
        if decoded.negative || decoded.overflow || decoded.target.is_zero() {
            None
        } else {
            Some(decoded.target)
        }
    }
}

impl Target {
    /// Shorthand for [`CompactTarget::encode`].
    pub fn to_compact(&self) -> CompactTarget {
        CompactTarget::encode(self)
    }
}

impl fmt::Debug for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactTarget({:#010x})", self.0)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl FromStr for CompactTarget {
    type Err = TypesError;

    /// Parses eight hex digits, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| TypesError::InvalidHex(format!("{s}: {e}")))
    }
}

impl From<CompactTarget> for String {
    fn from(bits: CompactTarget) -> Self {
        bits.to_string()
    }
}

impl TryFrom<String> for CompactTarget {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bits: u32) -> DecodedTarget {
        CompactTarget::from_consensus(bits).decode()
    }

    #[test]
    fn small_exponents_shift_right() {
        assert_eq!(decode(0x0100_3456).target, Target::zero());
        assert_eq!(decode(0x0112_3456).target, Target::from_u64(0x12));
        assert_eq!(decode(0x0212_3456).target, Target::from_u64(0x1234));
        assert_eq!(decode(0x0312_3456).target, Target::from_u64(0x12_3456));
    }

    #[test]
    fn large_exponents_shift_left() {
        assert_eq!(decode(0x0412_3456).target, Target::from_u64(0x1234_5600));
        assert_eq!(decode(0x0500_9234).target, Target::from_u64(0x9234_0000));
        assert_eq!(
            decode(0x1d00_ffff).target,
            Target::from_hex("00000000ffff0000000000000000000000000000000000000000000000000000")
                .unwrap()
        );
    }

    #[test]
    fn sign_bit_sets_negative_only_with_nonzero_mantissa() {
        let d = decode(0x0492_3456);
        assert!(d.negative);
        assert_eq!(d.target, Target::from_u64(0x1234_5600));

        // The mantissa shifts to zero before the sign is considered.
        let d = decode(0x0180_3456);
        assert!(!d.negative);
        assert!(d.target.is_zero());
    }

    #[test]
    fn overflow_detection() {
        assert!(decode(0x2300_0001).overflow);
        assert!(!decode(0x2200_0001).overflow);
        assert!(decode(0x2201_0000).overflow);
        assert!(decode(0x2101_0000).overflow);
        assert!(!decode(0x2100_ffff).overflow);
        // Zero mantissa never overflows regardless of exponent.
        assert!(!decode(0xff00_0000).overflow);
    }

    #[test]
    fn encode_picks_minimal_exponent() {
        let enc = |t: Target| CompactTarget::encode(&t).to_consensus();
        assert_eq!(enc(Target::zero()), 0);
        assert_eq!(enc(Target::from_u64(1)), 0x0101_0000);
        assert_eq!(enc(Target::from_u64(0x12)), 0x0112_0000);
        assert_eq!(enc(Target::from_u64(0x80)), 0x0200_8000);
        assert_eq!(enc(Target::from_u64(0x12_3456_0000)), 0x0512_3456);
        assert_eq!(enc(decode(0x1d00_ffff).target), 0x1d00_ffff);
    }

    #[test]
    fn encode_never_sets_sign_bit() {
        let t = Target::from_u64(0x7f_ffff).shl(8 * 27);
        let bits = CompactTarget::encode(&t);
        assert_eq!(bits.to_consensus(), 0x1e7f_ffff);
        assert_eq!(bits.to_consensus() & SIGN_BIT, 0);
    }

    #[test]
    fn to_target_rejects_unusable_values() {
        assert!(CompactTarget::from_consensus(0x0492_3456).to_target().is_none());
        assert!(CompactTarget::from_consensus(0x2300_0001).to_target().is_none());
        assert!(CompactTarget::from_consensus(0x0100_3456).to_target().is_none());
        assert!(CompactTarget::from_consensus(0x1d00_ffff).to_target().is_some());
    }

    #[test]
    fn parse_and_display() {
        let bits: CompactTarget = "1d00ffff".parse().unwrap();
        assert_eq!(bits.to_consensus(), 0x1d00_ffff);
        assert_eq!("0x1d00ffff".parse::<CompactTarget>().unwrap(), bits);
        assert_eq!(bits.to_string(), "1d00ffff");
        assert!("nothex".parse::<CompactTarget>().is_err());
    }
}
