//! LWMA difficulty retargeting.
//!
//! The next target is a linearly weighted moving average over the last `N`
//! solvetimes: recent blocks weigh more, each solvetime is clamped to
//! `±6T`, and the weighted sum is floored at a tenth of its expected value.
//!
//! The arithmetic is consensus-critical and deliberately literal. Each
//! block's target is divided by `k * N` *before* it is summed; summing first
//! and dividing once yields different rounding and forks the chain.

use pow_types::{
    AncestorLookup, BlockHeader, BlockTimeSample, CompactTarget, ConsensusParams, Target,
};

use crate::error::WorkError;

/// Solvetimes are clamped to this many target spacings in either direction.
pub const SOLVETIME_LIMIT: i64 = 6;

/// Which rule produced a retarget result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetargetRule {
    /// The candidate arrived more than two spacings after the tip on a
    /// network that allows minimum-difficulty blocks.
    MinDifficultyGap,
    /// The chain is not yet longer than the averaging window.
    InsufficientHistory,
    /// The weighted average; `floored` when the weighted solvetime was raised
    /// to its floor.
    Lwma { floored: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retarget {
    pub bits: CompactTarget,
    pub rule: RetargetRule,
}

/// The intermediate sums of one LWMA evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LwmaWindow {
    /// `Σ j * clamp(solvetime_j)`, after the floor is applied.
    pub weighted_solvetime: i64,
    /// `Σ target_j / (k * N)`.
    pub sum_target: Target,
    /// `N * (N + 1) * T / 2`.
    pub k: i64,
    pub floored: bool,
}

impl LwmaWindow {
    /// `weighted_solvetime * sum_target`, wrapping at 256 bits.
    pub fn next_target(&self) -> Target {
        // The floor keeps the weighted solvetime non-negative.
        let t = u64::try_from(self.weighted_solvetime).unwrap_or_default();
        self.sum_target.wrapping_mul_u64(t)
    }
}

/// Clamp a solvetime to `[-6 * spacing, 6 * spacing]`.
pub fn clamp_solvetime(solvetime: i64, spacing: i64) -> i64 {
    let limit = SOLVETIME_LIMIT * spacing;
    solvetime.min(limit).max(-limit)
}

/// The compact target required of the block following `tip`.
pub fn next_work_required<C: AncestorLookup + ?Sized>(
    chain: &C,
    tip: &BlockTimeSample,
    candidate: &BlockHeader,
    params: &ConsensusParams,
) -> Result<CompactTarget, WorkError> {
    retarget(chain, tip, candidate.block_time(), params).map(|r| r.bits)
}

/// As [`next_work_required`], reporting which rule applied.
pub fn retarget<C: AncestorLookup + ?Sized>(
    chain: &C,
    tip: &BlockTimeSample,
    candidate_time: i64,
    params: &ConsensusParams,
) -> Result<Retarget, WorkError> {
    params.validate_retarget()?;
    let limit = params.pow_limit.to_compact();

    let gap = params.target_spacing.saturating_mul(2);
    if params.allow_min_difficulty && candidate_time > tip.time.saturating_add(gap) {
        return Ok(Retarget {
            bits: limit,
            rule: RetargetRule::MinDifficultyGap,
        });
    }

    if tip.height <= params.averaging_window {
        return Ok(Retarget {
            bits: limit,
            rule: RetargetRule::InsufficientHistory,
        });
    }

    let window = lwma_window(chain, tip, params)?;
    Ok(Retarget {
        bits: window.next_target().to_compact(),
        rule: RetargetRule::Lwma {
            floored: window.floored,
        },
    })
}

/// Evaluate the weighted sums over the `N` blocks ending at `tip`.
///
/// Reads heights `tip.height - N ..= tip.height`; the window is only defined
/// when the oldest of those is above genesis, i.e. `tip.height > N`.
pub fn lwma_window<C: AncestorLookup + ?Sized>(
    chain: &C,
    tip: &BlockTimeSample,
    params: &ConsensusParams,
) -> Result<LwmaWindow, WorkError> {
    params.validate_retarget()?;
    let n = params.averaging_window;
    let spacing = params.target_spacing;

    if tip.height <= n {
        return Err(WorkError::NoSuchAncestor {
            height: i64::from(tip.height) - i64::from(n),
        });
    }

    // Both products were range-checked by `validate_retarget`.
    let k = params.lwma_k().unwrap_or_default();
    let divisor = u64::try_from(k * i64::from(n)).unwrap_or(1);

    let first = tip.height - n + 1;
    let mut prev = lookup(chain, first - 1)?;
    let mut weighted: i64 = 0;
    let mut sum_target = Target::zero();

    for (j, height) in (1i64..).zip(first..=tip.height) {
        let block = if height == tip.height {
            *tip
        } else {
            lookup(chain, height)?
        };

        let solvetime = clamp_solvetime(block.time.saturating_sub(prev.time), spacing);
        weighted += solvetime * j;

        let target = block.bits.decode().target;
        if let Some(share) = target.checked_div_u64(divisor) {
            sum_target = sum_target.wrapping_add(&share);
        }

        prev = block;
    }

    let floor = k / 10;
    let floored = weighted < floor;
    if floored {
        weighted = floor;
    }

    Ok(LwmaWindow {
        weighted_solvetime: weighted,
        sum_target,
        k,
        floored,
    })
}

fn lookup<C: AncestorLookup + ?Sized>(
    chain: &C,
    height: u32,
) -> Result<BlockTimeSample, WorkError> {
    chain.ancestor(height).ok_or(WorkError::NoSuchAncestor {
        height: i64::from(height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pow_nullables::NullChain;
    use pow_types::EquihashParams;

    const BITS: CompactTarget = CompactTarget::from_consensus(0x1d00_ffff);
    const START: i64 = 1_600_000_000;

    fn params() -> ConsensusParams {
        ConsensusParams {
            pow_limit: CompactTarget::from_consensus(0x1eff_ffff).decode().target,
            target_spacing: 600,
            averaging_window: 45,
            allow_min_difficulty: false,
            personalization: "ZcashPoW".into(),
            equihash: EquihashParams::new(144, 5),
        }
    }

    fn window_for(solvetimes: &[i64]) -> LwmaWindow {
        let chain = NullChain::from_solvetimes(START, BITS, solvetimes);
        let tip = chain.tip().unwrap();
        lwma_window(&chain, &tip, &params()).unwrap()
    }

    #[test]
    fn steady_state_reproduces_target() {
        let chain = NullChain::steady(100, START, 600, BITS);
        let tip = chain.tip().unwrap();
        let window = lwma_window(&chain, &tip, &params()).unwrap();
        assert_eq!(window.k, 621_000);
        assert_eq!(window.weighted_solvetime, window.k);
        assert!(!window.floored);

        // Per-term division loses less than one mantissa unit.
        let r = retarget(&chain, &tip, tip.time + 600, &params()).unwrap();
        assert_eq!(r.bits.to_consensus(), 0x1d00_fffe);
        assert_eq!(r.rule, RetargetRule::Lwma { floored: false });
        let input = BITS.decode().target;
        let next = window.next_target();
        assert!(next <= input);
        assert!(input.shr(16) <= next);
    }

    #[test]
    fn fast_blocks_raise_difficulty() {
        let chain = NullChain::steady(100, START, 300, BITS);
        let tip = chain.tip().unwrap();
        let bits = next_work_required(&chain, &tip, &candidate(tip.time + 300), &params()).unwrap();
        assert_eq!(bits.to_consensus(), 0x1c7f_ff7f);
    }

    #[test]
    fn slow_blocks_lower_difficulty() {
        let chain = NullChain::steady(100, START, 1200, BITS);
        let tip = chain.tip().unwrap();
        let bits =
            next_work_required(&chain, &tip, &candidate(tip.time + 1200), &params()).unwrap();
        assert_eq!(bits.to_consensus(), 0x1d01_fffd);
    }

    #[test]
    fn weighted_time_is_floored_at_a_tenth() {
        let chain = NullChain::steady(100, START, 1, BITS);
        let tip = chain.tip().unwrap();
        let window = lwma_window(&chain, &tip, &params()).unwrap();
        assert!(window.floored);
        assert_eq!(window.weighted_solvetime, 62_100);

        let r = retarget(&chain, &tip, tip.time + 1, &params()).unwrap();
        assert_eq!(r.bits.to_consensus(), 0x1c19_997f);
        assert_eq!(r.rule, RetargetRule::Lwma { floored: true });
    }

    #[test]
    fn negative_solvetimes_hit_the_floor() {
        let mut solvetimes = vec![600; 60];
        for s in solvetimes.iter_mut().skip(20) {
            *s = -600;
        }
        let window = window_for(&solvetimes);
        assert!(window.floored);
        assert_eq!(window.weighted_solvetime, window.k / 10);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_solvetime(100 * 600, 600), 3600);
        assert_eq!(clamp_solvetime(-100 * 600, 600), -3600);
        assert_eq!(clamp_solvetime(599, 600), 599);
        assert_eq!(clamp_solvetime(-599, 600), -599);
    }

    #[test]
    fn clamped_solvetimes_enter_the_window_clamped() {
        let mut huge = vec![600; 60];
        let mut six = vec![600; 60];
        *huge.last_mut().unwrap() = 100 * 600;
        *six.last_mut().unwrap() = 6 * 600;
        assert_eq!(window_for(&huge), window_for(&six));

        let mut huge = vec![600; 60];
        let mut six = vec![600; 60];
        huge[40] = -100 * 600;
        six[40] = -6 * 600;
        assert_eq!(window_for(&huge), window_for(&six));
    }

    #[test]
    fn recent_solvetimes_weigh_more() {
        let base = vec![600; 60];
        let mut recent = base.clone();
        *recent.last_mut().unwrap() = 1200;
        let mut early = base.clone();
        early[15] = 1200; // first pair inside the 45-block window

        let t_base = window_for(&base).weighted_solvetime;
        let t_recent = window_for(&recent).weighted_solvetime;
        let t_early = window_for(&early).weighted_solvetime;
        assert!(t_recent > t_base);
        assert_eq!(t_recent - t_base, 600 * 45);
        assert_eq!(t_early - t_base, 600);
    }

    #[test]
    fn blocks_outside_window_are_ignored() {
        let base = vec![600; 60];
        let mut old = base.clone();
        old[3] = 5000;
        assert_eq!(window_for(&base), window_for(&old));
    }

    #[test]
    fn min_difficulty_gap_bypass() {
        let mut p = params();
        p.allow_min_difficulty = true;
        let chain = NullChain::steady(100, START, 1, BITS);
        let tip = chain.tip().unwrap();

        let r = retarget(&chain, &tip, tip.time + 1201, &p).unwrap();
        assert_eq!(r.rule, RetargetRule::MinDifficultyGap);
        assert_eq!(r.bits.to_consensus(), 0x1e7f_ffff);

        // Exactly two spacings is not a gap.
        let r = retarget(&chain, &tip, tip.time + 1200, &p).unwrap();
        assert_eq!(r.rule, RetargetRule::Lwma { floored: true });

        // Mainnet never bypasses.
        let r = retarget(&chain, &tip, tip.time + 100_000, &params()).unwrap();
        assert!(matches!(r.rule, RetargetRule::Lwma { .. }));
    }

    #[test]
    fn short_chain_uses_limit() {
        let chain = NullChain::steady(46, START, 600, BITS);
        let tip = chain.tip().unwrap();
        assert_eq!(tip.height, 45);
        let r = retarget(&chain, &tip, tip.time + 600, &params()).unwrap();
        assert_eq!(r.rule, RetargetRule::InsufficientHistory);
        assert_eq!(r.bits, params().pow_limit.to_compact());

        let chain = NullChain::steady(47, START, 600, BITS);
        let tip = chain.tip().unwrap();
        let r = retarget(&chain, &tip, tip.time + 600, &params()).unwrap();
        assert_eq!(r.rule, RetargetRule::Lwma { floored: false });
    }

    #[test]
    fn window_before_enough_history_is_misuse() {
        let chain = NullChain::steady(46, START, 600, BITS);
        let tip = chain.tip().unwrap();
        assert!(matches!(
            lwma_window(&chain, &tip, &params()),
            Err(WorkError::NoSuchAncestor { height: 0 })
        ));
    }

    #[test]
    fn gaps_in_the_index_surface_as_no_such_ancestor() {
        let chain = NullChain::steady(50, START, 600, BITS);
        let tip = BlockTimeSample::new(80, START + 80 * 600, BITS);
        assert!(matches!(
            lwma_window(&chain, &tip, &params()),
            Err(WorkError::NoSuchAncestor { height: 50 })
        ));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let chain = NullChain::steady(100, START, 600, BITS);
        let tip = chain.tip().unwrap();
        let mut p = params();
        p.averaging_window = 0;
        assert!(matches!(
            retarget(&chain, &tip, tip.time, &p),
            Err(WorkError::InvalidParams(_))
        ));
    }

    #[test]
    fn equihash_settings_do_not_affect_retargeting() {
        let chain = NullChain::steady(100, START, 600, BITS);
        let tip = chain.tip().unwrap();
        let mut p = params();
        p.equihash = EquihashParams::new(200, 8);
        p.personalization = "far too long".into();
        assert_eq!(
            retarget(&chain, &tip, tip.time + 600, &p).unwrap(),
            retarget(&chain, &tip, tip.time + 600, &params()).unwrap()
        );
        assert!(lwma_window(&chain, &tip, &p).is_ok());
    }

    #[test]
    fn result_is_not_clamped_to_limit() {
        let mut p = params();
        p.pow_limit = BITS.decode().target;
        let chain = NullChain::steady(100, START, 3600, BITS);
        let tip = chain.tip().unwrap();
        let bits = retarget(&chain, &tip, tip.time + 600, &p).unwrap().bits;
        assert!(bits.decode().target > p.pow_limit);
    }

    fn candidate(time: i64) -> BlockHeader {
        BlockHeader {
            version: 4,
            prev_block: Default::default(),
            merkle_root: Default::default(),
            time: time as u32,
            bits: BITS,
            nonce: [0u8; 32],
            solution: Vec::new(),
        }
    }
}
