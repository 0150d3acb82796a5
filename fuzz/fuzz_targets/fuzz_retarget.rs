#![no_main]

use libfuzzer_sys::fuzz_target;

use pow_nullables::NullChain;
use pow_types::{CompactTarget, ConsensusParams};

fuzz_target!(|data: &[u8]| {
    // Arbitrary solvetimes (i32 each) over a fixed starting target.
    let solvetimes: Vec<i64> = data
        .chunks_exact(4)
        .map(|c| i64::from(i32::from_le_bytes([c[0], c[1], c[2], c[3]])))
        .collect();
    let bits = CompactTarget::from_consensus(0x1d00_ffff);
    let chain = NullChain::from_solvetimes(1_600_000_000, bits, &solvetimes);
    let Some(tip) = chain.tip() else { return };

    for params in [ConsensusParams::mainnet(), ConsensusParams::testnet()] {
        // Never panics; errors only for a window that cannot be resolved.
        if let Ok(window) = pow_work::lwma_window(&chain, &tip, &params) {
            assert!(window.weighted_solvetime >= window.k / 10);
        }
        let _ = pow_work::retarget(&chain, &tip, tip.time + 600, &params);
    }
});
