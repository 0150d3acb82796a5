#![no_main]

use libfuzzer_sys::fuzz_target;

use pow_types::{BlockHash, CompactTarget, ConsensusParams};

fuzz_target!(|data: &[u8]| {
    // Check an arbitrary hash against arbitrary bits.
    // Requires at least 36 bytes: 32 (hash) + 4 (bits).
    if data.len() >= 36 {
        let mut hash_bytes = [0u8; 32];
        hash_bytes.copy_from_slice(&data[..32]);
        let hash = BlockHash::new(hash_bytes);
        let bits = CompactTarget::from_consensus(u32::from_le_bytes([
            data[32], data[33], data[34], data[35],
        ]));

        for params in [ConsensusParams::mainnet(), ConsensusParams::regtest()] {
            // This must never panic regardless of input
            let accepted = pow_work::is_valid_proof_of_work(&hash, bits, &params);
            if accepted {
                let target = bits.decode().target;
                assert!(hash.to_target() <= target);
                assert!(target <= params.pow_limit);
            }
        }
    }
});
