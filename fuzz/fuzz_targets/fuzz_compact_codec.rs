#![no_main]

use libfuzzer_sys::fuzz_target;

use pow_types::{CompactTarget, Target};

fuzz_target!(|data: &[u8]| {
    // 1. Decoding any 32-bit value must not panic.
    if data.len() >= 4 {
        let raw = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let bits = CompactTarget::from_consensus(raw);
        let decoded = bits.decode();

        // Usable targets survive a re-encode unchanged in value.
        if let Some(target) = bits.to_target() {
            assert_eq!(target.to_compact().decode().target, target);
        }
        // Encoding never sets the sign bit.
        assert_eq!(decoded.target.to_compact().to_consensus() & 0x0080_0000, 0);
    }

    // 2. Encoding an arbitrary 256-bit value rounds down and is idempotent.
    if data.len() >= 36 {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&data[4..36]);
        let target = Target::from_be_bytes(bytes);
        let bits = target.to_compact();
        let rounded = bits.decode();
        assert!(!rounded.negative);
        assert!(rounded.target <= target);
        assert_eq!(rounded.target.to_compact(), bits);
    }
});
