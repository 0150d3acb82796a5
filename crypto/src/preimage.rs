//! Byte-exact header serialization.
//!
//! The Equihash input is a consensus rule: it must be byte-identical between
//! the miner and every verifier. Any change to field order, field set or
//! width invalidates every historical solution, so a header format change
//! needs a new, versioned serializer rather than an edit here.

use pow_types::{BlockHeader, NONCE_SIZE};

/// Length of the Equihash input (header without nonce and solution).
pub const EQUIHASH_INPUT_SIZE: usize = 4 + 32 + 32 + 4 + 4;

/// Length of the full proof preimage (input followed by the nonce).
pub const PROOF_PREIMAGE_SIZE: usize = EQUIHASH_INPUT_SIZE + NONCE_SIZE;

/// The header fields covered by the Equihash solution, nonce excluded.
pub fn equihash_input(header: &BlockHeader) -> Vec<u8> {
    let mut out = Vec::with_capacity(PROOF_PREIMAGE_SIZE);
    write_equihash_input(header, &mut out);
    out
}

/// The Equihash input followed by the nonce; the solution is never included.
pub fn proof_preimage(header: &BlockHeader) -> Vec<u8> {
    let mut out = Vec::with_capacity(PROOF_PREIMAGE_SIZE);
    write_equihash_input(header, &mut out);
    out.extend_from_slice(&header.nonce);
    out
}

/// Full header serialization: proof preimage, then the length-prefixed solution.
pub fn serialize_header(header: &BlockHeader) -> Vec<u8> {
    let mut out = Vec::with_capacity(PROOF_PREIMAGE_SIZE + 3 + header.solution.len());
    write_equihash_input(header, &mut out);
    out.extend_from_slice(&header.nonce);
    write_compact_size(header.solution.len() as u64, &mut out);
    out.extend_from_slice(&header.solution);
    out
}

fn write_equihash_input(header: &BlockHeader, out: &mut Vec<u8>) {
    out.extend_from_slice(&header.version.to_le_bytes());
    out.extend_from_slice(header.prev_block.as_bytes());
    out.extend_from_slice(header.merkle_root.as_bytes());
    out.extend_from_slice(&header.time.to_le_bytes());
    out.extend_from_slice(&header.bits.to_consensus().to_le_bytes());
}

/// Variable-length integer prefix used for byte vectors on the wire.
pub fn write_compact_size(n: u64, out: &mut Vec<u8>) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}
