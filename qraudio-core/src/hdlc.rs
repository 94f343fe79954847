//! HDLC-style bitstream framing: LSB-first bit packing, bit-stuffing, and
//! flag-byte (`0x7E`) synchronisation.

use crate::utils::{bits_to_bytes_lsb, bytes_to_bits_lsb};

const FLAG_BITS: [u8; 8] = [0, 1, 1, 1, 1, 1, 1, 0];

#[derive(Debug, Clone)]
pub struct BitFrame {
    pub bytes: Vec<u8>,
    pub start_bit: usize,
    pub end_bit: usize,
}

/// Prepends `ceil(preamble_ms/1000 * baud / 8)` (at least one) extra flag
/// copies plus one opening flag, bit-stuffs the frame payload, and appends
/// one closing flag.
pub fn build_bitstream(frame_bytes: &[u8], preamble_ms: f64, baud: f64) -> Vec<u8> {
    let bits = bytes_to_bits_lsb(frame_bytes);
    let stuffed = bit_stuff(&bits);

    let preamble_flags = (((preamble_ms / 1000.0) * baud / 8.0).round() as i64).max(1) as usize;
    let mut out = Vec::with_capacity((preamble_flags + 2) * 8 + stuffed.len());
    for _ in 0..preamble_flags {
        out.extend_from_slice(&FLAG_BITS);
    }
    out.extend_from_slice(&FLAG_BITS);
    out.extend_from_slice(&stuffed);
    out.extend_from_slice(&FLAG_BITS);
    out
}

/// Scans for all non-overlapping flag positions, treats each consecutive
/// pair as a candidate frame, destuffs, and packs LSB-first. Candidates
/// with fewer than 16 raw bits or fewer than 10 resulting bytes are
/// dropped.
pub fn extract_frames(bits: &[u8]) -> Vec<BitFrame> {
    let flags = find_flag_indices(bits);
    if flags.len() < 2 {
        return Vec::new();
    }

    let mut frames = Vec::new();
    for i in 0..flags.len() - 1 {
        let start = flags[i] + 8;
        let end = flags[i + 1];
        if end <= start {
            continue;
        }
        let raw_bits = &bits[start..end];
        if raw_bits.len() < 16 {
            continue;
        }
        let data_bits = bit_destuff(raw_bits);
        let data_bytes = bits_to_bytes_lsb(&data_bits);
        if data_bytes.len() < 4 + 1 + 1 + 2 + 2 {
            continue;
        }
        frames.push(BitFrame { bytes: data_bytes, start_bit: start, end_bit: end });
    }
    frames
}

fn bit_stuff(bits: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bits.len() + bits.len() / 5 + 1);
    let mut ones = 0u32;
    for &bit in bits {
        out.push(bit);
        if bit == 1 {
            ones += 1;
            if ones == 5 {
                out.push(0);
                ones = 0;
            }
        } else {
            ones = 0;
        }
    }
    out
}

fn bit_destuff(bits: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bits.len());
    let mut ones = 0u32;
    for &bit in bits {
        if bit == 1 {
            ones += 1;
            out.push(bit);
        } else {
            if ones == 5 {
                ones = 0;
                continue;
            }
            ones = 0;
            out.push(bit);
        }
    }
    out
}

fn find_flag_indices(bits: &[u8]) -> Vec<usize> {
    let mut indices = Vec::new();
    if bits.len() < 8 {
        return indices;
    }
    let limit = bits.len() - 8;
    let mut i = 0;
    while i <= limit {
        if bits[i..i + 8] == FLAG_BITS {
            indices.push(i);
            i += 8;
        } else {
            i += 1;
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stuff_then_destuff_is_identity() {
        let bits = vec![1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 0];
        let stuffed = bit_stuff(&bits);
        assert_eq!(bit_destuff(&stuffed), bits);
    }

    #[test]
    fn build_then_extract_roundtrips() {
        let frame_bytes = vec![0x51, 0x52, 0x41, 0x31, 0x01, 0x00, 0x00, 0x05, b'h', b'e', b'l', b'l', b'o', 0xAA, 0xBB];
        let bits = build_bitstream(&frame_bytes, 10.0, 1200.0);
        let frames = extract_frames(&bits);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].bytes, frame_bytes);
    }

    #[test]
    fn stuffs_after_five_consecutive_ones() {
        let bits = vec![1, 1, 1, 1, 1];
        let stuffed = bit_stuff(&bits);
        assert_eq!(stuffed, vec![1, 1, 1, 1, 1, 0]);
    }
}
