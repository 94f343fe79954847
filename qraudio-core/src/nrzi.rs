//! NRZI (non-return-to-zero inverted) differential line coding.
//!
//! Skipped for the MFSK profile (see [`crate::encoder`]/[`crate::decoder`]).

/// `bit == 0` toggles the output level; `bit == 1` holds it. Initial level
/// is 1.
pub fn encode(bits: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bits.len());
    let mut level: u8 = 1;
    for &bit in bits {
        if bit == 0 {
            level ^= 1;
        }
        out.push(level);
    }
    out
}

/// Outputs 1 when the current tone equals the previous one. The very first
/// output compares `tones[0]` to itself and is therefore always 1 — this is
/// an intentional quirk compensated for by the HDLC preamble and must not
/// be "fixed" independently of it.
pub fn decode(tones: &[u8]) -> Vec<u8> {
    if tones.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(tones.len());
    let mut prev = tones[0];
    for &tone in tones {
        out.push(if tone == prev { 1 } else { 0 });
        prev = tone;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_output_is_always_one() {
        assert_eq!(decode(&[0])[0], 1);
        assert_eq!(decode(&[1])[0], 1);
    }

    #[test]
    fn encode_then_decode_recovers_original_after_first_bit() {
        let bits = vec![1, 0, 1, 1, 0, 0, 1];
        let tones = encode(&bits);
        let decoded = decode(&tones);
        assert_eq!(decoded.len(), bits.len());
        assert_eq!(decoded[1..], bits[1..]);
    }

    #[test]
    fn empty_input_decodes_to_empty() {
        assert!(decode(&[]).is_empty());
    }
}
