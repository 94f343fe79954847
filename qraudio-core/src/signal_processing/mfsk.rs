//! 4-ary MFSK: packs `bits_per_symbol` bits LSB-first per symbol and
//! transmits one of `2^bits_per_symbol` tones; demodulation picks the
//! best-energy tone via Goertzel at every candidate frequency.

use crate::envelope::apply_fade;
use crate::signal_processing::goertzel;

pub struct MfskModParams {
    pub sample_rate: f64,
    pub baud: f64,
    pub tones: Vec<f64>,
    pub bits_per_symbol: u32,
    pub level_db: f64,
    pub fade_ms: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum MfskError {
    #[error("bits_per_symbol must be >= 1")]
    ZeroBitsPerSymbol,
    #[error("MFSK requires {required} tones (got {available})")]
    NotEnoughTones { required: usize, available: usize },
}

pub fn bits_to_samples(bits: &[u8], params: &MfskModParams) -> Result<Vec<f64>, MfskError> {
    if params.bits_per_symbol == 0 {
        return Err(MfskError::ZeroBitsPerSymbol);
    }
    let required_tones = 1usize << params.bits_per_symbol;
    if params.tones.len() < required_tones {
        return Err(MfskError::NotEnoughTones { required: required_tones, available: params.tones.len() });
    }

    let bps = params.bits_per_symbol as usize;
    let symbol_count = ((bits.len() as f64 / bps as f64).ceil() as usize).max(1);
    let samples_per_bit = params.sample_rate / params.baud;
    let samples_per_symbol = samples_per_bit * bps as f64;
    let total_samples = (symbol_count as f64 * samples_per_symbol).ceil() as usize;
    let mut out = vec![0.0; total_samples];
    let amplitude = 10f64.powf(params.level_db / 20.0);

    let mut phase = 0.0;
    let mut sample_index = 0usize;
    let mut boundary = samples_per_symbol;
    let symbol_mask = (1u32 << params.bits_per_symbol) - 1;

    for symbol_index in 0..symbol_count {
        let bit_offset = symbol_index * bps;
        let mut symbol: u32 = 0;
        for i in 0..bps {
            let bit = bits.get(bit_offset + i).copied().unwrap_or(0);
            symbol |= ((bit & 1) as u32) << i;
        }
        symbol &= symbol_mask;
        let freq = params.tones.get(symbol as usize).copied().unwrap_or(params.tones[0]);
        let phase_step = (2.0 * std::f64::consts::PI * freq) / params.sample_rate;

        while (sample_index as f64) < boundary && sample_index < total_samples {
            phase += phase_step;
            if phase > std::f64::consts::PI * 2.0 {
                phase -= std::f64::consts::PI * 2.0;
            }
            out[sample_index] = phase.sin() * amplitude;
            sample_index += 1;
        }
        boundary += samples_per_symbol;
    }

    if params.fade_ms > 0.0 {
        let fade_samples = ((params.fade_ms / 1000.0) * params.sample_rate).round() as i64;
        if fade_samples > 0 {
            let mut padded = out;
            padded.extend(std::iter::repeat(0.0).take(fade_samples as usize));
            apply_fade(&mut padded, params.sample_rate, params.fade_ms);
            return Ok(padded);
        }
    }

    // Mirrors the original control flow: a no-op fade pass runs even on the
    // branch above, since fade_samples recomputed here is the same value.
    apply_fade(&mut out, params.sample_rate, params.fade_ms);
    Ok(out)
}

pub fn demod(samples: &[f64], sample_rate: f64, baud: f64, offset: usize, tones: &[f64], bits_per_symbol: u32) -> Vec<u8> {
    if bits_per_symbol == 0 {
        return Vec::new();
    }
    let required_tones = 1usize << bits_per_symbol;
    if tones.len() < required_tones {
        return Vec::new();
    }

    let samples_per_bit = sample_rate / baud;
    let samples_per_symbol = samples_per_bit * bits_per_symbol as f64;
    let mut bits = Vec::new();

    let mut start = offset;
    let mut boundary = start as f64 + samples_per_symbol;

    while boundary <= samples.len() as f64 {
        let end = boundary.floor() as usize;
        let length = end - start;
        if length <= 1 {
            start = end;
            boundary += samples_per_symbol;
            continue;
        }

        let mut best_index = 0usize;
        let mut best_energy = -1.0;
        for idx in 0..required_tones {
            let energy = goertzel::energy(samples, start, length, tones[idx], sample_rate);
            if energy > best_energy {
                best_energy = energy;
                best_index = idx;
            }
        }

        for bit in 0..bits_per_symbol {
            bits.push(((best_index >> bit) & 1) as u8);
        }

        start = end;
        boundary += samples_per_symbol;
    }

    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> MfskModParams {
        MfskModParams {
            sample_rate: 48_000.0,
            baud: 600.0,
            tones: vec![600.0, 900.0, 1200.0, 1500.0],
            bits_per_symbol: 2,
            level_db: -6.0,
            fade_ms: 0.0,
        }
    }

    #[test]
    fn modulate_then_demodulate_recovers_bits() {
        let p = params();
        let bits = vec![1, 0, 0, 1, 1, 1, 0, 0];
        let samples = bits_to_samples(&bits, &p).unwrap();
        let decoded = demod(&samples, p.sample_rate, p.baud, 0, &p.tones, p.bits_per_symbol);
        assert_eq!(decoded, bits);
    }

    #[test]
    fn samples_per_symbol_matches_formula() {
        let p = params();
        let bits = vec![1, 0];
        let samples = bits_to_samples(&bits, &p).unwrap();
        let expected = (p.sample_rate / p.baud) * p.bits_per_symbol as f64;
        assert_eq!(samples.len(), expected.ceil() as usize);
    }

    #[test]
    fn rejects_insufficient_tones() {
        let mut p = params();
        p.tones = vec![600.0, 900.0];
        assert!(bits_to_samples(&[1, 0], &p).is_err());
    }

    #[test]
    fn zero_padding_incomplete_final_symbol() {
        let p = params();
        let bits = vec![1];
        let samples = bits_to_samples(&bits, &p).unwrap();
        let decoded = demod(&samples, p.sample_rate, p.baud, 0, &p.tones, p.bits_per_symbol);
        assert_eq!(decoded[0], 1);
        assert_eq!(decoded[1], 0);
    }
}
