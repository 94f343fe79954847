//! AFSK (audio frequency-shift keying): phase-continuous binary FSK with a
//! Goertzel-based demodulator.

use crate::envelope::apply_fade;
use crate::signal_processing::goertzel;

pub struct AfskModParams {
    pub sample_rate: f64,
    pub baud: f64,
    pub mark_freq: f64,
    pub space_freq: f64,
    pub level_db: f64,
    pub fade_ms: f64,
}

pub fn tones_to_samples(tones: &[u8], params: &AfskModParams) -> Vec<f64> {
    let samples_per_bit = params.sample_rate / params.baud;
    let total_samples = (tones.len() as f64 * samples_per_bit).ceil() as usize;
    let mut out = vec![0.0; total_samples];
    let amplitude = 10f64.powf(params.level_db / 20.0);

    let mut phase = 0.0;
    let mut sample_index = 0usize;
    let mut boundary = samples_per_bit;

    for &tone in tones {
        let freq = if tone == 1 { params.mark_freq } else { params.space_freq };
        let phase_step = (2.0 * std::f64::consts::PI * freq) / params.sample_rate;
        while (sample_index as f64) < boundary && sample_index < total_samples {
            phase += phase_step;
            if phase > std::f64::consts::PI * 2.0 {
                phase -= std::f64::consts::PI * 2.0;
            }
            out[sample_index] = phase.sin() * amplitude;
            sample_index += 1;
        }
        boundary += samples_per_bit;
    }

    apply_fade(&mut out, params.sample_rate, params.fade_ms);
    out
}

pub fn demod(samples: &[f64], sample_rate: f64, baud: f64, offset: usize, mark_freq: f64, space_freq: f64) -> Vec<u8> {
    let samples_per_bit = sample_rate / baud;
    let mut tones = Vec::new();

    let mut start = offset;
    let mut boundary = start as f64 + samples_per_bit;

    while boundary <= samples.len() as f64 {
        let end = boundary.floor() as usize;
        let length = end - start;
        if length <= 1 {
            start = end;
            boundary += samples_per_bit;
            continue;
        }
        let mark_energy = goertzel::energy(samples, start, length, mark_freq, sample_rate);
        let space_energy = goertzel::energy(samples, start, length, space_freq, sample_rate);
        tones.push(if mark_energy >= space_energy { 1 } else { 0 });
        start = end;
        boundary += samples_per_bit;
    }

    tones
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulate_then_demodulate_recovers_bits() {
        let params = AfskModParams {
            sample_rate: 48_000.0,
            baud: 1200.0,
            mark_freq: 1200.0,
            space_freq: 2200.0,
            level_db: -6.0,
            fade_ms: 0.0,
        };
        let bits = vec![1, 0, 1, 1, 0, 0, 1, 0, 1, 1];
        let samples = tones_to_samples(&bits, &params);
        let decoded = demod(&samples, params.sample_rate, params.baud, 0, params.mark_freq, params.space_freq);
        assert_eq!(decoded, bits);
    }

    #[test]
    fn skips_slices_of_length_one_or_less() {
        let decoded = demod(&[0.0, 0.0], 48_000.0, 48_000.0, 0, 1200.0, 2200.0);
        assert!(decoded.is_empty());
    }
}
