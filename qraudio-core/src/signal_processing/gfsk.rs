//! GFSK (Gaussian-filtered FSK): bipolar NRZ shaped by a Gaussian FIR, then
//! FM-integrated. Demodulation reuses the AFSK Goertzel detector since the
//! underlying tone-presence detection is identical.

use crate::envelope::apply_fade;

pub struct GfskModParams {
    pub sample_rate: f64,
    pub baud: f64,
    pub mark_freq: f64,
    pub space_freq: f64,
    pub level_db: f64,
    pub fade_ms: f64,
    pub bt: Option<f64>,
    pub span_symbols: Option<u32>,
}

/// When `fade_ms > 0` and the resulting fade length is nonzero, `fade_samples`
/// of silence are appended
/// *before* the symmetric fade is applied, making the output longer than
/// `ceil(len(tones) * samples_per_bit)`. When `fade_ms <= 0` (or the fade
/// rounds to zero samples) the output is returned unfaded at nominal length.
pub fn tones_to_samples(tones: &[u8], params: &GfskModParams) -> Vec<f64> {
    let samples_per_bit = params.sample_rate / params.baud;
    let total_samples = (tones.len() as f64 * samples_per_bit).ceil() as usize;

    let mut nrz = vec![0.0; total_samples];
    let mut sample_index = 0usize;
    let mut boundary = samples_per_bit;
    for &bit in tones {
        let level = if bit == 1 { 1.0 } else { -1.0 };
        while (sample_index as f64) < boundary && sample_index < total_samples {
            nrz[sample_index] = level;
            sample_index += 1;
        }
        boundary += samples_per_bit;
    }

    let shaped = gaussian_filter(
        &nrz,
        samples_per_bit,
        params.bt.unwrap_or(1.0),
        params.span_symbols.unwrap_or(4),
    );

    let amplitude = 10f64.powf(params.level_db / 20.0);
    let center_freq = (params.mark_freq + params.space_freq) / 2.0;
    let deviation = (params.mark_freq - params.space_freq) / 2.0;

    let mut out = vec![0.0; total_samples];
    let mut phase = 0.0;
    for i in 0..total_samples {
        let freq = center_freq + deviation * shaped[i];
        phase += (2.0 * std::f64::consts::PI * freq) / params.sample_rate;
        if phase > std::f64::consts::PI * 2.0 {
            phase -= std::f64::consts::PI * 2.0;
        }
        out[i] = phase.sin() * amplitude;
    }

    if params.fade_ms > 0.0 {
        let fade_samples = ((params.fade_ms / 1000.0) * params.sample_rate).round() as i64;
        if fade_samples > 0 {
            let mut padded = out;
            padded.extend(std::iter::repeat(0.0).take(fade_samples as usize));
            apply_fade(&mut padded, params.sample_rate, params.fade_ms);
            return padded;
        }
    }

    out
}

fn gaussian_filter(samples: &[f64], samples_per_bit: f64, bt: f64, span_symbols: u32) -> Vec<f64> {
    if bt <= 0.0 {
        return samples.to_vec();
    }
    let sigma = (samples_per_bit * 2f64.ln().sqrt()) / (2.0 * std::f64::consts::PI * bt);
    let kernel_length = ((span_symbols as f64 * samples_per_bit).round() as i64).max(3) as usize;
    let size = if kernel_length % 2 == 0 { kernel_length + 1 } else { kernel_length };
    let half = size / 2;
    let mut kernel = vec![0.0; size];
    let mut total = 0.0;
    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f64 - half as f64;
        let value = (-0.5 * (x / sigma).powi(2)).exp();
        *k = value;
        total += value;
    }
    for k in kernel.iter_mut() {
        *k /= total;
    }

    let mut out = vec![0.0; samples.len()];
    for i in 0..samples.len() {
        let mut acc = 0.0;
        for (k, &coeff) in kernel.iter().enumerate() {
            let raw = i as i64 + k as i64 - half as i64;
            let idx = raw.clamp(0, samples.len() as i64 - 1) as usize;
            acc += samples[idx] * coeff;
        }
        out[i] = acc;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_length_when_fade_disabled() {
        let params = GfskModParams {
            sample_rate: 48_000.0,
            baud: 1200.0,
            mark_freq: 880.0,
            space_freq: 1320.0,
            level_db: -6.0,
            fade_ms: 0.0,
            bt: Some(1.0),
            span_symbols: Some(4),
        };
        let tones = vec![1, 0, 1, 1, 0];
        let samples = tones_to_samples(&tones, &params);
        let expected = (tones.len() as f64 * (params.sample_rate / params.baud)).ceil() as usize;
        assert_eq!(samples.len(), expected);
    }

    #[test]
    fn longer_than_nominal_when_fade_enabled() {
        let params = GfskModParams {
            sample_rate: 48_000.0,
            baud: 1200.0,
            mark_freq: 880.0,
            space_freq: 1320.0,
            level_db: -6.0,
            fade_ms: 20.0,
            bt: Some(1.0),
            span_symbols: Some(4),
        };
        let tones = vec![1, 0, 1, 1, 0];
        let samples = tones_to_samples(&tones, &params);
        let nominal = (tones.len() as f64 * (params.sample_rate / params.baud)).ceil() as usize;
        assert!(samples.len() > nominal);
    }

    #[test]
    fn gaussian_kernel_is_normalized_and_smooths() {
        let samples = vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let shaped = gaussian_filter(&samples, 4.0, 1.0, 4);
        let max = shaped.iter().cloned().fold(0.0f64, |a, b| a.max(b.abs()));
        assert!(max <= 1.0 + 1e-9);
    }
}
