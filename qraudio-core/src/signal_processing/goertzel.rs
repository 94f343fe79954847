//! Single-bin Goertzel tone-energy detector, no windowing.

pub fn energy(samples: &[f64], start: usize, length: usize, freq: f64, sample_rate: f64) -> f64 {
    let omega = (2.0 * std::f64::consts::PI * freq) / sample_rate;
    let coeff = 2.0 * omega.cos();
    let mut s1 = 0.0;
    let mut s2 = 0.0;
    let end = start + length;
    for &sample in &samples[start..end] {
        let s0 = sample + coeff * s1 - s2;
        s2 = s1;
        s1 = s0;
    }
    s1 * s1 + s2 * s2 - coeff * s1 * s2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_matching_tone_over_silence() {
        let sample_rate = 48_000.0;
        let freq = 1200.0;
        let n = 200;
        let tone: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate).sin())
            .collect();
        let silence = vec![0.0; n];
        let tone_energy = energy(&tone, 0, n, freq, sample_rate);
        let silence_energy = energy(&silence, 0, n, freq, sample_rate);
        assert!(tone_energy > silence_energy * 100.0);
    }

    #[test]
    fn off_tone_has_less_energy_than_matching_tone() {
        let sample_rate = 48_000.0;
        let n = 200;
        let tone: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 1200.0 * i as f64 / sample_rate).sin())
            .collect();
        let matching = energy(&tone, 0, n, 1200.0, sample_rate);
        let off = energy(&tone, 0, n, 2200.0, sample_rate);
        assert!(matching > off);
    }
}
