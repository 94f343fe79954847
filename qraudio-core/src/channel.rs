//! Channel impairment simulation for testing.
//!
//! Not part of the encode/decode pipeline itself — a reproducible AWGN
//! generator used to exercise the modems' noise tolerance.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

/// Adds Gaussian noise to `samples` scaled to hit the requested SNR, using a
/// seeded RNG for reproducibility.
pub fn apply_awgn(samples: &[f64], snr_db: f64, seed: u64) -> Vec<f64> {
    let signal_power = if samples.is_empty() {
        0.0
    } else {
        samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64
    };
    let snr_linear = 10f64.powf(snr_db / 10.0);
    let noise_power = if snr_linear > 0.0 { signal_power / snr_linear } else { 0.0 };
    let noise_std = noise_power.sqrt();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    samples
        .iter()
        .map(|&s| {
            let noise: f64 = StandardNormal.sample(&mut rng);
            s + noise * noise_std
        })
        .collect()
}
