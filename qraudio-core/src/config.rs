//! Option types for the encode/decode/scan entry points.

use crate::gzip_codec::GzipMode;
use crate::profile::{Profile, DEFAULT_PROFILE};

pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;
pub const DEFAULT_LEVEL_DB: f64 = -6.0;
const DEFAULT_GZIP_MIN_SAVINGS_BYTES: usize = 8;
const DEFAULT_GZIP_MIN_SAVINGS_PCT: f64 = 0.08;

#[derive(Clone)]
pub struct EncodeOptions {
    pub sample_rate: Option<u32>,
    pub profile: Option<Profile>,
    pub fec: bool,
    pub gzip: GzipMode,
    pub gzip_compress: Option<fn(&[u8]) -> Vec<u8>>,
    pub gzip_min_savings_bytes: usize,
    pub gzip_min_savings_pct: f64,
    pub preamble_ms: Option<f64>,
    pub fade_ms: Option<f64>,
    pub level_db: Option<f64>,
    pub lead_in: Option<bool>,
    pub lead_in_tone_ms: Option<f64>,
    pub lead_in_gap_ms: Option<f64>,
    pub tail_out: Option<bool>,
    pub tail_tone_ms: Option<f64>,
    pub tail_gap_ms: Option<f64>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            sample_rate: None,
            profile: None,
            fec: true,
            gzip: GzipMode::Auto,
            gzip_compress: None,
            gzip_min_savings_bytes: DEFAULT_GZIP_MIN_SAVINGS_BYTES,
            gzip_min_savings_pct: DEFAULT_GZIP_MIN_SAVINGS_PCT,
            preamble_ms: None,
            fade_ms: None,
            level_db: None,
            lead_in: None,
            lead_in_tone_ms: None,
            lead_in_gap_ms: None,
            tail_out: None,
            tail_tone_ms: None,
            tail_gap_ms: None,
        }
    }
}

impl EncodeOptions {
    pub fn resolved_profile(&self) -> Profile {
        self.profile.unwrap_or(DEFAULT_PROFILE)
    }

    pub fn resolved_sample_rate(&self) -> u32 {
        self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    pub fn resolved_level_db(&self) -> f64 {
        self.level_db.unwrap_or(DEFAULT_LEVEL_DB)
    }
}

#[derive(Clone, Default)]
pub struct DecodeOptions {
    pub sample_rate: Option<u32>,
    pub profile: Option<Profile>,
    pub gzip_decompress: Option<fn(&[u8]) -> crate::errors::Result<Vec<u8>>>,
}

#[derive(Clone)]
pub struct ScanOptions {
    pub sample_rate: Option<u32>,
    pub profile: Option<Profile>,
    pub min_confidence: f64,
    pub gzip_decompress: Option<fn(&[u8]) -> crate::errors::Result<Vec<u8>>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            sample_rate: None,
            profile: None,
            min_confidence: 0.8,
            gzip_decompress: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_options_default_to_afsk_bell_and_48k() {
        let opts = EncodeOptions::default();
        assert_eq!(opts.resolved_profile(), DEFAULT_PROFILE);
        assert_eq!(opts.resolved_sample_rate(), DEFAULT_SAMPLE_RATE);
        assert_eq!(opts.resolved_level_db(), DEFAULT_LEVEL_DB);
    }

    #[test]
    fn scan_options_default_min_confidence_is_point_eight() {
        assert_eq!(ScanOptions::default().min_confidence, 0.8);
    }
}
