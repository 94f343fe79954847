//! Gzip compress/decompress plus the "auto" savings-threshold policy used
//! by [`crate::encoder::encode`].

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::errors::{CodecError, QrAudioError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GzipMode {
    Off,
    Auto,
    On,
}

impl Default for GzipMode {
    fn default() -> Self {
        GzipMode::Auto
    }
}

pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("in-memory gzip write cannot fail");
    encoder.finish().expect("in-memory gzip finish cannot fail")
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| QrAudioError::Codec(CodecError::DecompressionFailed { reason: e.to_string() }))?;
    Ok(out)
}

/// Decides whether to use the gzip-compressed form of `json_bytes`, given
/// `mode` and the configured savings thresholds. Returns `(payload, used)`.
pub fn maybe_compress<'a>(
    json_bytes: &'a [u8],
    mode: GzipMode,
    compress_fn: impl Fn(&[u8]) -> Vec<u8>,
    min_savings_bytes: usize,
    min_savings_pct: f64,
) -> (Vec<u8>, bool) {
    if mode == GzipMode::Off {
        return (json_bytes.to_vec(), false);
    }

    let compressed = compress_fn(json_bytes);
    let savings_bytes = json_bytes.len().saturating_sub(compressed.len());
    let savings_pct = if json_bytes.is_empty() {
        0.0
    } else {
        savings_bytes as f64 / json_bytes.len() as f64
    };

    let should_use = match mode {
        GzipMode::On => true,
        GzipMode::Auto => savings_bytes >= min_savings_bytes || savings_pct >= min_savings_pct,
        GzipMode::Off => false,
    };

    if should_use {
        (compressed, true)
    } else {
        (json_bytes.to_vec(), false)
    }
}
