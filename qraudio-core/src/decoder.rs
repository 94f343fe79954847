//! Full decode pipeline: grid-search scan over profile x sample offset,
//! reversing [`crate::encoder::encode`].

use serde_json::Value;

use crate::config::{DecodeOptions, ScanOptions};
use crate::crc::crc16_x25;
use crate::errors::{FrameError, QrAudioError, Result};
use crate::frame::parse_frame;
use crate::gzip_codec;
use crate::hdlc::extract_frames;
use crate::json_codec;
use crate::logging::SignalLogger;
use crate::nrzi;
use crate::profile::{self, Profile, PROFILE_NAMES};
use crate::reed_solomon;
use crate::signal_processing::{afsk, mfsk};

#[derive(Debug, Clone)]
pub struct DecodeResult {
    pub json: Value,
    pub profile: Profile,
    pub start_sample: usize,
    pub end_sample: usize,
    pub confidence: f64,
}

pub type ScanResult = DecodeResult;

/// Returns the highest-confidence, earliest-starting frame found, or an
/// error if none passes the (stricter, 0.9) default confidence floor.
pub fn decode(samples: &[f64], options: &DecodeOptions) -> Result<DecodeResult> {
    decode_with_logger(samples, options, None)
}

/// Same search as [`decode`], additionally recording CRC-recovery-via-FEC
/// branch decisions to `logger` when one is supplied.
pub fn decode_with_logger(
    samples: &[f64],
    options: &DecodeOptions,
    logger: Option<&mut SignalLogger>,
) -> Result<DecodeResult> {
    let scan_options = ScanOptions {
        sample_rate: options.sample_rate,
        profile: options.profile,
        min_confidence: 0.9,
        gzip_decompress: options.gzip_decompress,
    };
    let mut results = scan_with_logger(samples, &scan_options, logger)?;
    if results.is_empty() {
        return Err(QrAudioError::Frame(FrameError::NoValidFrame));
    }
    Ok(results.remove(0))
}

/// Grid-searches every candidate profile (or just the one given) at
/// sub-symbol offsets, extracting and validating frames at each. Confidence
/// is always 1.0 for a structurally valid, CRC-clean frame — there is no
/// partial-credit scoring in this implementation.
pub fn scan(samples: &[f64], options: &ScanOptions) -> Result<Vec<ScanResult>> {
    scan_with_logger(samples, options, None)
}

/// Same search as [`scan`], additionally recording CRC-recovery-via-FEC
/// branch decisions to `logger` when one is supplied.
pub fn scan_with_logger(
    samples: &[f64],
    options: &ScanOptions,
    mut logger: Option<&mut SignalLogger>,
) -> Result<Vec<ScanResult>> {
    let resolved_sample_rate = options.sample_rate.unwrap_or(crate::config::DEFAULT_SAMPLE_RATE);
    let profiles: Vec<Profile> = match options.profile {
        Some(p) => vec![p],
        None => PROFILE_NAMES.to_vec(),
    };

    let mut results: Vec<ScanResult> = Vec::new();
    let mut seen_keys = std::collections::HashSet::new();

    for current_profile in profiles {
        let settings = profile::settings(current_profile);
        let baud = settings.baud;
        let samples_per_bit = resolved_sample_rate as f64 / baud;
        let bits_per_symbol = settings.bits_per_symbol.unwrap_or(1);
        let samples_per_symbol = samples_per_bit * bits_per_symbol as f64;
        let offset_step = ((samples_per_symbol / 8.0).round() as i64).max(1) as usize;

        let mut offset = 0usize;
        while (offset as f64) < samples_per_symbol {
            let data_bits = if settings.modulation == crate::profile::Modulation::Mfsk {
                mfsk::demod(
                    samples,
                    resolved_sample_rate as f64,
                    baud,
                    offset,
                    &settings
                        .tones
                        .clone()
                        .unwrap_or_else(|| vec![settings.mark_freq, settings.space_freq]),
                    bits_per_symbol,
                )
            } else {
                let tone_bits = afsk::demod(
                    samples,
                    resolved_sample_rate as f64,
                    baud,
                    offset,
                    settings.mark_freq,
                    settings.space_freq,
                );
                nrzi::decode(&tone_bits)
            };

            let frames = extract_frames(&data_bits);
            for frame in frames {
                let parsed = decode_frame(&frame.bytes, options.gzip_decompress, logger.as_deref_mut());
                let parsed = match parsed {
                    Some(p) if p.profile == current_profile => p,
                    _ => continue,
                };

                let start_sample = (offset as f64 + frame.start_bit as f64 * samples_per_bit).round() as usize;
                let end_sample = (offset as f64 + frame.end_bit as f64 * samples_per_bit).round() as usize;
                let confidence = 1.0;
                if confidence < options.min_confidence {
                    continue;
                }

                let key_bucket = (start_sample as f64 / (samples_per_bit / 2.0).max(1.0)).round() as i64;
                let key = (current_profile.as_str(), key_bucket);
                if !seen_keys.insert(key) {
                    continue;
                }

                results.push(ScanResult {
                    json: parsed.json,
                    profile: parsed.profile,
                    start_sample,
                    end_sample,
                    confidence,
                });
            }

            offset += offset_step;
        }
    }

    results.sort_by_key(|r| r.start_sample);
    Ok(results)
}

struct DecodedFrame {
    json: Value,
    profile: Profile,
}

/// Parses and validates a candidate frame's bytes. Tolerates a CRC mismatch
/// on the raw wire bytes when FEC is enabled and the RS-corrected payload
/// re-encodes to a frame whose CRC matches the one that was actually
/// transmitted — this recovers frames where RS fixed bit errors that also
/// happened to land in the CRC field itself.
fn decode_frame(
    data: &[u8],
    gzip_decompress: Option<fn(&[u8]) -> Result<Vec<u8>>>,
    mut logger: Option<&mut SignalLogger>,
) -> Option<DecodedFrame> {
    let parsed = parse_frame(data)?;
    let header = parsed.header;
    let mut crc_ok = parsed.crc_expected == parsed.crc_actual;

    let payload = if header.fec_enabled {
        let decoded = reed_solomon::decode(&parsed.payload_with_fec, header.payload_length).ok()?;
        if !crc_ok {
            let corrected_payload_with_fec = reed_solomon::encode(&decoded);
            let mut corrected_frame = parsed.raw[..8].to_vec();
            corrected_frame.extend_from_slice(&corrected_payload_with_fec);
            let corrected_crc = crc16_x25(&corrected_frame);
            crc_ok = corrected_crc == parsed.crc_expected;
            if crc_ok {
                if let Some(logger) = logger.as_deref_mut() {
                    logger.warn("CRC", "recovered via fec reencode, raw crc mismatched");
                }
            }
        }
        decoded
    } else {
        if !crc_ok {
            return None;
        }
        parsed.payload_with_fec
    };

    if !crc_ok {
        return None;
    }

    if payload.len() < header.payload_length {
        return None;
    }
    let mut payload = payload;
    payload.truncate(header.payload_length);

    if header.gzip_enabled {
        let decompress = gzip_decompress.unwrap_or(gzip_codec::decompress);
        payload = decompress(&payload).ok()?;
    }

    let json = json_codec::decode(&payload).ok()?;
    Some(DecodedFrame { json, profile: header.profile })
}
