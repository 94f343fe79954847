//! Full encode pipeline: JSON -> optional gzip -> optional Reed-Solomon ->
//! frame -> HDLC bitstream -> NRZI (skipped for MFSK) -> modulate -> optional
//! lead-in/tail-out chimes.

use serde_json::Value;

use crate::config::EncodeOptions;
use crate::envelope;
use crate::errors::Result;
use crate::frame::{build_frame, FLAG_FEC, FLAG_GZIP};
use crate::gzip_codec::{self, GzipMode};
use crate::hdlc::build_bitstream;
use crate::json_codec;
use crate::logging::SignalLogger;
use crate::nrzi;
use crate::profile::{self, Modulation, Profile};
use crate::reed_solomon;
use crate::signal_processing::{afsk, gfsk, mfsk, tone};

#[derive(Debug, Clone)]
pub struct EncodeResult {
    pub sample_rate: u32,
    pub profile: Profile,
    pub samples: Vec<f64>,
    pub duration_ms: f64,
    pub payload_bytes: usize,
}

pub fn encode(payload: &Value, options: &EncodeOptions) -> Result<EncodeResult> {
    encode_with_logger(payload, options, None)
}

/// Same pipeline as [`encode`], additionally recording gzip-accept/reject and
/// FEC-applied branch decisions to `logger` when one is supplied.
pub fn encode_with_logger(
    payload: &Value,
    options: &EncodeOptions,
    mut logger: Option<&mut SignalLogger>,
) -> Result<EncodeResult> {
    let resolved_sample_rate = options.resolved_sample_rate();
    let resolved_profile = options.resolved_profile();
    let settings = profile::settings(resolved_profile);

    let json_bytes = json_codec::encode(payload);
    let compress_fn = options.gzip_compress.unwrap_or(gzip_codec::compress);

    let (encoded_payload, used_gzip) = match options.gzip {
        GzipMode::Off => (json_bytes.clone(), false),
        mode => gzip_codec::maybe_compress(
            &json_bytes,
            mode,
            compress_fn,
            options.gzip_min_savings_bytes,
            options.gzip_min_savings_pct,
        ),
    };
    if let Some(logger) = logger.as_deref_mut() {
        if used_gzip {
            logger.info("GZIP", format!("accepted, {} -> {} bytes", json_bytes.len(), encoded_payload.len()));
        } else if options.gzip != GzipMode::Off {
            logger.debug("GZIP", "rejected, savings below threshold");
        }
    }

    let payload_with_fec =
        if options.fec { reed_solomon::encode(&encoded_payload) } else { encoded_payload.clone() };
    if let Some(logger) = logger.as_deref_mut() {
        if options.fec {
            logger.info("FEC", format!("applied, {} -> {} bytes", encoded_payload.len(), payload_with_fec.len()));
        }
    }

    let flags = (if used_gzip { FLAG_GZIP } else { 0 })
        | (if options.fec { FLAG_FEC } else { 0 })
        | profile::profile_flag(resolved_profile);

    let frame = build_frame(&payload_with_fec, encoded_payload.len(), flags);

    let resolved_preamble_ms = options.preamble_ms.unwrap_or(settings.preamble_ms);
    let resolved_fade_ms = options.fade_ms.unwrap_or(settings.fade_ms);
    let bitstream = build_bitstream(&frame, resolved_preamble_ms, settings.baud);
    let encoded_bits =
        if settings.modulation == Modulation::Mfsk { bitstream } else { nrzi::encode(&bitstream) };

    let level_db = options.resolved_level_db();

    let mut samples = match settings.modulation {
        Modulation::Gfsk => gfsk::tones_to_samples(
            &encoded_bits,
            &gfsk::GfskModParams {
                sample_rate: resolved_sample_rate as f64,
                baud: settings.baud,
                mark_freq: settings.mark_freq,
                space_freq: settings.space_freq,
                level_db,
                fade_ms: resolved_fade_ms,
                bt: settings.bt,
                span_symbols: settings.span_symbols,
            },
        ),
        Modulation::Mfsk => mfsk::bits_to_samples(
            &encoded_bits,
            &mfsk::MfskModParams {
                sample_rate: resolved_sample_rate as f64,
                baud: settings.baud,
                tones: settings
                    .tones
                    .clone()
                    .unwrap_or_else(|| vec![settings.mark_freq, settings.space_freq]),
                bits_per_symbol: settings.bits_per_symbol.unwrap_or(1),
                level_db,
                fade_ms: resolved_fade_ms,
            },
        )
        .map_err(|e| {
            crate::errors::QrAudioError::Frame(crate::errors::FrameError::InvalidInput {
                reason: e.to_string(),
            })
        })?,
        Modulation::Afsk => afsk::tones_to_samples(
            &encoded_bits,
            &afsk::AfskModParams {
                sample_rate: resolved_sample_rate as f64,
                baud: settings.baud,
                mark_freq: settings.mark_freq,
                space_freq: settings.space_freq,
                level_db,
                fade_ms: resolved_fade_ms,
            },
        ),
    };

    let lead_in_enabled =
        options.lead_in.unwrap_or(settings.lead_in_tone_ms > 0.0 || settings.lead_in_gap_ms > 0.0);
    if lead_in_enabled {
        let lead_tone_ms = options.lead_in_tone_ms.unwrap_or(settings.lead_in_tone_ms);
        let lead_gap_ms = options.lead_in_gap_ms.unwrap_or(settings.lead_in_gap_ms);
        if lead_tone_ms > 0.0 {
            let chime = build_chime(
                resolved_sample_rate as f64,
                level_db,
                resolved_fade_ms,
                lead_tone_ms,
                lead_gap_ms,
                settings.mark_freq,
                settings.space_freq,
            );
            samples = concat_samples(&[chime, samples]);
        }
    }

    let tail_out_enabled =
        options.tail_out.unwrap_or(settings.tail_tone_ms > 0.0 || settings.tail_gap_ms > 0.0);
    if tail_out_enabled {
        let tail_tone_ms = options.tail_tone_ms.unwrap_or(settings.tail_tone_ms);
        let tail_gap_ms = options.tail_gap_ms.unwrap_or(settings.tail_gap_ms);
        if tail_tone_ms > 0.0 {
            let chime = build_chime(
                resolved_sample_rate as f64,
                level_db,
                resolved_fade_ms,
                tail_tone_ms,
                tail_gap_ms,
                settings.space_freq,
                settings.mark_freq,
            );
            samples = concat_samples(&[samples, chime]);
        }
    }

    let duration_ms = (samples.len() as f64 / resolved_sample_rate as f64) * 1000.0;

    Ok(EncodeResult {
        sample_rate: resolved_sample_rate,
        profile: resolved_profile,
        samples,
        duration_ms,
        payload_bytes: encoded_payload.len(),
    })
}

#[allow(clippy::too_many_arguments)]
fn build_chime(
    sample_rate: f64,
    level_db: f64,
    fade_ms: f64,
    tone_ms: f64,
    gap_ms: f64,
    first_freq: f64,
    second_freq: f64,
) -> Vec<f64> {
    let first = tone::tone_to_samples(first_freq, sample_rate, tone_ms, level_db, fade_ms);
    let gap_samples = if gap_ms > 0.0 {
        vec![0.0; (((gap_ms / 1000.0) * sample_rate).round() as i64).max(1) as usize]
    } else {
        Vec::new()
    };
    let second = tone::tone_to_samples(second_freq, sample_rate, tone_ms, level_db, fade_ms);
    concat_samples(&[first, gap_samples, second])
}

fn concat_samples(chunks: &[Vec<f64>]) -> Vec<f64> {
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend_from_slice(chunk);
    }
    out
}
