//! RIFF/WAVE container read/write: PCM16 and IEEE-float32, mono or
//! multi-channel (channels are averaged down to mono on decode).

use crate::config::{DecodeOptions, EncodeOptions, ScanOptions};
use crate::decoder::{self, DecodeResult, ScanResult};
use crate::encoder::{self, EncodeResult};
use crate::errors::{QrAudioError, Result, WavError};
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    Pcm16,
    Float32,
}

#[derive(Debug, Clone)]
pub struct WavData {
    pub sample_rate: u32,
    pub channels: u16,
    pub format: WavFormat,
    pub samples: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct EncodeWavResult {
    pub sample_rate: u32,
    pub profile: Profile,
    pub samples: Vec<f64>,
    pub duration_ms: f64,
    pub payload_bytes: usize,
    pub wav: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct PrependWavResult {
    pub wav: Vec<u8>,
    pub payload: EncodeResult,
    pub sample_rate: u32,
}

fn clamp(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

fn seconds_to_samples(sample_rate: u32, seconds: f64) -> usize {
    ((seconds * sample_rate as f64).round() as i64).max(1) as usize
}

/// Packs mono samples into a 44-byte-header WAV buffer.
pub fn encode_wav_samples(samples: &[f64], sample_rate: u32, format: WavFormat) -> Vec<u8> {
    let bits_per_sample: u16 = if format == WavFormat::Float32 { 32 } else { 16 };
    let bytes_per_sample = (bits_per_sample / 8) as u32;
    let block_align = bytes_per_sample as u16;
    let byte_rate = sample_rate * bytes_per_sample;
    let data_size = samples.len() as u32 * bytes_per_sample;
    let header_size = 44u32;

    let mut buffer = vec![0u8; (header_size + data_size) as usize];
    buffer[0..4].copy_from_slice(b"RIFF");
    buffer[4..8].copy_from_slice(&(36 + data_size).to_le_bytes());
    buffer[8..12].copy_from_slice(b"WAVE");

    buffer[12..16].copy_from_slice(b"fmt ");
    buffer[16..20].copy_from_slice(&16u32.to_le_bytes());
    let format_tag: u16 = if format == WavFormat::Float32 { 3 } else { 1 };
    buffer[20..22].copy_from_slice(&format_tag.to_le_bytes());
    buffer[22..24].copy_from_slice(&1u16.to_le_bytes());
    buffer[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    buffer[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    buffer[32..34].copy_from_slice(&block_align.to_le_bytes());
    buffer[34..36].copy_from_slice(&bits_per_sample.to_le_bytes());

    buffer[36..40].copy_from_slice(b"data");
    buffer[40..44].copy_from_slice(&data_size.to_le_bytes());

    let mut offset = header_size as usize;
    match format {
        WavFormat::Float32 => {
            for &sample in samples {
                buffer[offset..offset + 4].copy_from_slice(&(clamp(sample) as f32).to_le_bytes());
                offset += 4;
            }
        }
        WavFormat::Pcm16 => {
            for &sample in samples {
                let value = (clamp(sample) * 32767.0).round() as i16;
                buffer[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
                offset += 2;
            }
        }
    }

    buffer
}

/// Parses a WAV buffer, walking chunks in whatever order they appear
/// (per the RIFF spec, chunk order is not guaranteed) and averaging
/// multi-channel frames down to mono.
pub fn decode_wav_samples(wav_bytes: &[u8]) -> Result<WavData> {
    if wav_bytes.len() < 12 || &wav_bytes[0..4] != b"RIFF" || &wav_bytes[8..12] != b"WAVE" {
        return Err(QrAudioError::Wav(WavError::Malformed { reason: "invalid RIFF/WAVE header".into() }));
    }

    let mut offset = 12usize;
    let mut format_tag: Option<u16> = None;
    let mut channels = 0u16;
    let mut sample_rate = 0u32;
    let mut bits_per_sample = 0u16;
    let mut data_offset = 0usize;
    let mut data_size = 0usize;

    while offset + 8 <= wav_bytes.len() {
        let chunk_id = &wav_bytes[offset..offset + 4];
        let chunk_size = u32::from_le_bytes(wav_bytes[offset + 4..offset + 8].try_into().unwrap()) as usize;
        let chunk_data_offset = offset + 8;
        if chunk_data_offset + chunk_size > wav_bytes.len() {
            break;
        }

        if chunk_id == b"fmt " {
            format_tag = Some(u16::from_le_bytes(wav_bytes[chunk_data_offset..chunk_data_offset + 2].try_into().unwrap()));
            channels = u16::from_le_bytes(wav_bytes[chunk_data_offset + 2..chunk_data_offset + 4].try_into().unwrap());
            sample_rate = u32::from_le_bytes(wav_bytes[chunk_data_offset + 4..chunk_data_offset + 8].try_into().unwrap());
            bits_per_sample = u16::from_le_bytes(wav_bytes[chunk_data_offset + 14..chunk_data_offset + 16].try_into().unwrap());
        } else if chunk_id == b"data" {
            data_offset = chunk_data_offset;
            data_size = chunk_size;
        }

        offset = chunk_data_offset + chunk_size + (chunk_size % 2);
    }

    let format_tag = format_tag
        .ok_or_else(|| QrAudioError::Wav(WavError::Malformed { reason: "missing fmt chunk".into() }))?;
    if data_offset == 0 {
        return Err(QrAudioError::Wav(WavError::Malformed { reason: "missing data chunk".into() }));
    }
    if channels < 1 {
        return Err(QrAudioError::Wav(WavError::Malformed { reason: "invalid channel count".into() }));
    }

    let bytes_per_sample = (bits_per_sample / 8) as usize;
    let total_frames = data_size / (bytes_per_sample * channels as usize);
    let mut samples = Vec::with_capacity(total_frames);

    let format = match (format_tag, bits_per_sample) {
        (1, 16) => {
            let mut frame_offset = data_offset;
            for _ in 0..total_frames {
                let mut total = 0.0;
                for _ in 0..channels {
                    let value = i16::from_le_bytes(wav_bytes[frame_offset..frame_offset + 2].try_into().unwrap());
                    total += value as f64 / 32768.0;
                    frame_offset += 2;
                }
                samples.push(total / channels as f64);
            }
            WavFormat::Pcm16
        }
        (3, 32) => {
            let mut frame_offset = data_offset;
            for _ in 0..total_frames {
                let mut total = 0.0;
                for _ in 0..channels {
                    let value = f32::from_le_bytes(wav_bytes[frame_offset..frame_offset + 4].try_into().unwrap());
                    total += value as f64;
                    frame_offset += 4;
                }
                samples.push(total / channels as f64);
            }
            WavFormat::Float32
        }
        _ => {
            return Err(QrAudioError::Wav(WavError::UnsupportedFormat { format_tag, bits_per_sample }));
        }
    };

    Ok(WavData { sample_rate, channels, format, samples })
}

pub fn encode_wav(payload: &serde_json::Value, options: &EncodeOptions, format: WavFormat) -> Result<EncodeWavResult> {
    let result = encoder::encode(payload, options)?;
    let wav = encode_wav_samples(&result.samples, result.sample_rate, format);
    Ok(EncodeWavResult {
        sample_rate: result.sample_rate,
        profile: result.profile,
        samples: result.samples,
        duration_ms: result.duration_ms,
        payload_bytes: result.payload_bytes,
        wav,
    })
}

pub fn decode_wav(wav_bytes: &[u8], options: &DecodeOptions) -> Result<DecodeResult> {
    let data = decode_wav_samples(wav_bytes)?;
    let mut decode_options = options.clone();
    decode_options.sample_rate = Some(options.sample_rate.unwrap_or(data.sample_rate));
    decoder::decode(&data.samples, &decode_options)
}

pub fn scan_wav(wav_bytes: &[u8], options: &ScanOptions) -> Result<Vec<ScanResult>> {
    let data = decode_wav_samples(wav_bytes)?;
    let mut scan_options = options.clone();
    scan_options.sample_rate = Some(options.sample_rate.unwrap_or(data.sample_rate));
    decoder::scan(&data.samples, &scan_options)
}

/// Encodes `payload` and splices it (with silence padding) before the
/// existing audio in `wav_bytes`. Refuses to resample — the encode sample
/// rate must match the input file's.
pub fn prepend_payload_to_wav(
    wav_bytes: &[u8],
    payload: &serde_json::Value,
    options: &EncodeOptions,
    pad_seconds: f64,
    pre_pad_seconds: Option<f64>,
    post_pad_seconds: Option<f64>,
    format: WavFormat,
) -> Result<PrependWavResult> {
    let input_data = decode_wav_samples(wav_bytes)?;
    let sample_rate = options.sample_rate.unwrap_or(input_data.sample_rate);
    if sample_rate != input_data.sample_rate {
        return Err(QrAudioError::Wav(WavError::SampleRateMismatch {
            existing: input_data.sample_rate,
            new: sample_rate,
        }));
    }

    let mut payload_options = options.clone();
    payload_options.sample_rate = Some(sample_rate);
    let payload_result = encoder::encode(payload, &payload_options)?;

    let pre_pad = pre_pad_seconds.unwrap_or(pad_seconds);
    let post_pad = post_pad_seconds.unwrap_or(pad_seconds);
    let pre_samples = seconds_to_samples(sample_rate, pre_pad);
    let post_samples = seconds_to_samples(sample_rate, post_pad);

    let mut combined =
        vec![0.0; pre_samples + payload_result.samples.len() + post_samples + input_data.samples.len()];
    combined[pre_samples..pre_samples + payload_result.samples.len()]
        .copy_from_slice(&payload_result.samples);
    let tail_offset = pre_samples + payload_result.samples.len() + post_samples;
    combined[tail_offset..tail_offset + input_data.samples.len()].copy_from_slice(&input_data.samples);

    let wav_out = encode_wav_samples(&combined, sample_rate, format);
    Ok(PrependWavResult { wav: wav_out, payload: payload_result, sample_rate })
}
