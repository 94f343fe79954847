//! End-to-end scenarios, one per documented system behavior.

use qraudio_core::channel::apply_awgn;
use qraudio_core::config::{DecodeOptions, EncodeOptions, ScanOptions};
use qraudio_core::crc::crc16_x25;
use qraudio_core::gzip_codec::GzipMode;
use qraudio_core::reed_solomon;
use qraudio_core::wav::{decode_wav_samples, encode_wav_samples, prepend_payload_to_wav, scan_wav, WavFormat};
use qraudio_core::{decode, encode, scan, Profile};
use serde_json::json;

#[test]
fn s1_roundtrip_afsk_bell() {
    let payload = json!({"__type": "link", "url": "https://example.com", "meta": {"show": "QRA", "ep": 1}});
    let mut options = EncodeOptions::default();
    options.gzip = GzipMode::Off;
    options.fec = true;

    let encoded = encode(&payload, &options).unwrap();
    assert_eq!(encoded.profile, Profile::AfskBell);

    let decode_options = DecodeOptions { sample_rate: Some(encoded.sample_rate), ..Default::default() };
    let decoded = decode(&encoded.samples, &decode_options).unwrap();
    assert_eq!(decoded.json, payload);
    assert_eq!(decoded.profile, Profile::AfskBell);
}

#[test]
fn s2_roundtrip_mfsk() {
    let payload = json!({"__type": "link", "url": "https://example.com", "meta": {"show": "QRA", "ep": 1}});
    let mut options = EncodeOptions::default();
    options.profile = Some(Profile::Mfsk);

    let encoded = encode(&payload, &options).unwrap();
    let settings = qraudio_core::profile::settings(Profile::Mfsk);
    let samples_per_symbol = (encoded.sample_rate as f64 / settings.baud) * settings.bits_per_symbol.unwrap() as f64;
    assert_eq!(samples_per_symbol, 160.0);

    let decode_options = DecodeOptions {
        sample_rate: Some(encoded.sample_rate),
        profile: Some(Profile::Mfsk),
        ..Default::default()
    };
    let decoded = decode(&encoded.samples, &decode_options).unwrap();
    assert_eq!(decoded.json, payload);
}

#[test]
fn s3_crc_vector() {
    assert_eq!(crc16_x25(b"123456789"), 0x906E);
}

#[test]
fn s4_rs_corrects_ten_leading_byte_flips() {
    let payload: Vec<u8> = (0u8..120).collect();
    let mut encoded = reed_solomon::encode(&payload);
    for i in 0..10 {
        encoded[i] ^= 0xFF;
    }
    let decoded = reed_solomon::decode(&encoded, payload.len()).unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn s5_noisy_afsk_bell_still_scans() {
    let payload = json!({"__type": "noise", "value": 1});
    let encoded = encode(&payload, &EncodeOptions::default()).unwrap();

    let silence_len = (0.2 * encoded.sample_rate as f64).round() as usize;
    let silence = vec![0.0; silence_len];
    let mut padded = silence.clone();
    padded.extend_from_slice(&encoded.samples);
    padded.extend_from_slice(&silence);

    let noisy = apply_awgn(&padded, 15.0, 42);

    let options = ScanOptions { sample_rate: Some(encoded.sample_rate), ..Default::default() };
    let results = scan(&noisy, &options).unwrap();
    assert!(results.iter().any(|r| r.json == payload));
}

#[test]
fn s6_prepend_and_scan_wav() {
    let tone_sample_rate = 48_000u32;
    let tone_samples: Vec<f64> = (0..tone_sample_rate)
        .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / tone_sample_rate as f64).sin() * 0.5)
        .collect();
    let base_wav = encode_wav_samples(&tone_samples, tone_sample_rate, WavFormat::Pcm16);

    let payload = json!({"__type": "test", "value": 123});
    let mut options = EncodeOptions::default();
    options.profile = Some(Profile::GfskFifth);

    let result = prepend_payload_to_wav(&base_wav, &payload, &options, 0.25, None, None, WavFormat::Pcm16).unwrap();

    let scan_options = ScanOptions::default();
    let results = scan_wav(&result.wav, &scan_options).unwrap();
    assert!(results.iter().any(|r| r.json == payload));
}

#[test]
fn wav_roundtrip_preserves_sample_rate() {
    let samples = vec![0.1, -0.2, 0.3, -0.4];
    let wav = encode_wav_samples(&samples, 44_100, WavFormat::Pcm16);
    let data = decode_wav_samples(&wav).unwrap();
    assert_eq!(data.sample_rate, 44_100);
}
