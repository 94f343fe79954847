use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qraudio_core::{decode, encode, scan, DecodeOptions, EncodeOptions, Profile, ScanOptions};

fn benchmark_decode_known_profile(c: &mut Criterion) {
    let payload = serde_json::json!({"id": "beacon-07", "ok": true});
    let encoded = encode(&payload, &EncodeOptions::default()).unwrap();
    let options = DecodeOptions { sample_rate: Some(encoded.sample_rate), ..Default::default() };

    c.bench_function("decode_afsk_bell_known_profile", |b| {
        b.iter(|| decode(black_box(&encoded.samples), black_box(&options)))
    });
}

fn benchmark_scan_without_profile_hint(c: &mut Criterion) {
    let payload = serde_json::json!({"id": "beacon-07", "ok": true});
    let encoded = encode(&payload, &EncodeOptions::default()).unwrap();
    let options = ScanOptions { sample_rate: Some(encoded.sample_rate), ..Default::default() };

    c.bench_function("scan_grid_search_all_profiles", |b| {
        b.iter(|| scan(black_box(&encoded.samples), black_box(&options)))
    });
}

fn benchmark_decode_by_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_profile");

    for profile in [Profile::AfskBell, Profile::AfskFifth, Profile::GfskFifth, Profile::Mfsk] {
        let payload = serde_json::json!({"p": profile.as_str()});
        let mut enc_options = EncodeOptions::default();
        enc_options.profile = Some(profile);
        let encoded = encode(&payload, &enc_options).unwrap();
        let dec_options = DecodeOptions {
            sample_rate: Some(encoded.sample_rate),
            profile: Some(profile),
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(profile.as_str()), &encoded.samples, |b, samples| {
            b.iter(|| decode(black_box(samples), black_box(&dec_options)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decode_known_profile,
    benchmark_scan_without_profile_hint,
    benchmark_decode_by_profile
);
criterion_main!(benches);
