use proptest::prelude::*;

use qraudio_core::config::{DecodeOptions, EncodeOptions};
use qraudio_core::{decode, encode, Profile};

proptest! {
    /// Any reasonably short JSON string payload round-trips through the
    /// default (AFSK Bell 202) profile.
    #[test]
    fn encode_decode_roundtrip_afsk_bell(message in "[a-zA-Z0-9 ]{1,120}") {
        let payload = serde_json::json!({ "msg": message });
        let encoded = encode(&payload, &EncodeOptions::default()).unwrap();
        let options = DecodeOptions { sample_rate: Some(encoded.sample_rate), ..Default::default() };
        let decoded = decode(&encoded.samples, &options).unwrap();
        prop_assert_eq!(decoded.json, payload);
    }

    /// Round-trip holds for every modulation profile, not just the default.
    #[test]
    fn encode_decode_roundtrip_all_profiles(
        message in "[a-zA-Z0-9]{1,60}",
        profile_index in 0usize..4,
    ) {
        let profiles = [Profile::AfskBell, Profile::AfskFifth, Profile::GfskFifth, Profile::Mfsk];
        let profile = profiles[profile_index];

        let payload = serde_json::json!({ "msg": message });
        let mut enc_options = EncodeOptions::default();
        enc_options.profile = Some(profile);
        let encoded = encode(&payload, &enc_options).unwrap();

        let dec_options = DecodeOptions {
            sample_rate: Some(encoded.sample_rate),
            profile: Some(profile),
            ..Default::default()
        };
        let decoded = decode(&encoded.samples, &dec_options).unwrap();
        prop_assert_eq!(decoded.json, payload);
        prop_assert_eq!(decoded.profile, profile);
    }

    /// FEC-disabled round-trip still holds on a clean channel — FEC only
    /// needs to matter once errors are introduced.
    #[test]
    fn encode_decode_roundtrip_without_fec(message in "[a-zA-Z0-9 ]{1,80}") {
        let payload = serde_json::json!({ "msg": message });
        let mut options = EncodeOptions::default();
        options.fec = false;
        let encoded = encode(&payload, &options).unwrap();
        let decode_options = DecodeOptions { sample_rate: Some(encoded.sample_rate), ..Default::default() };
        let decoded = decode(&encoded.samples, &decode_options).unwrap();
        prop_assert_eq!(decoded.json, payload);
    }

    /// Gzip "on" round-trips identically to gzip "off" for the same payload.
    #[test]
    fn gzip_on_does_not_change_recovered_payload(message in "[a-zA-Z0-9]{1,200}") {
        use qraudio_core::gzip_codec::GzipMode;

        let payload = serde_json::json!({ "msg": message.repeat(3) });
        let mut options = EncodeOptions::default();
        options.gzip = GzipMode::On;
        let encoded = encode(&payload, &options).unwrap();
        let decode_options = DecodeOptions { sample_rate: Some(encoded.sample_rate), ..Default::default() };
        let decoded = decode(&encoded.samples, &decode_options).unwrap();
        prop_assert_eq!(decoded.json, payload);
    }
}
