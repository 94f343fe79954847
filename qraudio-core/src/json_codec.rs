//! Thin `serde_json` adapter: compact, UTF-8, no extraneous whitespace.
//! The core pipeline otherwise treats payloads as opaque bytes.

use serde_json::Value;

use crate::errors::{CodecError, QrAudioError, Result};

pub fn encode(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).expect("Value serialization is infallible")
}

pub fn decode(data: &[u8]) -> Result<Value> {
    serde_json::from_slice(data).map_err(|e| {
        QrAudioError::Codec(CodecError::JsonDecodeFailed { reason: e.to_string() })
    })
}
