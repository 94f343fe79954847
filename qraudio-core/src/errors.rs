//! QRAudio error types with granular categories

use thiserror::Error;

/// Top-level error type for all QRAudio operations
#[derive(Debug, Error)]
pub enum QrAudioError {
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Reed-Solomon error: {0}")]
    Rs(#[from] RsError),

    #[error("WAV error: {0}")]
    Wav(#[from] WavError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Frame parsing / lifecycle errors
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("no valid frame found in samples")]
    NoValidFrame,

    #[error("frame payload truncated: declared {declared} bytes, found {available}")]
    Truncated { declared: usize, available: usize },
}

/// Reed-Solomon specific errors
#[derive(Debug, Error)]
pub enum RsError {
    #[error("too many errors to correct: located {located}, capacity {capacity}")]
    TooManyErrors { located: usize, capacity: usize },

    #[error("singular matrix while solving for error magnitudes")]
    SingularMatrix,
}

/// WAV container errors
#[derive(Debug, Error)]
pub enum WavError {
    #[error("unsupported WAV format: tag={format_tag} bits={bits_per_sample}")]
    UnsupportedFormat { format_tag: u16, bits_per_sample: u16 },

    #[error("malformed WAV data: {reason}")]
    Malformed { reason: String },

    #[error("sample rate mismatch: existing {existing} Hz, new {new} Hz (resampling not supported)")]
    SampleRateMismatch { existing: u32, new: u32 },
}

/// Compression / JSON codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("gzip decompression failed: {reason}")]
    DecompressionFailed { reason: String },

    #[error("JSON decode failed: {reason}")]
    JsonDecodeFailed { reason: String },
}

/// Result type alias for QRAudio operations
pub type Result<T> = std::result::Result<T, QrAudioError>;
