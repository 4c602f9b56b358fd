//! Error types for trimming and the pipelines built around it.

/// Errors raised by the silence trimmer itself.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrimError {
    /// The waveform has zero samples.
    #[error("waveform contains no samples")]
    EmptyInput,

    /// The sample rate is zero or negative.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(i64),

    /// The waveform has more than one channel and cannot be analyzed as mono.
    #[error("expected a single channel, got {0}")]
    UnsupportedChannels(usize),
}

/// Errors raised while decoding, trimming, encoding or storing audio.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("trim failed: {0}")]
    Trim(#[from] TrimError),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage key is absolute or escapes the store root.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The speech model failed to produce audio.
    #[error("synthesis failed: {0}")]
    Synthesis(String),
}

impl ProcessError {
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }
}

pub type ProcessResult<T> = Result<T, ProcessError>;
