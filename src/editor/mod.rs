pub mod actions;
pub mod service;

pub use actions::{finalize_speech, trim_wav_bytes, trim_wav_file, FinalizedAudio};
pub use service::{SpeechModel, SpeechRequest, SpeechResponse, SpeechService};
