//! Speech generation service: model output is trimmed, encoded and stored.

use super::actions::finalize_speech;
use crate::analysis::{TrimConfig, TrimReport, Waveform};
use crate::error::ProcessResult;
use crate::export::AudioStore;
use crate::media::SampleEncoding;
use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "en".to_string()
}

fn default_weight() -> f32 {
    0.5
}

/// Text-to-speech generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    /// ISO 639-1 language code
    #[serde(default = "default_language")]
    pub language: String,
    /// Emotional intensity, 0.0 to 1.0
    #[serde(default = "default_weight")]
    pub exaggeration: f32,
    /// Guidance weight; affects pacing
    #[serde(default = "default_weight")]
    pub cfg_weight: f32,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        SpeechRequest {
            text: text.into(),
            language: default_language(),
            exaggeration: default_weight(),
            cfg_weight: default_weight(),
        }
    }
}

/// Where the generated clip was stored and what trimming did to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechResponse {
    pub key: String,
    pub sample_rate: u32,
    pub samples: usize,
    pub duration_secs: f64,
    pub trim: TrimReport,
}

/// A loaded speech synthesis model
pub trait SpeechModel {
    /// Native output sample rate in Hz
    fn sample_rate(&self) -> u32;

    fn generate(&self, request: &SpeechRequest) -> ProcessResult<Waveform>;
}

/// Owns one model handle and one store for the lifetime of the service.
/// The model is loaded by the caller before construction and reused for
/// every request.
pub struct SpeechService<M, S> {
    model: M,
    store: S,
    trim: TrimConfig,
    encoding: SampleEncoding,
}

impl<M: SpeechModel, S: AudioStore> SpeechService<M, S> {
    pub fn new(model: M, store: S) -> Self {
        SpeechService {
            model,
            store,
            trim: TrimConfig::default(),
            encoding: SampleEncoding::default(),
        }
    }

    pub fn with_trim_config(mut self, trim: TrimConfig) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_encoding(mut self, encoding: SampleEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates speech for `request` and stores the trimmed WAV under `key`.
    /// Nothing is written if generation or trimming fails.
    pub fn generate_speech(
        &self,
        request: &SpeechRequest,
        key: &str,
    ) -> ProcessResult<SpeechResponse> {
        log::info!(
            "Generating speech: {} chars, language={}, exaggeration={}, cfg_weight={}",
            request.text.chars().count(),
            request.language,
            request.exaggeration,
            request.cfg_weight
        );

        let sample_rate = self.model.sample_rate();
        let waveform = self.model.generate(request)?;
        let finalized = finalize_speech(&waveform, sample_rate, &self.trim, self.encoding)?;

        self.store.put(key, &finalized.wav_bytes)?;
        log::info!("Saved audio: {}", key);

        Ok(SpeechResponse {
            key: key.to_string(),
            sample_rate,
            samples: finalized.waveform.len(),
            duration_secs: finalized.waveform.duration_secs(sample_rate),
            trim: finalized.report,
        })
    }
}
