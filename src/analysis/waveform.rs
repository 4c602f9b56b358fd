use crate::error::TrimError;
use serde::{Deserialize, Serialize};

/// Shape convention a waveform arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Shape `[N]`
    #[default]
    Flat,
    /// Shape `[1, N]`
    ChannelFirst,
}

/// Mono audio samples plus the shape the caller handed them over in.
/// Analysis always works on the flat samples; the layout is carried
/// through so trimmed output goes back in the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    samples: Vec<f32>,
    layout: Layout,
}

impl Waveform {
    pub fn flat(samples: Vec<f32>) -> Self {
        Waveform {
            samples,
            layout: Layout::Flat,
        }
    }

    pub fn channel_first(samples: Vec<f32>) -> Self {
        Waveform {
            samples,
            layout: Layout::ChannelFirst,
        }
    }

    /// Builds a channel-first waveform from a `[channels][samples]` container.
    /// Only single-channel input is accepted.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Result<Self, TrimError> {
        match channels.len() {
            0 => Err(TrimError::EmptyInput),
            1 => {
                let samples = channels.into_iter().next().unwrap_or_default();
                Ok(Waveform::channel_first(samples))
            }
            n => Err(TrimError::UnsupportedChannels(n)),
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Shape in the caller's convention
    pub fn shape(&self) -> Vec<usize> {
        match self.layout {
            Layout::Flat => vec![self.samples.len()],
            Layout::ChannelFirst => vec![1, self.samples.len()],
        }
    }

    /// Returns the first `end` samples (clamped to the length), keeping the layout
    pub fn truncated(&self, end: usize) -> Self {
        let end = end.min(self.samples.len());
        Waveform {
            samples: self.samples[..end].to_vec(),
            layout: self.layout,
        }
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn into_channels(self) -> Vec<Vec<f32>> {
        vec![self.samples]
    }

    /// Duration in seconds at the given sample rate
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / sample_rate as f64
    }
}
