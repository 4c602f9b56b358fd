use super::waveform::Waveform;
use crate::error::TrimError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Configuration for trailing silence trimming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    /// Frame energy threshold in dB (e.g., -40.0)
    pub threshold_db: f64,
    /// Silence kept after the last voiced frame, in milliseconds
    pub min_silence_ms: u32,
    /// Analysis window length in milliseconds
    pub frame_ms: f64,
    /// Stride between window starts in milliseconds
    pub hop_ms: f64,
}

impl Default for TrimConfig {
    fn default() -> Self {
        TrimConfig {
            threshold_db: -40.0,
            min_silence_ms: 150,
            frame_ms: 25.0,
            hop_ms: 10.0,
        }
    }
}

impl TrimConfig {
    /// Linear amplitude threshold: 10^(dB / 20)
    pub fn linear_threshold(&self) -> f64 {
        10f64.powf(self.threshold_db / 20.0)
    }
}

/// Frame and hop sizes in samples for one sample rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameGeometry {
    pub frame_length: usize,
    pub hop_length: usize,
}

impl FrameGeometry {
    pub fn new(sample_rate: i64, config: &TrimConfig) -> Result<Self, TrimError> {
        if sample_rate <= 0 {
            return Err(TrimError::InvalidSampleRate(sample_rate));
        }
        Ok(FrameGeometry {
            frame_length: ms_to_samples(sample_rate, config.frame_ms),
            hop_length: ms_to_samples(sample_rate, config.hop_ms),
        })
    }

    /// Number of whole frames that fit in `len` samples.
    /// Zero when the input is shorter than one frame or the geometry is degenerate.
    pub fn frame_count(&self, len: usize) -> usize {
        if self.frame_length == 0 || self.hop_length == 0 || len < self.frame_length {
            return 0;
        }
        (len - self.frame_length) / self.hop_length + 1
    }

    pub fn frame_range(&self, index: usize) -> Range<usize> {
        let start = index * self.hop_length;
        start..start + self.frame_length
    }
}

/// How the trim point was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrimOutcome {
    /// Shorter than one analysis frame; left untouched
    TooShort,
    /// Found a frame above the threshold
    Voiced { last_voiced_frame: usize },
    /// No frame exceeded the threshold; fell back to the first frame
    AllSilent,
}

/// Result of analyzing a waveform for trailing silence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimReport {
    pub original_len: usize,
    pub trim_point: usize,
    pub outcome: TrimOutcome,
}

impl TrimReport {
    pub fn samples_removed(&self) -> usize {
        self.original_len - self.trim_point
    }
}

/// Finds where trailing silence starts in a flat mono signal.
///
/// Frames are scanned from the end backward; the first frame whose RMS
/// exceeds the linear threshold is the last voiced frame. The trim point
/// sits one hop plus one frame past that frame's start, plus the configured
/// tail of silence, clamped to the input length.
pub fn find_trim_point(
    samples: &[f32],
    sample_rate: i64,
    config: &TrimConfig,
) -> Result<TrimReport, TrimError> {
    if samples.is_empty() {
        return Err(TrimError::EmptyInput);
    }
    let geometry = FrameGeometry::new(sample_rate, config)?;
    let len = samples.len();

    let num_frames = geometry.frame_count(len);
    if num_frames == 0 {
        log::debug!(
            "Waveform of {} samples is shorter than one {}-sample frame, leaving it untouched",
            len,
            geometry.frame_length
        );
        return Ok(TrimReport {
            original_len: len,
            trim_point: len,
            outcome: TrimOutcome::TooShort,
        });
    }

    let threshold = config.linear_threshold();
    let last_voiced = (0..num_frames)
        .rev()
        .find(|&i| calculate_rms(&samples[geometry.frame_range(i)]) > threshold);

    let (last_voiced_frame, outcome) = match last_voiced {
        Some(frame) => (frame, TrimOutcome::Voiced { last_voiced_frame: frame }),
        None => {
            // Keeps the first-frame fallback; a fully silent clip usually
            // means synthesis went wrong upstream.
            log::warn!(
                "No frame above {} dB in {} samples, falling back to the first frame",
                config.threshold_db,
                len
            );
            (0, TrimOutcome::AllSilent)
        }
    };

    let min_silence_samples = ms_to_samples(sample_rate, f64::from(config.min_silence_ms));
    let trim_point = (last_voiced_frame + 1)
        .saturating_mul(geometry.hop_length)
        .saturating_add(geometry.frame_length)
        .saturating_add(min_silence_samples)
        .min(len);

    log::debug!(
        "Trim point {} of {} samples ({:?}, frame={}, hop={})",
        trim_point,
        len,
        outcome,
        geometry.frame_length,
        geometry.hop_length
    );

    Ok(TrimReport {
        original_len: len,
        trim_point,
        outcome,
    })
}

/// Trims trailing silence, returning the kept prefix in the caller's layout
pub fn trim_trailing_silence(
    waveform: &Waveform,
    sample_rate: i64,
    config: &TrimConfig,
) -> Result<Waveform, TrimError> {
    trim_trailing_silence_with_report(waveform, sample_rate, config).map(|(trimmed, _)| trimmed)
}

pub fn trim_trailing_silence_with_report(
    waveform: &Waveform,
    sample_rate: i64,
    config: &TrimConfig,
) -> Result<(Waveform, TrimReport), TrimError> {
    let report = find_trim_point(waveform.samples(), sample_rate, config)?;
    Ok((waveform.truncated(report.trim_point), report))
}

/// Calculates the Root Mean Square (RMS) of a set of audio samples
fn calculate_rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_of_squares: f64 = samples
        .iter()
        .map(|&s| {
            let s = f64::from(s);
            s * s
        })
        .sum();

    (sum_of_squares / samples.len() as f64).sqrt()
}

fn ms_to_samples(sample_rate: i64, ms: f64) -> usize {
    // Negative or NaN products saturate to zero
    (sample_rate as f64 * ms / 1000.0).round() as usize
}
