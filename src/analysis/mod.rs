pub mod trailing_silence;
pub mod waveform;

pub use trailing_silence::{
    find_trim_point, trim_trailing_silence, trim_trailing_silence_with_report, FrameGeometry,
    TrimConfig, TrimOutcome, TrimReport,
};
pub use waveform::{Layout, Waveform};
