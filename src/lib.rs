// Declare modules
pub mod analysis;
pub mod cli;
pub mod editor;
pub mod error;
pub mod export;
pub mod media;

pub use analysis::{
    find_trim_point, trim_trailing_silence, trim_trailing_silence_with_report, Layout,
    TrimConfig, TrimOutcome, TrimReport, Waveform,
};
pub use cli::run;
pub use editor::{SpeechModel, SpeechRequest, SpeechResponse, SpeechService};
pub use error::{ProcessError, ProcessResult, TrimError};
pub use export::{AudioStore, DirectoryStore};
pub use media::SampleEncoding;
