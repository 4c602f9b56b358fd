use crate::analysis::TrimConfig;
use crate::editor::trim_wav_file;
use crate::error::ProcessResult;
use crate::media::SampleEncoding;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Trim trailing silence from a speech WAV file
#[derive(Parser, Debug)]
#[command(name = "speech-tail-trimmer", version, about)]
pub struct Cli {
    /// WAV file to trim
    pub input: PathBuf,

    /// Where to write the trimmed WAV
    pub output: PathBuf,

    /// JSON file with trim settings; the flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Frame energy threshold in dB
    #[arg(long, value_name = "DB", allow_hyphen_values = true)]
    pub threshold_db: Option<f64>,

    /// Silence kept after the last voiced frame, in milliseconds
    #[arg(long, value_name = "MS")]
    pub min_silence_ms: Option<u32>,

    /// Write 16-bit PCM instead of 32-bit float
    #[arg(long)]
    pub pcm16: bool,

    /// Print the trim report as JSON on stdout
    #[arg(long)]
    pub report: bool,
}

impl Cli {
    pub fn trim_config(&self) -> ProcessResult<TrimConfig> {
        let mut config: TrimConfig = match &self.config {
            Some(path) => {
                log::info!("Loading trim config from {:?}", path);
                serde_json::from_str(&fs::read_to_string(path)?)?
            }
            None => TrimConfig::default(),
        };
        if let Some(threshold_db) = self.threshold_db {
            config.threshold_db = threshold_db;
        }
        if let Some(min_silence_ms) = self.min_silence_ms {
            config.min_silence_ms = min_silence_ms;
        }
        Ok(config)
    }

    pub fn encoding(&self) -> SampleEncoding {
        if self.pcm16 {
            SampleEncoding::Pcm16
        } else {
            SampleEncoding::Float32
        }
    }
}

pub fn execute(cli: &Cli) -> ProcessResult<()> {
    let config = cli.trim_config()?;
    let report = trim_wav_file(&cli.input, &cli.output, &config, cli.encoding())?;
    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

/// Entry point for the binary
pub fn run() {
    // Initialize logger
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = execute(&cli) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{read_wav, write_wav};

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("trim.json");
        fs::write(&config_path, r#"{"threshold_db": -50.0, "min_silence_ms": 300}"#).unwrap();

        let cli = Cli::parse_from([
            "speech-tail-trimmer",
            "in.wav",
            "out.wav",
            "--config",
            config_path.to_str().unwrap(),
            "--min-silence-ms",
            "100",
        ]);
        let config = cli.trim_config().unwrap();
        assert_eq!(config.threshold_db, -50.0);
        assert_eq!(config.min_silence_ms, 100);
        assert_eq!(config.frame_ms, 25.0);
    }

    #[test]
    fn test_negative_threshold_flag() {
        let cli = Cli::parse_from(["speech-tail-trimmer", "a.wav", "b.wav", "--threshold-db", "-35"]);
        assert_eq!(cli.trim_config().unwrap().threshold_db, -35.0);
        assert_eq!(cli.encoding(), SampleEncoding::Float32);
    }

    #[test]
    fn test_execute() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");

        let mut samples = vec![0.5f32; 8000];
        samples.extend(std::iter::repeat(0.0).take(12000));
        write_wav(&input, &samples, 16000, SampleEncoding::Float32).unwrap();

        let cli = Cli::parse_from([
            "speech-tail-trimmer",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--pcm16",
        ]);
        execute(&cli).unwrap();

        let trimmed = read_wav(&output).unwrap();
        assert_eq!(trimmed.waveform.len(), 10800);
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "speech-tail-trimmer",
            dir.path().join("missing.wav").to_str().unwrap(),
            dir.path().join("out.wav").to_str().unwrap(),
        ]);
        assert!(execute(&cli).is_err());
    }
}
