use crate::analysis::{trim_trailing_silence_with_report, TrimConfig, TrimReport, Waveform};
use crate::error::ProcessResult;
use crate::media::{decode_wav, encode_wav, read_wav, write_wav, SampleEncoding};
use std::io::Cursor;
use std::path::Path;

/// Trimmed audio ready to hand to storage
#[derive(Debug, Clone)]
pub struct FinalizedAudio {
    pub waveform: Waveform,
    pub wav_bytes: Vec<u8>,
    pub report: TrimReport,
}

/// Trims trailing silence from synthesized audio and encodes it as WAV
pub fn finalize_speech(
    waveform: &Waveform,
    sample_rate: u32,
    config: &TrimConfig,
    encoding: SampleEncoding,
) -> ProcessResult<FinalizedAudio> {
    let (trimmed, report) =
        trim_trailing_silence_with_report(waveform, i64::from(sample_rate), config)?;
    log_report(&report, sample_rate);

    let wav_bytes = encode_wav(trimmed.samples(), sample_rate, encoding)?;
    Ok(FinalizedAudio {
        waveform: trimmed,
        wav_bytes,
        report,
    })
}

/// Decodes WAV bytes, trims trailing silence and re-encodes
pub fn trim_wav_bytes(
    bytes: &[u8],
    config: &TrimConfig,
    encoding: SampleEncoding,
) -> ProcessResult<(Vec<u8>, TrimReport)> {
    let decoded = decode_wav(Cursor::new(bytes))?;
    let finalized = finalize_speech(&decoded.waveform, decoded.sample_rate, config, encoding)?;
    Ok((finalized.wav_bytes, finalized.report))
}

/// Reads a WAV file, trims trailing silence and writes the result
pub fn trim_wav_file(
    input: &Path,
    output: &Path,
    config: &TrimConfig,
    encoding: SampleEncoding,
) -> ProcessResult<TrimReport> {
    log::info!("Trimming {:?} -> {:?}", input, output);
    log::info!(
        "Threshold: {} dB, tail: {} ms",
        config.threshold_db,
        config.min_silence_ms
    );

    let decoded = read_wav(input)?;
    let (trimmed, report) = trim_trailing_silence_with_report(
        &decoded.waveform,
        i64::from(decoded.sample_rate),
        config,
    )?;
    log_report(&report, decoded.sample_rate);

    write_wav(output, trimmed.samples(), decoded.sample_rate, encoding)?;
    Ok(report)
}

fn log_report(report: &TrimReport, sample_rate: u32) {
    let rate = f64::from(sample_rate);
    log::info!(
        "Kept {:.3}s of {:.3}s ({} samples removed)",
        report.trim_point as f64 / rate,
        report.original_len as f64 / rate,
        report.samples_removed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TrimOutcome;
    use crate::error::{ProcessError, TrimError};

    fn speech_like(rate: u32, voiced_secs: f64, total_secs: f64) -> Vec<f32> {
        let voiced = (rate as f64 * voiced_secs) as usize;
        let total = (rate as f64 * total_secs) as usize;
        (0..total)
            .map(|i| if i < voiced { 0.3 * ((i as f32) * 0.07).sin().signum() } else { 0.0 })
            .collect()
    }

    #[test]
    fn test_trim_wav_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out").join("trimmed.wav");

        write_wav(&input, &speech_like(24000, 1.0, 3.0), 24000, SampleEncoding::Float32).unwrap();
        let report =
            trim_wav_file(&input, &output, &TrimConfig::default(), SampleEncoding::Float32)
                .unwrap();

        // 24 kHz: frame 600, hop 240, tail 3600; frame 99 starts at 23760
        assert_eq!(report.outcome, TrimOutcome::Voiced { last_voiced_frame: 99 });
        assert_eq!(report.trim_point, 100 * 240 + 600 + 3600);

        let written = read_wav(&output).unwrap();
        assert_eq!(written.waveform.len(), report.trim_point);
        assert_eq!(written.sample_rate, 24000);
    }

    #[test]
    fn test_trim_wav_bytes_pcm16() {
        let input = encode_wav(&speech_like(16000, 0.5, 2.0), 16000, SampleEncoding::Pcm16).unwrap();
        let (bytes, report) =
            trim_wav_bytes(&input, &TrimConfig::default(), SampleEncoding::Pcm16).unwrap();

        assert_eq!(report.original_len, 32000);
        assert_eq!(report.trim_point, 50 * 160 + 400 + 2400);
        let decoded = decode_wav(Cursor::new(bytes)).unwrap();
        assert_eq!(decoded.waveform.len(), report.trim_point);
    }

    #[test]
    fn test_finalize_keeps_layout() {
        let wav = Waveform::channel_first(speech_like(16000, 0.5, 2.0));
        let finalized =
            finalize_speech(&wav, 16000, &TrimConfig::default(), SampleEncoding::Float32).unwrap();
        assert_eq!(finalized.waveform.shape(), vec![1, 10800]);
        assert!(!finalized.wav_bytes.is_empty());
    }

    #[test]
    fn test_empty_waveform_is_an_error() {
        let result = finalize_speech(
            &Waveform::flat(Vec::new()),
            16000,
            &TrimConfig::default(),
            SampleEncoding::Float32,
        );
        assert!(matches!(result, Err(ProcessError::Trim(TrimError::EmptyInput))));
    }

    #[test]
    fn test_zero_sample_rate_is_an_error() {
        let result = finalize_speech(
            &Waveform::flat(vec![0.1; 100]),
            0,
            &TrimConfig::default(),
            SampleEncoding::Float32,
        );
        assert!(matches!(
            result,
            Err(ProcessError::Trim(TrimError::InvalidSampleRate(0)))
        ));
    }
}
