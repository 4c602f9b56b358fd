use crate::analysis::Waveform;
use crate::error::ProcessResult;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

/// Sample format used when encoding WAV output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleEncoding {
    /// 32-bit IEEE float, samples written as is
    #[default]
    Float32,
    /// 16-bit PCM, samples clamped to [-1, 1]
    Pcm16,
}

impl SampleEncoding {
    fn spec(self, sample_rate: u32) -> WavSpec {
        match self {
            SampleEncoding::Float32 => WavSpec {
                channels: 1,
                sample_rate,
                bits_per_sample: 32,
                sample_format: SampleFormat::Float,
            },
            SampleEncoding::Pcm16 => WavSpec {
                channels: 1,
                sample_rate,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            },
        }
    }
}

/// Mono audio decoded from a WAV stream
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub waveform: Waveform,
    pub sample_rate: u32,
    /// Channel count of the source before downmixing
    pub channels: u16,
}

/// Decodes a WAV file into a flat mono waveform
pub fn read_wav(path: &Path) -> ProcessResult<DecodedAudio> {
    log::info!("Reading WAV: {:?}", path);
    let reader = WavReader::open(path)?;
    decode_from_reader(reader)
}

/// Decodes WAV bytes from any reader into a flat mono waveform
pub fn decode_wav<R: Read>(source: R) -> ProcessResult<DecodedAudio> {
    let reader = WavReader::new(source)?;
    decode_from_reader(reader)
}

fn decode_from_reader<R: Read>(mut reader: WavReader<R>) -> ProcessResult<DecodedAudio> {
    let spec = reader.spec();
    log::debug!("WAV spec: {:?}", spec);

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let mono = downmix(interleaved, spec.channels);
    log::info!(
        "Decoded {} mono samples at {} Hz from {} channel(s)",
        mono.len(),
        spec.sample_rate,
        spec.channels
    );

    Ok(DecodedAudio {
        waveform: Waveform::flat(mono),
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

/// Averages interleaved channels to mono
fn downmix(samples: Vec<f32>, channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples;
    }
    samples
        .chunks(channels as usize)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Encodes mono samples as an in-memory WAV file
pub fn encode_wav(
    samples: &[f32],
    sample_rate: u32,
    encoding: SampleEncoding,
) -> ProcessResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, encoding.spec(sample_rate))?;
        match encoding {
            SampleEncoding::Float32 => {
                for &sample in samples {
                    writer.write_sample(sample)?;
                }
            }
            SampleEncoding::Pcm16 => {
                for &sample in samples {
                    let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                    writer.write_sample(sample_i16)?;
                }
            }
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Writes mono samples to a WAV file, creating parent directories
pub fn write_wav(
    path: &Path,
    samples: &[f32],
    sample_rate: u32,
    encoding: SampleEncoding,
) -> ProcessResult<()> {
    let bytes = encode_wav(samples, sample_rate, encoding)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    log::info!("Wrote {} samples to {:?}", samples.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_roundtrip_is_exact() {
        let samples = vec![0.25f32, -0.5, 0.125, 0.0];
        let bytes = encode_wav(&samples, 24000, SampleEncoding::Float32).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");

        let decoded = decode_wav(Cursor::new(bytes)).unwrap();
        assert_eq!(decoded.sample_rate, 24000);
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.waveform.samples(), samples.as_slice());
    }

    #[test]
    fn test_pcm16_clamps() {
        let bytes = encode_wav(&[2.0, -2.0], 16000, SampleEncoding::Pcm16).unwrap();
        let decoded = decode_wav(Cursor::new(bytes)).unwrap();
        let s = decoded.waveform.samples();
        assert!((s[0] - 32767.0 / 32768.0).abs() < 1e-6);
        assert!((s[1] + 32767.0 / 32768.0).abs() < 1e-6);
    }

    #[test]
    fn test_stereo_is_averaged() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for (l, r) in [(16384i16, 0i16), (-16384, -16384)] {
                writer.write_sample(l).unwrap();
                writer.write_sample(r).unwrap();
            }
            writer.finalize().unwrap();
        }

        let decoded = decode_wav(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(decoded.channels, 2);
        assert_eq!(decoded.waveform.samples(), &[0.25, -0.5]);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.wav");
        write_wav(&path, &[0.0; 16], 16000, SampleEncoding::Float32).unwrap();

        let decoded = read_wav(&path).unwrap();
        assert_eq!(decoded.waveform.len(), 16);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(decode_wav(Cursor::new(b"not a wav file".to_vec())).is_err());
    }
}
