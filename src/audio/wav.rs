//! WAV file helpers built on hound

use std::path::Path;

use crate::{Result, VoxpadError};

/// Write f32 samples to a 16-bit PCM WAV file
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32, channels: u16) -> Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| VoxpadError::CaptureWriteError(format!("create {}: {}", path.display(), e)))?;

    for &sample in samples {
        let clamped = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(clamped)
            .map_err(|e| VoxpadError::CaptureWriteError(format!("write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| VoxpadError::CaptureWriteError(format!("finalize wav: {}", e)))?;
    Ok(())
}

/// Read a WAV file into f32 samples, returning (samples, sample_rate, channels)
pub fn read_wav(path: &Path) -> Result<(Vec<f32>, u32, u16)> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| VoxpadError::IOError(format!("open {}: {}", path.display(), e)))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| VoxpadError::IOError(format!("read samples: {}", e)))?,
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| VoxpadError::IOError(format!("read samples: {}", e)))?
        }
    };

    Ok((samples, spec.sample_rate, spec.channels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_wav_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");

        let samples: Vec<f32> = (0..16000)
            .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 16000.0).sin() * 0.5)
            .collect();
        write_wav(&path, &samples, 16000, 1).unwrap();

        let (read, sample_rate, channels) = read_wav(&path).unwrap();
        assert_eq!(sample_rate, 16000);
        assert_eq!(channels, 1);
        assert_eq!(read.len(), samples.len());

        // 16-bit quantization, so compare loosely.
        for (a, b) in read.iter().zip(samples.iter()).step_by(1000) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_wav(Path::new("/nonexistent/file.wav")).unwrap_err();
        assert!(matches!(err, VoxpadError::IOError(_)));
    }
}
