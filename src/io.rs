//! Audio file I/O
//!
//! WAV decode and encode via hound. Import accepts mono/stereo files at
//! 8/16/24/32-bit integer or 32-bit float depth and normalizes samples
//! to f32; the file's own sample rate is kept as-is (no resampling, so
//! everything spliced into one output must agree on rate). Export
//! writes 16-bit PCM at the buffer's rate.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::info;

use crate::buffer::AudioBuffer;
use crate::error::{LoopsmithError, Result};

fn load_error(path: &Path, reason: impl ToString) -> LoopsmithError {
    LoopsmithError::LoadError {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn encode_error(path: &Path, reason: impl ToString) -> LoopsmithError {
    LoopsmithError::EncodeError {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Decode a WAV file into an [`AudioBuffer`].
pub fn import_audio(path: &Path) -> Result<AudioBuffer> {
    info!("Loading source audio file from '{}'", path.display());

    if !path.exists() {
        return Err(load_error(path, "file not found"));
    }

    let reader = WavReader::open(path)
        .map_err(|e| load_error(path, format!("failed to open WAV file: {}", e)))?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 || channels > 2 {
        return Err(load_error(
            path,
            format!("{}-channel audio (only mono/stereo supported)", channels),
        ));
    }

    let samples = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)
        .map_err(|reason| load_error(path, reason))?;

    AudioBuffer::from_interleaved(samples, channels, spec.sample_rate)
        .map_err(|e| load_error(path, e))
}

/// Encode an [`AudioBuffer`] as a 16-bit PCM WAV file.
pub fn export_audio(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    info!("Writing output audio to '{}'", path.display());

    let spec = WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| encode_error(path, e))?;

    for &sample in buffer.samples() {
        let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer
            .write_sample(scaled)
            .map_err(|e| encode_error(path, e))?;
    }

    writer.finalize().map_err(|e| encode_error(path, e))
}

/// Read samples from a WAV reader and normalize to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> std::result::Result<Vec<f32>, String> {
    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| format!("failed to read float samples: {}", e)),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / 128.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| format!("failed to read 8-bit samples: {}", e)),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / 32768.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| format!("failed to read 16-bit samples: {}", e)),
            24 => {
                // 24-bit stored as i32 in hound
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / 8388608.0))
                    .collect::<std::result::Result<Vec<f32>, _>>()
                    .map_err(|e| format!("failed to read 24-bit samples: {}", e))
            }
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 2147483648.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| format!("failed to read 32-bit int samples: {}", e)),
            other => Err(format!("{}-bit integer audio is not supported", other)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sine_buffer(frequency: f32, secs: f32, sample_rate: u32) -> AudioBuffer {
        let num_frames = (secs * sample_rate as f32) as usize;
        let angular = 2.0 * std::f32::consts::PI * frequency / sample_rate as f32;
        let samples = (0..num_frames).map(|i| (angular * i as f32).sin()).collect();
        AudioBuffer::from_interleaved(samples, 1, sample_rate).unwrap()
    }

    #[test]
    fn test_round_trip_mono() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let original = sine_buffer(440.0, 0.5, 44100);
        export_audio(&original, &path).unwrap();
        let imported = import_audio(&path).unwrap();

        assert_eq!(imported.num_frames(), original.num_frames());
        assert_eq!(imported.num_channels(), 1);
        assert_eq!(imported.sample_rate(), 44100);

        for (orig, imp) in original.samples().iter().zip(imported.samples()) {
            // 16-bit quantization error
            assert!(
                (orig - imp).abs() < 0.001,
                "Sample mismatch: {} vs {}",
                orig,
                imp
            );
        }
    }

    #[test]
    fn test_round_trip_stereo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        let samples: Vec<f32> = (0..2000)
            .flat_map(|i| {
                let t = i as f32 / 8000.0;
                [(t * 440.0).sin() * 0.5, (t * 880.0).sin() * 0.5]
            })
            .collect();
        let original = AudioBuffer::from_interleaved(samples, 2, 8000).unwrap();

        export_audio(&original, &path).unwrap();
        let imported = import_audio(&path).unwrap();

        assert_eq!(imported.num_channels(), 2);
        assert_eq!(imported.num_frames(), original.num_frames());
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_audio(Path::new("/nonexistent/path/audio.wav"));
        match result.unwrap_err() {
            LoopsmithError::LoadError { path, .. } => {
                assert!(path.to_string_lossy().contains("nonexistent"));
            }
            other => panic!("Expected LoadError, got: {:?}", other),
        }
    }

    #[test]
    fn test_import_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("not_audio.wav");
        std::fs::write(&path, b"definitely not a wav file").unwrap();

        assert!(matches!(
            import_audio(&path),
            Err(LoopsmithError::LoadError { .. })
        ));
    }
}
