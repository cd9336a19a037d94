//! Audio buffer type for timeline composition
//!
//! Samples are stored in interleaved format: [L0, R0, L1, R1, ...]
//! This matches common audio file formats and simplifies I/O.
//!
//! Buffers are immutable once built. All composition operations
//! (`slice`, `concat`, `append_with_crossfade`) return new buffers and
//! never touch their operands, so source buffers stay pristine however
//! many outputs are rendered from them.
//!
//! Time is measured in seconds (f64) at the API boundary and floored to
//! the frame grid internally. Flooring is applied in one direction
//! everywhere so repeated conversions cannot drift across a long recipe.

use crate::error::{LoopsmithError, Result};

/// Interleaved audio buffer
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    /// Interleaved sample data
    samples: Vec<f32>,
    /// Number of channels (1 = mono, 2 = stereo)
    num_channels: usize,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create an empty buffer with the given format.
    ///
    /// The empty buffer is the identity for `concat`: splicing onto it
    /// adopts the other operand's format.
    pub fn empty(num_channels: usize, sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            num_channels,
            sample_rate,
        }
    }

    /// Create a buffer from existing interleaved samples
    pub fn from_interleaved(
        samples: Vec<f32>,
        num_channels: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if num_channels == 0 {
            return Err(LoopsmithError::FormatMismatch {
                expected: "at least one channel".to_string(),
                found: "zero channels".to_string(),
            });
        }
        if samples.len() % num_channels != 0 {
            return Err(LoopsmithError::FormatMismatch {
                expected: format!("sample count divisible by {} channels", num_channels),
                found: format!("{} samples", samples.len()),
            });
        }
        Ok(Self {
            samples,
            num_channels,
            sample_rate,
        })
    }

    /// Number of channels
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Number of frames (samples per channel)
    pub fn num_frames(&self) -> usize {
        self.samples.len() / self.num_channels
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Exact duration in seconds, derived from frame count and rate
    pub fn duration(&self) -> f64 {
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// True if the buffer holds no audio
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get a reference to all interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Convert a time offset to a frame index, flooring to the grid
    fn frame_at(&self, secs: f64) -> usize {
        (secs * self.sample_rate as f64).floor() as usize
    }

    fn format_label(&self) -> String {
        format!("{}ch @ {}Hz", self.num_channels, self.sample_rate)
    }

    fn check_format(&self, other: &AudioBuffer) -> Result<()> {
        if self.num_channels != other.num_channels || self.sample_rate != other.sample_rate {
            return Err(LoopsmithError::FormatMismatch {
                expected: self.format_label(),
                found: other.format_label(),
            });
        }
        Ok(())
    }

    /// Extract the region `[start_secs, end_secs)` as a new buffer.
    ///
    /// Both endpoints are floored to the frame grid. Fails with
    /// `SliceOutOfRange` if either falls outside `[0, duration]` or the
    /// region is inverted.
    pub fn slice(&self, start_secs: f64, end_secs: f64) -> Result<AudioBuffer> {
        if start_secs < 0.0 || end_secs < 0.0 || start_secs > end_secs {
            return Err(LoopsmithError::SliceOutOfRange {
                start_secs,
                end_secs,
                duration_secs: self.duration(),
            });
        }
        let start_frame = self.frame_at(start_secs);
        let end_frame = self.frame_at(end_secs);
        if end_frame > self.num_frames() || start_frame > end_frame {
            return Err(LoopsmithError::SliceOutOfRange {
                start_secs,
                end_secs,
                duration_secs: self.duration(),
            });
        }
        let lo = start_frame * self.num_channels;
        let hi = end_frame * self.num_channels;
        Ok(AudioBuffer {
            samples: self.samples[lo..hi].to_vec(),
            num_channels: self.num_channels,
            sample_rate: self.sample_rate,
        })
    }

    /// Append `other` after `self`, sample-exact, no gain change.
    pub fn concat(&self, other: &AudioBuffer) -> Result<AudioBuffer> {
        // Empty operands are format-neutral.
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        self.check_format(other)?;
        let mut samples = Vec::with_capacity(self.samples.len() + other.samples.len());
        samples.extend_from_slice(&self.samples);
        samples.extend_from_slice(&other.samples);
        Ok(AudioBuffer {
            samples,
            num_channels: self.num_channels,
            sample_rate: self.sample_rate,
        })
    }

    /// Append `other` after `self`, blending the seam with a linear
    /// crossfade of `crossfade_secs`.
    ///
    /// The final `crossfade_secs` of `self` fade out while the first
    /// `crossfade_secs` of `other` fade in; the rest of `other` follows
    /// untouched. A zero crossfade behaves exactly like `concat`.
    ///
    /// Fails with `CrossfadeTooLong` if the crossfade exceeds the
    /// duration of either operand. Callers clamp against the audio they
    /// actually have before calling.
    pub fn append_with_crossfade(
        &self,
        other: &AudioBuffer,
        crossfade_secs: f64,
    ) -> Result<AudioBuffer> {
        if crossfade_secs < 0.0 {
            return Err(LoopsmithError::CrossfadeTooLong {
                crossfade_secs,
                duration_secs: self.duration(),
            });
        }
        if self.is_empty() || other.is_empty() {
            // Nothing to blend against; same as concat, which also
            // keeps the empty result buffer format-neutral.
            return self.concat(other);
        }
        self.check_format(other)?;

        let fade_frames = self.frame_at(crossfade_secs);
        if fade_frames == 0 {
            return self.concat(other);
        }
        if fade_frames > self.num_frames() {
            return Err(LoopsmithError::CrossfadeTooLong {
                crossfade_secs,
                duration_secs: self.duration(),
            });
        }
        if fade_frames > other.num_frames() {
            return Err(LoopsmithError::CrossfadeTooLong {
                crossfade_secs,
                duration_secs: other.duration(),
            });
        }

        let channels = self.num_channels;
        let overlap_start = (self.num_frames() - fade_frames) * channels;
        let total = self.samples.len() + other.samples.len() - fade_frames * channels;
        let mut samples = Vec::with_capacity(total);
        samples.extend_from_slice(&self.samples[..overlap_start]);

        // Outgoing tail fades 1 -> 0 while the incoming head fades 0 -> 1.
        for frame in 0..fade_frames {
            let alpha = frame as f32 / fade_frames as f32;
            for ch in 0..channels {
                let tail = self.samples[overlap_start + frame * channels + ch];
                let head = other.samples[frame * channels + ch];
                samples.push(tail * (1.0 - alpha) + head * alpha);
            }
        }

        samples.extend_from_slice(&other.samples[fade_frames * channels..]);
        Ok(AudioBuffer {
            samples,
            num_channels: channels,
            sample_rate: self.sample_rate,
        })
    }
}
