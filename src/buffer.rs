//! Owned, validated PCM sample storage.

use crate::error::{Error, Result};

/// A dense buffer of normalized floating-point PCM samples at a fixed
/// sample rate and channel count, interleaved when `channels > 1`.
///
/// Construction enforces the data-model invariants from the top of this
/// crate's design: non-empty, all-finite, at least one sample. Folding
/// that validation into the constructor means every `AudioBuffer` in
/// scope is already known-good; no other module needs to re-check it.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate_hz: u32,
    channels: u8,
}

impl AudioBuffer {
    /// Builds a buffer from already-decoded interleaved samples.
    ///
    /// Fails with [`Error::AudioData`] if `samples` is empty, contains a
    /// non-finite value, `sample_rate_hz` is zero, or `channels` is zero.
    pub fn new(samples: Vec<f32>, sample_rate_hz: u32, channels: u8) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::AudioData {
                details: "audio buffer is empty".to_string(),
            });
        }
        if let Some(bad) = samples.iter().find(|s| !s.is_finite()) {
            return Err(Error::AudioData {
                details: format!("audio buffer contains a non-finite sample: {bad}"),
            });
        }
        if sample_rate_hz == 0 {
            return Err(Error::AudioData {
                details: "sample rate must be positive".to_string(),
            });
        }
        if channels == 0 {
            return Err(Error::AudioData {
                details: "channel count must be positive".to_string(),
            });
        }
        Ok(Self {
            samples,
            sample_rate_hz,
            channels,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Number of per-channel frames (`samples.len() / channels`).
    pub fn len_samples(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration_seconds(&self) -> f64 {
        crate::time::samples_to_seconds(self.len_samples(), self.sample_rate_hz)
    }

    /// Borrows the per-channel-frame slice `[start, end)` interleaved.
    ///
    /// Panics if `end > len_samples()` or `start > end`; callers validate
    /// timestamps before slicing (see `strategy::SilenceStrategy`).
    pub fn slice(&self, start: usize, end: usize) -> &[f32] {
        let channels = self.channels as usize;
        &self.samples[start * channels..end * channels]
    }
}
