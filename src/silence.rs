//! Frame-energy silence interval detection.

use crate::buffer::AudioBuffer;
use crate::config::SilenceConfig;
use crate::error::Result;
use crate::time::seconds_to_samples;

/// A half-open interval in sample coordinates: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleInterval {
    pub start: usize,
    pub end: usize,
}

impl SampleInterval {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn duration_samples(&self) -> usize {
        self.end - self.start
    }
}

/// Detects non-silence sample intervals in `buffer` using a frame-energy
/// threshold, then merges intervals separated by less than
/// `config.minimum_silence_duration`.
///
/// Per-channel frames are averaged into a mono envelope first: a stereo
/// buffer is silent at a given frame only if both channels are, which
/// matches treating silence as a property of the signal rather than of
/// one channel.
pub fn detect_intervals(buffer: &AudioBuffer, config: &SilenceConfig) -> Result<Vec<SampleInterval>> {
    let raw = non_silence_frames(buffer, config);
    let merge_gap_samples =
        seconds_to_samples(config.minimum_silence_duration, buffer.sample_rate_hz());
    Ok(merge_adjacent(raw, merge_gap_samples))
}

fn non_silence_frames(buffer: &AudioBuffer, config: &SilenceConfig) -> Vec<SampleInterval> {
    let channels = buffer.channels() as usize;
    let frames = buffer.len_samples();
    if frames == 0 {
        return Vec::new();
    }

    let samples = buffer.samples();
    let mono = |frame: usize| -> f32 {
        let base = frame * channels;
        let sum: f32 = samples[base..base + channels].iter().sum();
        sum / channels as f32
    };

    let peak = (0..frames)
        .map(mono)
        .fold(0.0f32, |acc, s| acc.max(s.abs()));
    if peak <= f32::EPSILON {
        // Totally silent buffer: no non-silence intervals at all.
        return Vec::new();
    }

    let threshold = peak * 10f32.powf(-(config.top_db as f32) / 20.0);

    let mut intervals = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut frame_start = 0usize;

    while frame_start < frames {
        let frame_end = (frame_start + config.frame_length).min(frames);
        let rms = {
            let mut sum_sq = 0.0f64;
            for f in frame_start..frame_end {
                let s = mono(f) as f64;
                sum_sq += s * s;
            }
            (sum_sq / (frame_end - frame_start) as f64).sqrt() as f32
        };

        if rms > threshold {
            run_start.get_or_insert(frame_start);
        } else if let Some(start) = run_start.take() {
            intervals.push(SampleInterval::new(start, frame_start));
        }

        if frame_start + config.hop_length >= frames {
            break;
        }
        frame_start += config.hop_length;
    }

    if let Some(start) = run_start {
        intervals.push(SampleInterval::new(start, frames));
    }

    intervals
}

/// Merges intervals whose gap is strictly less than `min_gap_samples`.
fn merge_adjacent(intervals: Vec<SampleInterval>, min_gap_samples: usize) -> Vec<SampleInterval> {
    let mut merged: Vec<SampleInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start.saturating_sub(last.end) < min_gap_samples => {
                last.end = interval.end;
            }
            _ => merged.push(interval),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_from(samples: Vec<f32>) -> AudioBuffer {
        AudioBuffer::new(samples, 16_000, 1).unwrap()
    }

    #[test]
    fn empty_intervals_from_empty_signal_is_empty() {
        let merged = merge_adjacent(Vec::new(), 100);
        assert!(merged.is_empty());
    }

    #[test]
    fn merges_intervals_within_gap() {
        let intervals = vec![
            SampleInterval::new(0, 100),
            SampleInterval::new(150, 300),
            SampleInterval::new(1000, 1100),
        ];
        let merged = merge_adjacent(intervals, 100);
        assert_eq!(
            merged,
            vec![SampleInterval::new(0, 300), SampleInterval::new(1000, 1100)]
        );
    }

    #[test]
    fn does_not_merge_across_large_gap() {
        let intervals = vec![SampleInterval::new(0, 100), SampleInterval::new(500, 600)];
        let merged = merge_adjacent(intervals, 100);
        assert_eq!(merged, intervals);
    }

    #[test]
    fn silent_buffer_yields_no_intervals() {
        let buffer = buffer_from(vec![0.0; 4096]);
        let intervals = detect_intervals(&buffer, &SilenceConfig::default()).unwrap();
        assert!(intervals.is_empty());
    }

    #[test]
    fn loud_buffer_yields_one_spanning_interval() {
        let samples: Vec<f32> = (0..4096)
            .map(|i| (i as f32 * 0.1).sin() * 0.9)
            .collect();
        let buffer = buffer_from(samples);
        let intervals = detect_intervals(&buffer, &SilenceConfig::default()).unwrap();
        assert!(!intervals.is_empty());
        assert_eq!(intervals[0].start, 0);
    }
}
