//! The segment shaper: the heart of this crate.
//!
//! Turns a list of raw non-silence `SampleInterval`s into a final list of
//! `Timestamp`s via, in fixed order: short-segment target-scored merging,
//! overlap padding, and hard-limit filtering with conversion to seconds.

use tracing::{debug, warn};

use crate::config::DurationConfig;
use crate::error::{Error, Result};
use crate::silence::SampleInterval;
use crate::time::samples_to_seconds;

/// A half-open interval in seconds: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timestamp {
    pub start: f64,
    pub end: f64,
}

impl Timestamp {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Runs the full shaping pipeline on `intervals`, producing final
/// timestamps. `buffer_len_samples` bounds overlap padding; `rate` is the
/// buffer's sample rate in Hz.
pub fn shape(
    intervals: Vec<SampleInterval>,
    buffer_len_samples: usize,
    rate: u32,
    config: &DurationConfig,
) -> Result<Vec<Timestamp>> {
    let merged = merge_short_segments(intervals, rate, config);
    let padded = apply_overlap(merged, buffer_len_samples, rate, config.overlap);
    let timestamps = filter_and_convert(padded, rate, config);
    Ok(timestamps)
}

/// Short-segment merging, target-duration scored, with a re-entrant scan.
///
/// Mirrors the reference algorithm exactly: an index walk over a mutable
/// `Vec`, decrementing `i` on a left-merge so the enlarged segment is
/// re-examined, and holding `i` on a right-merge for the same reason.
/// Ties between an admissible left and right merge favor the left.
fn merge_short_segments(
    mut segments: Vec<SampleInterval>,
    rate: u32,
    config: &DurationConfig,
) -> Vec<SampleInterval> {
    if segments.is_empty() {
        return segments;
    }

    let soft_min_samples = (config.soft_lower_limit * rate as f64).round() as usize;
    let hard_max_samples = (config.hard_upper_limit * rate as f64).round() as usize;
    let target_samples =
        (((config.soft_lower_limit + config.soft_upper_limit) / 2.0) * rate as f64).round() as i64;
    let max_gap_samples = (config.maximum_merge_gap_duration * rate as f64).round() as usize;

    let mut i = 0usize;
    while i < segments.len() {
        let duration = segments[i].duration_samples();
        if duration >= soft_min_samples {
            i += 1;
            continue;
        }

        let left_candidate = if i > 0 {
            admissible_merge(segments[i - 1], segments[i], max_gap_samples, hard_max_samples)
                .map(|merged| (merged, score(merged, target_samples)))
        } else {
            None
        };
        let right_candidate = if i + 1 < segments.len() {
            admissible_merge(segments[i], segments[i + 1], max_gap_samples, hard_max_samples)
                .map(|merged| (merged, score(merged, target_samples)))
        } else {
            None
        };

        match (left_candidate, right_candidate) {
            (None, None) => {
                debug!(
                    index = i,
                    duration_samples = duration,
                    "short segment has no admissible merge; leaving for hard-limit filter"
                );
                i += 1;
            }
            (Some((merged, _)), None) => {
                segments[i - 1] = merged;
                segments.remove(i);
                i -= 1;
            }
            (None, Some((merged, _))) => {
                segments[i + 1] = merged;
                segments.remove(i);
            }
            (Some((left_merged, left_score)), Some((right_merged, right_score))) => {
                if left_score <= right_score {
                    segments[i - 1] = left_merged;
                    segments.remove(i);
                    i -= 1;
                } else {
                    segments[i + 1] = right_merged;
                    segments.remove(i);
                }
            }
        }
    }

    segments
}

fn admissible_merge(
    a: SampleInterval,
    b: SampleInterval,
    max_gap_samples: usize,
    hard_max_samples: usize,
) -> Option<SampleInterval> {
    let gap = b.start.saturating_sub(a.end);
    if gap > max_gap_samples {
        return None;
    }
    let merged = SampleInterval::new(a.start, b.end);
    if merged.duration_samples() > hard_max_samples {
        return None;
    }
    Some(merged)
}

fn score(merged: SampleInterval, target_samples: i64) -> i64 {
    (merged.duration_samples() as i64 - target_samples).abs()
}

/// Pads every segment by `overlap / 2` seconds on each side, clamped to
/// `[0, buffer_len_samples)`. Not re-merged afterward: overlap is the
/// intended output shape, not an artifact to clean up.
fn apply_overlap(
    segments: Vec<SampleInterval>,
    buffer_len_samples: usize,
    rate: u32,
    overlap: f64,
) -> Vec<SampleInterval> {
    if overlap <= 0.0 {
        return segments;
    }
    let pad = ((overlap / 2.0) * rate as f64).round() as usize;
    segments
        .into_iter()
        .map(|s| {
            SampleInterval::new(
                s.start.saturating_sub(pad),
                (s.end + pad).min(buffer_len_samples),
            )
        })
        .collect()
}

/// Converts to seconds and discards anything outside `[hard_lower, hard_upper]`.
fn filter_and_convert(
    segments: Vec<SampleInterval>,
    rate: u32,
    config: &DurationConfig,
) -> Vec<Timestamp> {
    segments
        .into_iter()
        .filter_map(|s| {
            let start = samples_to_seconds(s.start, rate);
            let end = samples_to_seconds(s.end, rate);
            let duration = end - start;
            if duration < config.hard_lower_limit {
                debug!(start, end, duration, "discarding segment below hard lower duration limit");
                None
            } else if duration > config.hard_upper_limit {
                warn!(start, end, duration, "discarding oversize segment above hard upper duration limit");
                None
            } else {
                Some(Timestamp { start, end })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> DurationConfig {
        DurationConfig::default()
    }

    #[test]
    fn s1_clean_speech_three_intervals() {
        let rate = 16_000;
        let intervals = vec![
            SampleInterval::new(0, 18 * rate as usize),
            SampleInterval::new(20 * rate as usize, 35 * rate as usize),
            SampleInterval::new(38 * rate as usize, 58 * rate as usize),
        ];
        let out = shape(intervals, 60 * rate as usize, rate, &cfg()).unwrap();
        assert_eq!(out.len(), 3);
        assert!((out[0].start - 0.0).abs() < 1e-6);
        assert!((out[0].end - 18.25).abs() < 1e-6);
        assert!((out[1].start - 19.75).abs() < 1e-6);
        assert!((out[1].end - 35.25).abs() < 1e-6);
        assert!((out[2].start - 37.75).abs() < 1e-6);
        // 58s + pad(0.25s) = 58.25s; well under the 60s buffer bound, so unclamped.
        assert!((out[2].end - 58.25).abs() < 1e-6);
    }

    #[test]
    fn s2_short_tail_merged_left() {
        let rate = 16_000;
        let intervals = vec![
            SampleInterval::new(0, (12.0 * rate as f64) as usize),
            SampleInterval::new((12.5 * rate as f64) as usize, (13.0 * rate as f64) as usize),
        ];
        let out = shape(intervals, 60 * rate as usize, rate, &cfg()).unwrap();
        assert_eq!(out.len(), 1);
        assert!((out[0].start - 0.0).abs() < 1e-6);
        assert!((out[0].end - 13.25).abs() < 1e-6);
    }

    #[test]
    fn s3_unmergeable_short_segment_discarded() {
        let rate = 16_000;
        let intervals = vec![
            SampleInterval::new(0, (12.0 * rate as f64) as usize),
            SampleInterval::new((20.0 * rate as f64) as usize, (20.3 * rate as f64) as usize),
        ];
        let out = shape(intervals, 60 * rate as usize, rate, &cfg()).unwrap();
        assert_eq!(out.len(), 1);
        assert!((out[0].start - 0.0).abs() < 1e-6);
    }

    #[test]
    fn s4_oversize_interval_is_discarded_not_split() {
        let rate = 16_000;
        let intervals = vec![SampleInterval::new(0, (45.0 * rate as f64) as usize)];
        let out = shape(intervals, 60 * rate as usize, rate, &cfg()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn overlap_padding_never_exceeds_buffer_bounds() {
        let rate = 16_000;
        let intervals = vec![SampleInterval::new(0, (11.0 * rate as f64) as usize)];
        let out = shape(intervals.clone(), (11.0 * rate as f64) as usize, rate, &cfg()).unwrap();
        assert!(out[0].start >= 0.0);
        assert!(out[0].end <= 11.0 + 1e-6);
    }

    #[test]
    fn zero_overlap_produces_disjoint_segments() {
        let rate = 16_000;
        let mut config = cfg();
        config.overlap = 0.0;
        let intervals = vec![
            SampleInterval::new(0, (11.0 * rate as f64) as usize),
            SampleInterval::new((12.0 * rate as f64) as usize, (23.0 * rate as f64) as usize),
        ];
        let out = shape(intervals, 60 * rate as usize, rate, &config).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0].end <= out[1].start);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out = shape(Vec::new(), 16_000, 16_000, &cfg()).unwrap();
        assert!(out.is_empty());
    }
}
