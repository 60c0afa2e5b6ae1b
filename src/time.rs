//! Sample/second conversions shared by every other module.
//!
//! Both directions round to the nearest integer sample (matching
//! `original_source`'s `seconds_to_samples = round(seconds * sample_rate)`)
//! rather than truncating, so a round-trip through `samples_to_seconds` and
//! back lands on the same sample index for any rate in practical use.

/// Converts a duration in seconds to a sample count at `sample_rate_hz`.
pub fn seconds_to_samples(seconds: f64, sample_rate_hz: u32) -> usize {
    (seconds * sample_rate_hz as f64).round().max(0.0) as usize
}

/// Converts a sample count at `sample_rate_hz` to a duration in seconds.
pub fn samples_to_seconds(samples: usize, sample_rate_hz: u32) -> f64 {
    samples as f64 / sample_rate_hz as f64
}
