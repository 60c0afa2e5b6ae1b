//! The strategy façade: binds the silence detector and shaper together and
//! exposes the four user-facing segmentation operations.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::buffer::AudioBuffer;
use crate::config::{AudioConfig, DurationConfig, FileConfig, SilenceConfig};
use crate::error::{Error, Result};
use crate::filename::format_filename;
use crate::manifest::Manifest;
use crate::path::{build_output_directory, build_path};
use crate::shaper::{self, Timestamp};
use crate::silence;
use crate::time::seconds_to_samples;
use crate::{loader, writer};

/// A pluggable segmentation strategy.
///
/// The shaper is independent of any particular interval source; a
/// strategy is anything that can turn a buffer into timestamps (and,
/// transitively, into written files). A pass-through strategy that yields
/// one interval spanning the whole buffer is a useful test double —
/// see the crate's integration tests.
pub trait SegmentationStrategy {
    fn segment_array_to_timestamps(&self, buffer: &AudioBuffer) -> Result<Vec<Timestamp>>;

    fn segment_array_to_files(
        &self,
        buffer: &AudioBuffer,
        original_name: &str,
    ) -> Result<Vec<(String, PathBuf)>>;

    fn segment_file_to_timestamps(&self, path: &Path) -> Result<Vec<Timestamp>>;

    fn segment_file_to_files(&self, path: &Path) -> Result<Vec<(String, PathBuf)>>;
}

/// The canonical strategy: silence-interval detection followed by the
/// target-scored shaping pipeline.
pub struct SilenceStrategy {
    audio: AudioConfig,
    duration: DurationConfig,
    file: FileConfig,
    silence: SilenceConfig,
}

impl SilenceStrategy {
    pub fn new(
        audio: AudioConfig,
        duration: DurationConfig,
        file: FileConfig,
        silence: SilenceConfig,
    ) -> Self {
        Self {
            audio,
            duration,
            file,
            silence,
        }
    }

    fn timestamps_for(&self, buffer: &AudioBuffer) -> Result<Vec<Timestamp>> {
        self.duration.validate()?;
        self.silence.validate()?;

        let intervals = silence::detect_intervals(buffer, &self.silence).map_err(|e| {
            Error::Strategy {
                strategy_name: "silence".to_string(),
                reason: e.to_string(),
            }
        })?;

        let timestamps = shaper::shape(
            intervals,
            buffer.len_samples(),
            buffer.sample_rate_hz(),
            &self.duration,
        )?;

        if timestamps.is_empty() {
            return Err(Error::EmptySegmentation {
                reason: "no segments survived shaping".to_string(),
            });
        }

        info!(count = timestamps.len(), "shaped segments");
        Ok(timestamps)
    }

    fn write_segments(
        &self,
        buffer: &AudioBuffer,
        original_name: &str,
        timestamps: &[Timestamp],
    ) -> Result<Vec<(String, PathBuf)>> {
        let mut result = Vec::with_capacity(timestamps.len());
        let rate = buffer.sample_rate_hz();
        let buffer_duration = buffer.duration_seconds();

        for (index, ts) in timestamps.iter().enumerate() {
            validate_timestamp(ts, buffer_duration)?;

            let segment_dir = build_output_directory(
                Path::new(&self.file.output_directory),
                self.file.output_in_subdirectory,
                self.file.output_segment_in_subdirectory,
                Some(original_name),
                Some(index),
            )?;

            let segment_filename = format_filename(
                original_name,
                index,
                &self.file.name_template,
                self.file.file_format,
            )?;
            let segment_path = build_path(&segment_dir, &segment_filename);

            let start_sample = seconds_to_samples(ts.start, rate);
            let end_sample = seconds_to_samples(ts.end, rate);
            let slice = buffer.slice(start_sample, end_sample);

            writer::write_segment(&segment_path, slice, rate, buffer.channels())?;
            debug!(index, path = %segment_path.display(), "wrote segment");

            if self.file.generate_manifest {
                let manifest_filename = format_filename(
                    original_name,
                    index,
                    &self.file.manifest_name_template,
                    crate::config::FileType::Json,
                )?;
                let manifest_path = build_path(&segment_dir, &manifest_filename);
                let manifest = Manifest {
                    original_file: original_name.to_string(),
                    index,
                    segment_file: segment_path.to_string_lossy().into_owned(),
                    start_time: ts.start,
                    end_time: ts.end,
                };
                manifest.write_to(&manifest_path)?;
            }

            result.push((segment_filename, segment_path));
        }

        Ok(result)
    }
}

fn validate_timestamp(ts: &Timestamp, buffer_duration: f64) -> Result<()> {
    if ts.start < 0.0 || ts.end < 0.0 {
        return Err(Error::InvalidTimestamp {
            start: ts.start,
            end: ts.end,
            reason: "timestamps must be non-negative".to_string(),
        });
    }
    if ts.start >= ts.end {
        return Err(Error::InvalidTimestamp {
            start: ts.start,
            end: ts.end,
            reason: "Start time must be before end time".to_string(),
        });
    }
    if ts.end > buffer_duration {
        return Err(Error::InvalidTimestamp {
            start: ts.start,
            end: ts.end,
            reason: format!("end time exceeds buffer duration ({buffer_duration}s)"),
        });
    }
    Ok(())
}

impl SegmentationStrategy for SilenceStrategy {
    fn segment_array_to_timestamps(&self, buffer: &AudioBuffer) -> Result<Vec<Timestamp>> {
        self.timestamps_for(buffer)
    }

    fn segment_array_to_files(
        &self,
        buffer: &AudioBuffer,
        original_name: &str,
    ) -> Result<Vec<(String, PathBuf)>> {
        let timestamps = self.timestamps_for(buffer)?;
        self.write_segments(buffer, original_name, &timestamps)
    }

    fn segment_file_to_timestamps(&self, path: &Path) -> Result<Vec<Timestamp>> {
        let buffer = loader::load_audio(path, &self.audio)?;
        self.timestamps_for(&buffer)
    }

    fn segment_file_to_files(&self, path: &Path) -> Result<Vec<(String, PathBuf)>> {
        let buffer = loader::load_audio(path, &self.audio)?;
        let original_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Configuration {
                setting_name: "path".to_string(),
                value: path.display().to_string(),
                reason: "path has no file stem to use as original_name".to_string(),
            })?;
        let timestamps = self.timestamps_for(&buffer)?;
        self.write_segments(&buffer, &original_name, &timestamps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PassThroughStrategy {
        duration: DurationConfig,
    }

    impl SegmentationStrategy for PassThroughStrategy {
        fn segment_array_to_timestamps(&self, buffer: &AudioBuffer) -> Result<Vec<Timestamp>> {
            let _ = &self.duration;
            Ok(vec![Timestamp {
                start: 0.0,
                end: buffer.duration_seconds(),
            }])
        }

        fn segment_array_to_files(
            &self,
            _buffer: &AudioBuffer,
            _original_name: &str,
        ) -> Result<Vec<(String, PathBuf)>> {
            unimplemented!("test double, timestamps only")
        }

        fn segment_file_to_timestamps(&self, _path: &Path) -> Result<Vec<Timestamp>> {
            unimplemented!("test double, array only")
        }

        fn segment_file_to_files(&self, _path: &Path) -> Result<Vec<(String, PathBuf)>> {
            unimplemented!("test double, array only")
        }
    }

    #[test]
    fn pass_through_strategy_spans_whole_buffer() {
        let buffer = AudioBuffer::new(vec![0.0; 16_000], 16_000, 1).unwrap();
        let strategy = PassThroughStrategy {
            duration: DurationConfig::default(),
        };
        let timestamps = strategy.segment_array_to_timestamps(&buffer).unwrap();
        assert_eq!(timestamps.len(), 1);
        assert_eq!(timestamps[0].start, 0.0);
        assert!((timestamps[0].end - 1.0).abs() < 1e-6);
    }

    #[test]
    fn s5_invalid_timestamp_rejected() {
        let ts = Timestamp {
            start: 5.0,
            end: 3.0,
        };
        let err = validate_timestamp(&ts, 60.0).unwrap_err();
        match err {
            Error::InvalidTimestamp { start, end, reason } => {
                assert_eq!(start, 5.0);
                assert_eq!(end, 3.0);
                assert_eq!(reason, "Start time must be before end time");
            }
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn rejects_timestamp_past_buffer_duration() {
        let ts = Timestamp {
            start: 0.0,
            end: 61.0,
        };
        assert!(validate_timestamp(&ts, 60.0).is_err());
    }

    #[test]
    fn s4_oversize_segmentation_raises_empty_segmentation_error() {
        let strategy = SilenceStrategy::new(
            AudioConfig::default(),
            DurationConfig::default(),
            FileConfig::default(),
            SilenceConfig::default(),
        );
        // A loud buffer with a single run spanning 45s (> hard_upper=30s)
        // at 16kHz is discarded in the hard-limit filter with nothing left.
        let rate = 16_000u32;
        let samples: Vec<f32> = (0..(45 * rate as usize))
            .map(|i| (i as f32 * 0.05).sin() * 0.9)
            .collect();
        let buffer = AudioBuffer::new(samples, rate, 1).unwrap();
        let err = strategy.segment_array_to_timestamps(&buffer).unwrap_err();
        assert!(matches!(err, Error::EmptySegmentation { .. }));
    }

    #[test]
    fn write_segments_preserves_insertion_order_past_ten_segments() {
        let tmp = tempfile::tempdir().unwrap();
        let mut file_config = FileConfig::default();
        file_config.output_directory = tmp.path().to_string_lossy().into_owned();
        file_config.output_in_subdirectory = false;

        let strategy = SilenceStrategy::new(
            AudioConfig::default(),
            DurationConfig::default(),
            file_config,
            SilenceConfig::default(),
        );

        let rate = 16_000u32;
        // 12 one-second segments spaced two seconds apart: with the default
        // `{original_name}_segment_{segment_index}` template, "segment_10"
        // and "segment_11" sort before "segment_2" under string ordering,
        // so a BTreeMap would silently reorder this result.
        let timestamps: Vec<Timestamp> = (0..12)
            .map(|i| Timestamp {
                start: i as f64 * 2.0,
                end: i as f64 * 2.0 + 1.0,
            })
            .collect();
        let buffer = AudioBuffer::new(vec![0.0f32; 25 * rate as usize], rate, 1).unwrap();

        let result = strategy
            .write_segments(&buffer, "clip", &timestamps)
            .unwrap();

        let expected: Vec<String> = (0..12).map(|i| format!("clip_segment_{i}.wav")).collect();
        let actual: Vec<String> = result.iter().map(|(name, _)| name.clone()).collect();
        assert_eq!(actual, expected);
    }
}
