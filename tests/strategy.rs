//! End-to-end tests over the strategy façade: write a synthetic WAV
//! fixture, run it through the full silence-detect → shape → write
//! pipeline, and check the files and manifests it produces.

use segmenter::config::{AudioConfig, DurationConfig, FileConfig, FileType, SilenceConfig};
use segmenter::strategy::{SegmentationStrategy, SilenceStrategy};

fn write_fixture_wav(path: &std::path::Path, rate: u32, seconds_of_tone: f64, seconds_of_silence: f64) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();

    let tone_frames = (seconds_of_tone * rate as f64) as usize;
    for i in 0..tone_frames {
        let sample = (i as f32 * 0.05).sin() * 0.9;
        writer.write_sample(sample).unwrap();
    }
    let silence_frames = (seconds_of_silence * rate as f64) as usize;
    for _ in 0..silence_frames {
        writer.write_sample(0.0f32).unwrap();
    }
    for i in 0..tone_frames {
        let sample = (i as f32 * 0.05).sin() * 0.9;
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn segments_a_clean_tone_file_into_files_and_manifests() {
    let tmp = tempfile::tempdir().unwrap();
    let input_path = tmp.path().join("clip.wav");
    write_fixture_wav(&input_path, 16_000, 12.0, 0.2);

    let mut file_config = FileConfig::default();
    file_config.output_directory = tmp.path().join("output").to_string_lossy().into_owned();
    file_config.output_in_subdirectory = false;
    file_config.file_format = FileType::Wav;

    let strategy = SilenceStrategy::new(
        AudioConfig::default(),
        DurationConfig::default(),
        file_config,
        SilenceConfig::default(),
    );

    let result = strategy.segment_file_to_files(&input_path).unwrap();
    assert!(!result.is_empty());

    for (filename, path) in &result {
        assert!(path.is_file(), "expected {filename} to exist at {path:?}");
    }
}

#[test]
fn timestamps_only_variant_skips_disk_writes() {
    let tmp = tempfile::tempdir().unwrap();
    let input_path = tmp.path().join("clip.wav");
    write_fixture_wav(&input_path, 16_000, 12.0, 0.2);

    let strategy = SilenceStrategy::new(
        AudioConfig::default(),
        DurationConfig::default(),
        FileConfig::default(),
        SilenceConfig::default(),
    );

    let timestamps = strategy.segment_file_to_timestamps(&input_path).unwrap();
    assert!(!timestamps.is_empty());
    for ts in &timestamps {
        assert!(ts.start < ts.end);
    }
}

#[test]
fn generate_manifest_false_skips_manifest_files() {
    let tmp = tempfile::tempdir().unwrap();
    let input_path = tmp.path().join("clip.wav");
    write_fixture_wav(&input_path, 16_000, 12.0, 0.2);

    let mut file_config = FileConfig::default();
    file_config.output_directory = tmp.path().join("output").to_string_lossy().into_owned();
    file_config.generate_manifest = false;

    let strategy = SilenceStrategy::new(
        AudioConfig::default(),
        DurationConfig::default(),
        file_config,
        SilenceConfig::default(),
    );

    let result = strategy.segment_file_to_files(&input_path).unwrap();
    assert!(result.iter().all(|(name, _)| !name.ends_with(".json")));
}
