//! Segment encoding: writes a sample slice to a target path in a chosen
//! container format.

use std::path::Path;

use crate::error::{Error, Result};

/// One container's encode-and-write step.
///
/// Implementations are selected by the target path's extension in
/// [`write_segment`]; each is feature-gated except [`WavContainer`], which
/// is always available so the default build has at least one working
/// writer.
trait SegmentContainer {
    fn write(&self, path: &Path, samples: &[f32], rate: u32, channels: u8) -> Result<()>;
}

/// Writes `samples` (interleaved, at `rate` Hz, `channels` channels) to
/// `path`, dispatching on the path's extension.
///
/// Rejects an empty slice or non-positive rate with [`Error::AudioData`]
/// before touching the filesystem; creates the parent directory; wraps
/// any encoder failure as [`Error::SegmentWrite`].
pub fn write_segment(path: &Path, samples: &[f32], rate: u32, channels: u8) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::AudioData {
            details: "cannot write an empty segment".to_string(),
        });
    }
    if rate == 0 {
        return Err(Error::AudioData {
            details: "sample rate must be positive".to_string(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::SegmentWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    match extension.as_str() {
        "wav" => WavContainer.write(path, samples, rate, channels),
        #[cfg(feature = "mp3")]
        "mp3" => Mp3Container.write(path, samples, rate, channels),
        #[cfg(feature = "flac")]
        "flac" => FlacContainer.write(path, samples, rate, channels),
        #[cfg(feature = "aac")]
        "aac" => AacContainer.write(path, samples, rate, channels),
        other => Err(Error::SegmentWrite {
            path: path.to_path_buf(),
            reason: format!("unsupported or not-enabled container: '{other}'"),
        }),
    }
}

struct WavContainer;

impl SegmentContainer for WavContainer {
    fn write(&self, path: &Path, samples: &[f32], rate: u32, channels: u8) -> Result<()> {
        let spec = hound::WavSpec {
            channels: channels as u16,
            sample_rate: rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).map_err(|e| Error::SegmentWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        for &sample in samples {
            writer.write_sample(sample).map_err(|e| Error::SegmentWrite {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
        writer.finalize().map_err(|e| Error::SegmentWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(feature = "mp3")]
struct Mp3Container;

#[cfg(feature = "mp3")]
impl SegmentContainer for Mp3Container {
    fn write(&self, path: &Path, samples: &[f32], rate: u32, channels: u8) -> Result<()> {
        use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, InterleavedPcm, MonoPcm, Quality};

        let pcm: Vec<i16> = samples
            .iter()
            .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
            .collect();

        let mut builder = Builder::new().ok_or_else(|| Error::SegmentWrite {
            path: path.to_path_buf(),
            reason: "failed to initialize MP3 encoder".to_string(),
        })?;
        builder.set_sample_rate(rate).map_err(|e| mp3_error(path, e))?;
        builder
            .set_num_channels(channels)
            .map_err(|e| mp3_error(path, e))?;
        builder
            .set_brate(Bitrate::Kbps128)
            .map_err(|e| mp3_error(path, e))?;
        builder
            .set_quality(Quality::VeryNice)
            .map_err(|e| mp3_error(path, e))?;

        let mut encoder = builder.build().map_err(|e| mp3_error(path, e))?;
        let mut output = Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(pcm.len()));

        match channels {
            1 => encoder
                .encode_to_vec(MonoPcm(&pcm), &mut output)
                .map_err(|e| mp3_error(path, e))?,
            _ => encoder
                .encode_to_vec(InterleavedPcm(&pcm), &mut output)
                .map_err(|e| mp3_error(path, e))?,
        };
        encoder
            .flush_to_vec::<FlushNoGap>(&mut output)
            .map_err(|e| mp3_error(path, e))?;

        std::fs::write(path, output).map_err(|e| Error::SegmentWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(feature = "mp3")]
fn mp3_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::SegmentWrite {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(feature = "flac")]
struct FlacContainer;

#[cfg(feature = "flac")]
impl SegmentContainer for FlacContainer {
    fn write(&self, path: &Path, samples: &[f32], rate: u32, channels: u8) -> Result<()> {
        use flacenc::component::BitRepr;
        use flacenc::config::Encoder as FlacEncoderConfig;
        use flacenc::error::Verify;
        use flacenc::source::MemSource;

        let pcm: Vec<i32> = samples
            .iter()
            .map(|s| (s.clamp(-1.0, 1.0) * i32::from(i16::MAX) as f32) as i32)
            .collect();

        let source = MemSource::from_samples(&pcm, channels as usize, 16, rate as usize);
        let config = FlacEncoderConfig::default()
            .into_verified()
            .map_err(|(_, e)| Error::SegmentWrite {
                path: path.to_path_buf(),
                reason: format!("invalid FLAC encoder configuration: {e:?}"),
            })?;

        let flac_stream =
            flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
                .map_err(|e| Error::SegmentWrite {
                    path: path.to_path_buf(),
                    reason: format!("FLAC encode failed: {e:?}"),
                })?;

        let mut sink = flacenc::bitsink::ByteSink::new();
        flac_stream
            .write(&mut sink)
            .map_err(|e| Error::SegmentWrite {
                path: path.to_path_buf(),
                reason: format!("FLAC bitstream write failed: {e:?}"),
            })?;

        std::fs::write(path, sink.as_slice()).map_err(|e| Error::SegmentWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(feature = "aac")]
struct AacContainer;

#[cfg(feature = "aac")]
impl SegmentContainer for AacContainer {
    fn write(&self, path: &Path, samples: &[f32], rate: u32, channels: u8) -> Result<()> {
        use fdk_aac::enc::{Encoder, EncoderParams, ChannelMode, Transport};

        let params = EncoderParams {
            bit_rate: fdk_aac::enc::BitRate::Cbr(128_000),
            sample_rate: rate,
            transport: Transport::Adts,
            channels: if channels == 1 {
                ChannelMode::Mono
            } else {
                ChannelMode::Stereo
            },
        };
        let mut encoder = Encoder::new(params).map_err(|e| Error::SegmentWrite {
            path: path.to_path_buf(),
            reason: format!("failed to initialize AAC encoder: {e:?}"),
        })?;

        let pcm: Vec<i16> = samples
            .iter()
            .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
            .collect();

        let mut output = Vec::new();
        let mut scratch = vec![0u8; 4096];
        for chunk in pcm.chunks(2048) {
            let result = encoder
                .encode(chunk, &mut scratch)
                .map_err(|e| Error::SegmentWrite {
                    path: path.to_path_buf(),
                    reason: format!("AAC encode failed: {e:?}"),
                })?;
            output.extend_from_slice(&scratch[..result.output_size]);
        }

        std::fs::write(path, output).map_err(|e| Error::SegmentWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
