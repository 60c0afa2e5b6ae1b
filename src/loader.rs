//! Decodes a file on disk into an [`AudioBuffer`] at a target sample rate
//! and channel count.

use std::fs::File;
use std::path::Path;

use rubato::{Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction};
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};

use crate::buffer::AudioBuffer;
use crate::config::AudioConfig;
use crate::demux;
use crate::error::{Error, Result};

/// Loads `path`, decoding it to `config.channels` channels at
/// `config.sample_rate_hz`, resampling if the source rate differs.
///
/// Errors are classified per this crate's loader contract:
/// - [`Error::AudioLoad`] — the file couldn't be opened or probed.
/// - [`Error::AudioFormat`] — probing succeeded but the codec/container
///   failed for what looks like a format reason.
/// - [`Error::AudioData`] — decoding produced no usable samples.
pub fn load_audio(path: &Path, config: &AudioConfig) -> Result<AudioBuffer> {
    let file = File::open(path).map_err(|e| Error::AudioLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let hint_extension = path.extension().and_then(|e| e.to_str());

    let (mut format, track) =
        demux::probe_source_and_pick_default_track(Box::new(file), hint_extension)
            .map_err(|e| classify_probe_error(path, e))?;

    let source_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioFormat {
            path: path.to_path_buf(),
            details: "track has no known sample rate".to_string(),
        })?;
    let source_channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .unwrap_or(1)
        .max(1);

    let mut decoder = crate::decode::make_decoder_for_track(&track)
        .map_err(|e| classify_decode_error(path, e))?;

    let mut interleaved: Vec<f32> = Vec::new();

    loop {
        let packet = match demux::next_packet(&mut format).map_err(|e| classify_decode_error(path, e))? {
            Some(p) => p,
            None => break,
        };
        if packet.track_id() != track.id {
            continue;
        }
        crate::decode::decode_packet_and_then(&mut decoder, &packet, |decoded| {
            append_decoded(&mut interleaved, decoded, source_channels);
            Ok(())
        })
        .map_err(|e| classify_decode_error(path, e))?;
    }

    if interleaved.is_empty() {
        return Err(Error::AudioData {
            details: format!("no audio samples decoded from '{}'", path.display()),
        });
    }

    let target_channels = config.channels.max(1) as usize;
    let downmixed = mix_channels(interleaved, source_channels, target_channels);

    let resampled = if source_rate != config.sample_rate_hz {
        resample(&downmixed, source_rate, config.sample_rate_hz, target_channels)
            .map_err(|e| Error::AudioData {
                details: format!("resampling failed: {e}"),
            })?
    } else {
        downmixed
    };

    AudioBuffer::new(resampled, config.sample_rate_hz, target_channels as u8)
}

fn classify_probe_error(path: &Path, err: anyhow::Error) -> Error {
    let text = err.to_string();
    if text.to_lowercase().contains("format") || text.to_lowercase().contains("codec") {
        Error::AudioFormat {
            path: path.to_path_buf(),
            details: text,
        }
    } else {
        Error::AudioLoad {
            path: path.to_path_buf(),
            reason: text,
        }
    }
}

fn classify_decode_error(path: &Path, err: anyhow::Error) -> Error {
    let text = err.to_string();
    if text.to_lowercase().contains("format") || text.to_lowercase().contains("codec") {
        Error::AudioFormat {
            path: path.to_path_buf(),
            details: text,
        }
    } else {
        Error::AudioLoad {
            path: path.to_path_buf(),
            reason: text,
        }
    }
}

fn append_decoded(out: &mut Vec<f32>, decoded: AudioBufferRef<'_>, channels: usize) {
    let spec = *decoded.spec();
    let capacity = decoded.capacity() as u64;
    let actual_channels = spec.channels.count().max(1);

    let mut sample_buf = SampleBuffer::<f32>::new(capacity, spec);
    sample_buf.copy_interleaved_ref(decoded);
    let interleaved = sample_buf.samples();
    let frames = interleaved.len() / actual_channels;

    for frame in 0..frames {
        let base = frame * actual_channels;
        for ch in 0..channels.min(actual_channels) {
            out.push(interleaved[base + ch]);
        }
        for _ in actual_channels..channels {
            out.push(0.0);
        }
    }
}

fn mix_channels(interleaved: Vec<f32>, source_channels: usize, target_channels: usize) -> Vec<f32> {
    if source_channels == target_channels {
        return interleaved;
    }
    let frames = interleaved.len() / source_channels;
    let mut out = Vec::with_capacity(frames * target_channels);

    if target_channels == 1 {
        for frame in 0..frames {
            let base = frame * source_channels;
            let sum: f32 = interleaved[base..base + source_channels].iter().sum();
            out.push(sum / source_channels as f32);
        }
    } else {
        // Duplicate mono into every target channel; this loader never
        // receives more than 2 target channels per `AudioConfig`.
        for frame in 0..frames {
            let base = frame * source_channels;
            let mono = interleaved[base..base + source_channels].iter().sum::<f32>() / source_channels as f32;
            for _ in 0..target_channels {
                out.push(mono);
            }
        }
    }
    out
}

fn resample(
    interleaved: &[f32],
    from_rate: u32,
    to_rate: u32,
    channels: usize,
) -> anyhow::Result<Vec<f32>> {
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let frames = interleaved.len() / channels;
    let mut planar: Vec<Vec<f32>> = vec![Vec::with_capacity(frames); channels];
    for frame in 0..frames {
        for (ch, plane) in planar.iter_mut().enumerate() {
            plane.push(interleaved[frame * channels + ch]);
        }
    }

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, frames, channels)
        .map_err(|e| anyhow::anyhow!(e))?;
    let resampled_planar = resampler
        .process(&planar, None)
        .map_err(|e| anyhow::anyhow!(e))?;

    let out_frames = resampled_planar[0].len();
    let mut out = Vec::with_capacity(out_frames * channels);
    for frame in 0..out_frames {
        for plane in &resampled_planar {
            out.push(plane[frame]);
        }
    }
    Ok(out)
}
