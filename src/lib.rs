//! `segmenter` — silence-driven audio segmentation.
//!
//! This crate turns a PCM buffer into a sequence of time-bounded clips:
//! detect non-silence intervals, reshape them into well-formed segments
//! (merge short ones toward a target duration, pad with overlap, filter
//! against hard duration bounds), and optionally write each segment to
//! disk alongside a JSON manifest describing its provenance.
//!
//! The shaping pipeline (`shaper`) and the silence detector (`silence`)
//! are the core of this crate; everything else (loader, writer,
//! filename/path/manifest helpers, config) exists to support them.
//!
//! ```no_run
//! use segmenter::config::{AudioConfig, DurationConfig, FileConfig, SilenceConfig};
//! use segmenter::strategy::{SegmentationStrategy, SilenceStrategy};
//!
//! # fn run() -> segmenter::Result<()> {
//! let strategy = SilenceStrategy::new(
//!     AudioConfig::default(),
//!     DurationConfig::default(),
//!     FileConfig::default(),
//!     SilenceConfig::default(),
//! );
//!
//! let timestamps = strategy.segment_file_to_timestamps("input.wav".as_ref())?;
//! println!("{} segments", timestamps.len());
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod filename;
pub mod loader;
pub mod manifest;
pub mod path;
pub mod shaper;
pub mod silence;
pub mod strategy;
pub mod time;
pub mod writer;

#[cfg(feature = "logging")]
pub mod logging;

mod decode;
mod demux;

pub use buffer::AudioBuffer;
pub use error::{Error, Result};
pub use shaper::Timestamp;
pub use silence::SampleInterval;
