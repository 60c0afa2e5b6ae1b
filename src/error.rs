//! Crate-wide error taxonomy.
//!
//! This is intentionally decoupled from `anyhow` so downstream libraries
//! aren't forced to adopt `anyhow` in their own public APIs. Internal
//! modules (`loader`, `writer`, `decode`, `demux`) still use
//! `anyhow::Context` for ergonomic chaining; errors are converted into a
//! named variant here at the module boundary, preserving the offending
//! subject (path, template, timestamp pair, setting name/value) on the
//! variant itself rather than flattening it into a message string.

use std::path::PathBuf;

use thiserror::Error;

/// This crate's `Result` alias.
pub type Result<T> = std::result::Result<T, Error>;

/// The full error taxonomy produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The audio file could not be opened or read at all.
    #[error("failed to load audio file '{path}': {reason}")]
    AudioLoad { path: PathBuf, reason: String },

    /// The decoder rejected the file for a format/codec reason.
    #[error("invalid audio format for '{path}': {details}")]
    AudioFormat { path: PathBuf, details: String },

    /// Decoded (or supplied) audio data is empty, non-finite, or otherwise unusable.
    #[error("invalid audio data: {details}")]
    AudioData { details: String },

    /// A segment could not be encoded and written to disk.
    #[error("failed to write segment to '{path}': {reason}")]
    SegmentWrite { path: PathBuf, reason: String },

    /// A manifest could not be serialized or written to disk.
    #[error("manifest error for '{path}': {reason}")]
    Manifest { path: PathBuf, reason: String },

    /// The output directory could not be created or accessed.
    #[error("cannot access output directory '{path}': {reason}")]
    OutputDirectory { path: PathBuf, reason: String },

    /// A filename/manifest template referenced an unknown placeholder or
    /// otherwise failed to render.
    #[error("template '{template}' is invalid: {reason}")]
    Template { template: String, reason: String },

    /// A setting (or a combination of settings) was invalid.
    #[error("invalid configuration for '{setting_name}' (value: {value}): {reason}")]
    Configuration {
        setting_name: String,
        value: String,
        reason: String,
    },

    /// A produced timestamp failed validation (negative, inverted, or past
    /// the end of the buffer).
    #[error("invalid timestamp range [{start}, {end}]: {reason}")]
    InvalidTimestamp {
        start: f64,
        end: f64,
        reason: String,
    },

    /// The silence detector failed.
    #[error("silence detection failed: {details}")]
    SilenceDetection { details: String },

    /// Shaping produced zero usable segments.
    #[error("no valid segments after shaping: {reason}")]
    EmptySegmentation { reason: String },

    /// A segmentation strategy raised an unexpected error.
    #[error("strategy '{strategy_name}' failed: {reason}")]
    Strategy {
        strategy_name: String,
        reason: String,
    },

    /// Anything else: preserved with its cause so the original error chain
    /// is not lost.
    #[error("{0:#}")]
    Other(#[source] anyhow::Error),
}

impl Error {
    pub(crate) fn other(err: impl Into<anyhow::Error>) -> Self {
        Self::Other(err.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(err.into())
    }
}
