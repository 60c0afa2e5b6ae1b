//! Structured logging setup. Only present with the `logging` feature; the
//! core never calls into this module itself — it only emits `tracing`
//! events, format and verbosity are entirely a host decision.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

const LOG_ENV_VAR: &str = "SEGMENTATION_LOG";

/// Initializes a global `tracing` subscriber per `config`.
///
/// Branches on `config.format` the way the original system's three
/// formatter classes (console/json/simple) did, translated into three
/// `tracing-subscriber` fmt layer shapes. When
/// `config.silence_external_loggers` is set, third-party crates used
/// internally (symphonia, rubato, the segment encoders) are raised to
/// `WARN` regardless of the configured level, via a `Targets` overlay.
///
/// Safe to call more than once; later calls are silently ignored.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(level_filter(config).into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);

    let external_overlay = config.silence_external_loggers.then(|| {
        Targets::new()
            .with_target("symphonia", tracing::Level::WARN)
            .with_target("rubato", tracing::Level::WARN)
            .with_target("mp3lame_encoder", tracing::Level::WARN)
    });

    let result = match config.format {
        LogFormat::Console => registry
            .with(external_overlay)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
        LogFormat::Json => registry
            .with(external_overlay)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init(),
        LogFormat::Simple => registry
            .with(external_overlay)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_target(false),
            )
            .try_init(),
    };

    let _ = result;
}

fn level_filter(config: &LoggingConfig) -> tracing::level_filters::LevelFilter {
    use crate::config::LogLevel;
    match config.level {
        LogLevel::Trace => tracing::level_filters::LevelFilter::TRACE,
        LogLevel::Debug => tracing::level_filters::LevelFilter::DEBUG,
        LogLevel::Info => tracing::level_filters::LevelFilter::INFO,
        LogLevel::Warn => tracing::level_filters::LevelFilter::WARN,
        LogLevel::Error => tracing::level_filters::LevelFilter::ERROR,
    }
}
