use serde::Deserialize;

/// Log verbosity, as recognized by [`crate::logging::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Output shape for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, colorized when the terminal supports it.
    Console,
    /// One JSON object per line.
    Json,
    /// Bare `level message`, no target/timestamp.
    Simple,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Console
    }
}

/// Logging configuration. Purely external-collaborator: the core never
/// reads this directly, only the optional `logging` feature's subscriber
/// setup does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
    /// Raise third-party crate loggers (symphonia, rubato, encoders) to
    /// `WARN` so they don't drown out this crate's own log lines.
    #[serde(default = "default_silence_external_loggers")]
    pub silence_external_loggers: bool,
}

fn default_silence_external_loggers() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            silence_external_loggers: default_silence_external_loggers(),
        }
    }
}
