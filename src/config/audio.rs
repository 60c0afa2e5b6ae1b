use serde::Deserialize;

/// Loader-facing audio settings: target sample rate and channel layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioConfig {
    /// Target sample rate in Hz that decoded audio is resampled to.
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: u32,

    /// Target channel count: 1 (mono, downmixed) or 2 (stereo, preserved).
    #[serde(default = "default_channels")]
    pub channels: u8,

    /// Reserved for loudness normalization; unused by the shaper. See
    /// the crate's open-question notes before wiring this up.
    #[serde(default = "default_lufs_db")]
    pub lufs_db: f64,
}

fn default_sample_rate_hz() -> u32 {
    16_000
}

fn default_channels() -> u8 {
    1
}

fn default_lufs_db() -> f64 {
    -23.0
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: default_sample_rate_hz(),
            channels: default_channels(),
            lufs_db: default_lufs_db(),
        }
    }
}
