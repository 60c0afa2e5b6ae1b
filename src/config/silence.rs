use serde::Deserialize;

use crate::error::{Error, Result};

/// Frame-energy silence detector parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SilenceConfig {
    /// Frames this many dB below the buffer's reference level are silent.
    #[serde(default = "default_top_db")]
    pub top_db: f64,
    /// Non-silence intervals separated by less than this are merged.
    #[serde(default = "default_minimum_silence_duration")]
    pub minimum_silence_duration: f64,
    /// Analysis frame length in samples.
    #[serde(default = "default_frame_length")]
    pub frame_length: usize,
    /// Hop length between frames in samples.
    #[serde(default = "default_hop_length")]
    pub hop_length: usize,
}

fn default_top_db() -> f64 {
    30.0
}

fn default_minimum_silence_duration() -> f64 {
    0.5
}

fn default_frame_length() -> usize {
    2048
}

fn default_hop_length() -> usize {
    512
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            top_db: default_top_db(),
            minimum_silence_duration: default_minimum_silence_duration(),
            frame_length: default_frame_length(),
            hop_length: default_hop_length(),
        }
    }
}

impl SilenceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_db < 0.0 {
            return Err(Error::Configuration {
                setting_name: "top_db".to_string(),
                value: self.top_db.to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        if self.minimum_silence_duration < 0.0 {
            return Err(Error::Configuration {
                setting_name: "minimum_silence_duration".to_string(),
                value: self.minimum_silence_duration.to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        if self.frame_length == 0 {
            return Err(Error::Configuration {
                setting_name: "frame_length".to_string(),
                value: self.frame_length.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.hop_length == 0 {
            return Err(Error::Configuration {
                setting_name: "hop_length".to_string(),
                value: self.hop_length.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SilenceConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_frame_length() {
        let mut cfg = SilenceConfig::default();
        cfg.frame_length = 0;
        assert!(cfg.validate().is_err());
    }
}
