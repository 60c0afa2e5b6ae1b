use serde::Deserialize;

use crate::error::{Error, Result};

/// Soft/hard duration bounds and merge/overlap parameters for the shaper.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DurationConfig {
    #[serde(default = "default_soft_lower_limit")]
    pub soft_lower_limit: f64,
    #[serde(default = "default_soft_upper_limit")]
    pub soft_upper_limit: f64,
    #[serde(default = "default_hard_lower_limit")]
    pub hard_lower_limit: f64,
    #[serde(default = "default_hard_upper_limit")]
    pub hard_upper_limit: f64,
    #[serde(default = "default_overlap")]
    pub overlap: f64,
    #[serde(default = "default_maximum_merge_gap_duration")]
    pub maximum_merge_gap_duration: f64,
}

fn default_soft_lower_limit() -> f64 {
    10.0
}

fn default_soft_upper_limit() -> f64 {
    15.0
}

fn default_hard_lower_limit() -> f64 {
    5.0
}

fn default_hard_upper_limit() -> f64 {
    30.0
}

fn default_overlap() -> f64 {
    0.5
}

fn default_maximum_merge_gap_duration() -> f64 {
    1.0
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            soft_lower_limit: default_soft_lower_limit(),
            soft_upper_limit: default_soft_upper_limit(),
            hard_lower_limit: default_hard_lower_limit(),
            hard_upper_limit: default_hard_upper_limit(),
            overlap: default_overlap(),
            maximum_merge_gap_duration: default_maximum_merge_gap_duration(),
        }
    }
}

impl DurationConfig {
    /// Checks the ordering invariant `hard_lower ≤ soft_lower ≤ soft_upper ≤ hard_upper`
    /// and non-negativity of every field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("soft_lower_limit", self.soft_lower_limit),
            ("soft_upper_limit", self.soft_upper_limit),
            ("hard_lower_limit", self.hard_lower_limit),
            ("hard_upper_limit", self.hard_upper_limit),
            ("overlap", self.overlap),
            ("maximum_merge_gap_duration", self.maximum_merge_gap_duration),
        ];
        for (name, value) in fields {
            if value < 0.0 {
                return Err(Error::Configuration {
                    setting_name: name.to_string(),
                    value: value.to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        }
        if !(self.hard_lower_limit <= self.soft_lower_limit
            && self.soft_lower_limit <= self.soft_upper_limit
            && self.soft_upper_limit <= self.hard_upper_limit)
        {
            return Err(Error::Configuration {
                setting_name: "duration limits".to_string(),
                value: format!(
                    "hard_lower={}, soft_lower={}, soft_upper={}, hard_upper={}",
                    self.hard_lower_limit,
                    self.soft_lower_limit,
                    self.soft_upper_limit,
                    self.hard_upper_limit
                ),
                reason: "must satisfy hard_lower <= soft_lower <= soft_upper <= hard_upper"
                    .to_string(),
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
        DurationConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut cfg = DurationConfig::default();
        cfg.soft_lower_limit = 20.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_values() {
        let mut cfg = DurationConfig::default();
        cfg.overlap = -1.0;
        assert!(cfg.validate().is_err());
    }
}
