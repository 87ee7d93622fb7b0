use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable staircase parameters.
///
/// `up_count` incorrect answers in a row make the task easier, `down_count`
/// correct answers in a row make it harder. The default 1-up/3-down rule
/// converges on roughly 80% correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaircaseConfig {
    pub start_value: f64,
    /// Coarsest first.
    pub step_sizes: Vec<f64>,
    pub min_value: f64,
    pub max_value: f64,
    pub up_count: u32,
    pub down_count: u32,
    pub max_reversals: usize,
    pub max_trials: usize,
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        Self {
            start_value: 45.0,
            step_sizes: vec![10.0, 5.0, 2.0],
            min_value: 0.0,
            max_value: 90.0,
            up_count: 1,
            down_count: 3,
            max_reversals: 6,
            max_trials: 50,
        }
    }
}

impl StaircaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_sizes.is_empty() {
            return Err(ConfigError::EmptyStepSizes);
        }
        for (index, &value) in self.step_sizes.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidStepSize { index, value });
            }
        }

        for (field, value) in [
            ("start_value", self.start_value),
            ("min_value", self.min_value),
            ("max_value", self.max_value),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if self.min_value > self.max_value {
            return Err(ConfigError::InvertedBounds {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.start_value < self.min_value || self.start_value > self.max_value {
            return Err(ConfigError::StartOutOfRange {
                start: self.start_value,
                min: self.min_value,
                max: self.max_value,
            });
        }

        if self.up_count == 0 {
            return Err(ConfigError::ZeroCount { field: "up_count" });
        }
        if self.down_count == 0 {
            return Err(ConfigError::ZeroCount { field: "down_count" });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(StaircaseConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_steps() {
        let config = StaircaseConfig {
            step_sizes: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyStepSizes));
    }

    #[test]
    fn rejects_non_positive_step() {
        let config = StaircaseConfig {
            step_sizes: vec![10.0, 0.0],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidStepSize {
                index: 1,
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_inverted_bounds() {
        let config = StaircaseConfig {
            min_value: 10.0,
            max_value: 5.0,
            start_value: 7.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn rejects_start_outside_bounds() {
        let config = StaircaseConfig {
            start_value: 95.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfRange { .. })
        ));
    }

    #[test]
    fn start_on_a_bound_is_accepted() {
        let config = StaircaseConfig {
            start_value: 90.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_counts() {
        let config = StaircaseConfig {
            down_count: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCount {
                field: "down_count"
            })
        );
    }

    #[test]
    fn rejects_nan_start() {
        let config = StaircaseConfig {
            start_value: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "start_value",
                ..
            })
        ));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: StaircaseConfig =
            serde_json::from_str(r#"{ "start_value": 30.0, "max_trials": 80 }"#).unwrap();
        assert_eq!(config.start_value, 30.0);
        assert_eq!(config.max_trials, 80);
        assert_eq!(config.step_sizes, vec![10.0, 5.0, 2.0]);
    }
}
