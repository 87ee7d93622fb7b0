use std::fs;
use std::path::Path;

use cogex_staircase::StaircaseConfig;
use serde::{Deserialize, Serialize};

use crate::error::ExperimentError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub staircase: StaircaseConfig,
    pub fixation_ms: u64,
    pub inter_trial_interval_ms: u64,
    /// Orientation of the target blade, degrees.
    pub reference_angle: f64,
    /// `None` lets the observer repeat a trial any number of times.
    pub max_repeats_per_trial: Option<u32>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            staircase: StaircaseConfig::default(),
            fixation_ms: 500,
            inter_trial_interval_ms: 1000,
            reference_angle: 90.0,
            max_repeats_per_trial: None,
        }
    }
}

impl ExperimentConfig {
    /// Reads a JSON config file. Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self, ExperimentError> {
        let contents = fs::read_to_string(path).map_err(|source| ExperimentError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|source| ExperimentError::ConfigParse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ExperimentError> {
        self.staircase.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_blade_task() {
        let config = ExperimentConfig::default();
        assert_eq!(config.fixation_ms, 500);
        assert_eq!(config.inter_trial_interval_ms, 1000);
        assert_eq!(config.reference_angle, 90.0);
        assert_eq!(config.staircase, StaircaseConfig::default());
    }

    #[test]
    fn load_merges_partial_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "fixation_ms": 250, "staircase": {{ "max_trials": 30 }} }}"#
        )
        .unwrap();

        let config = ExperimentConfig::load(file.path()).unwrap();
        assert_eq!(config.fixation_ms, 250);
        assert_eq!(config.inter_trial_interval_ms, 1000);
        assert_eq!(config.staircase.max_trials, 30);
        assert_eq!(config.staircase.start_value, 45.0);
    }

    #[test]
    fn load_rejects_invalid_staircase() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "staircase": {{ "step_sizes": [] }} }}"#).unwrap();

        let err = ExperimentConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ExperimentError::Config(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ExperimentConfig::load(Path::new("/nonexistent/jnd.json")).unwrap_err();
        assert!(matches!(err, ExperimentError::ConfigRead { .. }));
    }

    #[test]
    fn load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ExperimentConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ExperimentError::ConfigParse { .. }));
    }
}
