use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cogex_core::TrialRecord;
use cogex_staircase::{StaircaseConfig, ThresholdEstimate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExperimentError;

/// Everything a finished (or aborted) session produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub staircase: StaircaseConfig,
    pub trials: usize,
    pub records: Vec<TrialRecord>,
    pub reversal_trials: Vec<usize>,
    pub reversal_values: Vec<f64>,
    pub threshold: ThresholdEstimate,
    pub aborted: bool,
}

impl SessionOutcome {
    pub fn summary(&self) -> String {
        self.threshold.to_string()
    }

    pub fn save(&self, path: &Path) -> Result<(), ExperimentError> {
        let mut file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut file, self)?;
        file.flush()?;
        info!(path = %path.display(), "results saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogex_core::Side;

    fn outcome() -> SessionOutcome {
        SessionOutcome {
            staircase: StaircaseConfig::default(),
            trials: 1,
            records: vec![TrialRecord {
                trial: 1,
                target_side: Side::Right,
                intensity: 45.0,
                response: Side::Right,
                correct: true,
                reversal: false,
                repeats: 0,
                reaction_time_ns: None,
                timestamp_ns: 500_000_000,
            }],
            reversal_trials: vec![],
            reversal_values: vec![],
            threshold: ThresholdEstimate::Partial { reversals: 0 },
            aborted: true,
        }
    }

    #[test]
    fn save_writes_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let outcome = outcome();
        outcome.save(&path).unwrap();

        let read: SessionOutcome =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, outcome);
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.json");
        assert!(matches!(outcome().save(&path), Err(ExperimentError::Io(_))));
    }

    #[test]
    fn summary_reports_partial_runs() {
        assert_eq!(outcome().summary(), "Experiment ended with 0 reversals");
    }
}
