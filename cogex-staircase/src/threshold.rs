use serde::{Deserialize, Serialize};

/// Number of trailing reversals averaged into the threshold.
pub const FINAL_REVERSALS_AVERAGED: usize = 6;

/// Final result of a staircase run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdEstimate {
    /// Enough reversals were reached; `mean` averages the last `reversals_used`.
    Converged { mean: f64, reversals_used: usize },
    /// The run stopped early (trial cap or abort) with this many reversals.
    Partial { reversals: usize },
}

impl ThresholdEstimate {
    pub fn from_reversals(reversal_values: &[f64], max_reversals: usize) -> Self {
        if reversal_values.is_empty() || reversal_values.len() < max_reversals {
            return Self::Partial {
                reversals: reversal_values.len(),
            };
        }
        let used = reversal_values.len().min(FINAL_REVERSALS_AVERAGED);
        let tail = &reversal_values[reversal_values.len() - used..];
        Self::Converged {
            mean: tail.iter().sum::<f64>() / used as f64,
            reversals_used: used,
        }
    }

    pub fn mean(&self) -> Option<f64> {
        match self {
            Self::Converged { mean, .. } => Some(*mean),
            Self::Partial { .. } => None,
        }
    }
}

impl std::fmt::Display for ThresholdEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Converged {
                mean,
                reversals_used,
            } => write!(f, "mean of final {} reversals = {:.3}", reversals_used, mean),
            Self::Partial { reversals } => {
                write!(f, "Experiment ended with {} reversals", reversals)
            }
        }
    }
}
