use serde::{Deserialize, Serialize};

use crate::stimulus::Side;

/// Trial state machine events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialState {
    Fixation,
    Stimulus,
    Response,
    Complete,
}

/// Recorded result per trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// 1-based
    pub trial: usize,
    pub target_side: Side,
    pub intensity: f64,
    pub response: Side,
    pub correct: bool,
    pub reversal: bool,
    /// How many times the observer asked to see the trial again.
    pub repeats: u32,
    pub reaction_time_ns: Option<u64>,
    pub timestamp_ns: u64,
}
