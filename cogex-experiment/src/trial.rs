use cogex_core::{BladePair, Side, TrialState};

pub struct Trial<T = u64> {
    /// 1-based, matches the staircase trial count once recorded.
    pub id: usize,
    pub target_side: Side,
    pub intensity: f64,
    pub stimulus: BladePair,
    pub durations: TrialDurations,
    pub timestamps: TrialTimestamps<T>,
    pub state: TrialState,
    pub repeats: u32,
}

#[derive(Debug, Clone)]
pub struct TrialDurations {
    pub fixation_ms: u64,
}

#[derive(Debug, Clone)]
pub struct TrialTimestamps<T> {
    pub start: T,
    pub stimulus_start: Option<T>,
    pub response: Option<T>,
}
