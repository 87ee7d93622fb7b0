use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::StaircaseConfig;
use crate::error::ConfigError;
use crate::threshold::ThresholdEstimate;

/// Reversal ordinals after which the step size moves to the next entry.
const STEP_ADVANCE_AT_REVERSAL: [usize; 2] = [2, 4];

/// Direction of an intensity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smaller difference, the task gets harder.
    Harder,
    /// Larger difference, the task gets easier.
    Easier,
}

/// One recorded trial: the value that was presented and whether the answer was correct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialPoint {
    pub value: f64,
    pub correct: bool,
}

/// What a single call to [`Staircase::record_response`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseOutcome {
    /// False when the staircase had already finished and the call was ignored.
    pub recorded: bool,
    pub direction: Option<Direction>,
    /// 1-based ordinal of the reversal this response produced, if any.
    pub reversal: Option<usize>,
    /// Intensity to present next.
    pub value: f64,
    pub finished: bool,
}

impl ResponseOutcome {
    pub fn is_reversal(&self) -> bool {
        self.reversal.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Staircase {
    config: StaircaseConfig,
    current_value: f64,
    step_size_index: usize,
    trial_count: usize,
    consecutive_correct: u32,
    consecutive_incorrect: u32,
    last_direction: Option<Direction>,
    reversal_trials: Vec<usize>,
    reversal_values: Vec<f64>,
    history: Vec<TrialPoint>,
    finished: bool,
}

impl Staircase {
    pub fn new(config: StaircaseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(?config, "staircase created");
        Ok(Self {
            current_value: config.start_value,
            step_size_index: 0,
            trial_count: 0,
            consecutive_correct: 0,
            consecutive_incorrect: 0,
            last_direction: None,
            reversal_trials: Vec::new(),
            reversal_values: Vec::new(),
            history: Vec::new(),
            finished: false,
            config,
        })
    }

    /// Intensity to present on the next trial.
    pub fn peek_next_value(&self) -> f64 {
        self.current_value
    }

    /// Records the observer's answer to the value returned by [`peek_next_value`](Self::peek_next_value)
    /// and moves the staircase. Ignored once the staircase has finished.
    pub fn record_response(&mut self, correct: bool) -> ResponseOutcome {
        if self.finished {
            return ResponseOutcome {
                recorded: false,
                direction: None,
                reversal: None,
                value: self.current_value,
                finished: true,
            };
        }

        self.history.push(TrialPoint {
            value: self.current_value,
            correct,
        });
        self.trial_count += 1;

        if correct {
            self.consecutive_correct += 1;
            self.consecutive_incorrect = 0;
        } else {
            self.consecutive_incorrect += 1;
            self.consecutive_correct = 0;
        }

        // Harder is checked first and wins if both thresholds are met.
        let direction = if self.consecutive_correct >= self.config.down_count {
            self.consecutive_correct = 0;
            Some(Direction::Harder)
        } else if self.consecutive_incorrect >= self.config.up_count {
            self.consecutive_incorrect = 0;
            Some(Direction::Easier)
        } else {
            None
        };

        let mut reversal = None;
        if let Some(direction) = direction {
            if self.last_direction.is_some_and(|last| last != direction) {
                reversal = Some(self.record_reversal());
            }
            self.step(direction);
            self.last_direction = Some(direction);
        }

        self.finished = self.reversal_values.len() >= self.config.max_reversals
            || self.trial_count >= self.config.max_trials;
        if self.finished {
            info!(
                trials = self.trial_count,
                reversals = self.reversal_values.len(),
                "staircase finished"
            );
        }

        ResponseOutcome {
            recorded: true,
            direction,
            reversal,
            value: self.current_value,
            finished: self.finished,
        }
    }

    /// Stores the pre-update value and tightens the step size at the fixed reversal counts.
    fn record_reversal(&mut self) -> usize {
        self.reversal_trials.push(self.trial_count);
        self.reversal_values.push(self.current_value);
        let ordinal = self.reversal_values.len();
        info!(
            ordinal,
            trial = self.trial_count,
            value = self.current_value,
            "reversal"
        );

        let last_index = self.config.step_sizes.len() - 1;
        if STEP_ADVANCE_AT_REVERSAL.contains(&ordinal) && self.step_size_index < last_index {
            self.step_size_index += 1;
            info!(step_size = self.step_size(), "step size changed");
        }
        ordinal
    }

    fn step(&mut self, direction: Direction) {
        let step = self.step_size();
        self.current_value = match direction {
            Direction::Harder => (self.current_value - step).max(self.config.min_value),
            Direction::Easier => (self.current_value + step).min(self.config.max_value),
        };
        debug!(?direction, value = self.current_value, "intensity changed");
    }

    pub fn config(&self) -> &StaircaseConfig {
        &self.config
    }

    pub fn step_size(&self) -> f64 {
        self.config.step_sizes[self.step_size_index]
    }

    pub fn step_size_index(&self) -> usize {
        self.step_size_index
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn reversal_trials(&self) -> &[usize] {
        &self.reversal_trials
    }

    pub fn reversal_values(&self) -> &[f64] {
        &self.reversal_values
    }

    pub fn reversal_count(&self) -> usize {
        self.reversal_values.len()
    }

    pub fn history(&self) -> &[TrialPoint] {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn threshold(&self) -> ThresholdEstimate {
        ThresholdEstimate::from_reversals(&self.reversal_values, self.config.max_reversals)
    }
}
