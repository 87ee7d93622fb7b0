use super::config::ExperimentConfig;
use super::error::ExperimentError;
use super::observer::{Observer, ObserverResponse};
use super::outcome::SessionOutcome;
use super::trial::{Trial, TrialDurations, TrialTimestamps};
use cogex_core::{BladePair, Phase, Side, TrialRecord, TrialState};
use cogex_staircase::Staircase;
use cogex_timing::Timer;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExperimentEvent {
    Start,
    ResponseReceived(Side),
    RepeatRequested,
    Abort,
}

pub struct ExperimentStateMachine<P, T, R>
where
    P: Phase,
    T: Timer,
    R: Rng,
{
    pub phase: P,
    pub timer: T,
    pub rng: R,
    pub config: ExperimentConfig,
    pub staircase: Staircase,
    pub current: Option<Trial<T::Timestamp>>,
    pub records: Vec<TrialRecord>,
    pub aborted: bool,
}

impl<P, T, R> ExperimentStateMachine<P, T, R>
where
    P: Phase,
    T: Timer<Timestamp = u64>,
    R: Rng,
{
    /// Fails before any trial runs if the staircase parameters are invalid.
    pub fn new(config: ExperimentConfig, timer: T, rng: R) -> Result<Self, ExperimentError> {
        let staircase = Staircase::new(config.staircase.clone())?;
        Ok(Self {
            phase: P::default(),
            timer,
            rng,
            config,
            staircase,
            current: None,
            records: Vec::new(),
            aborted: false,
        })
    }

    pub fn advance_phase(&mut self) -> bool {
        let Some(next) = self.phase.next() else {
            return false;
        };
        self.phase = next;
        debug!(phase = ?self.phase, "phase advanced");

        if self.phase.is_staircase() && !self.aborted {
            self.start_trial();
        } else if self.phase.is_debrief() {
            self.current = None;
            info!(
                trials = self.staircase.trial_count(),
                reversals = ?self.staircase.reversal_values(),
                aborted = self.aborted,
                "{}",
                self.staircase.threshold()
            );
        }
        true
    }

    /// Draws a target side for the staircase's current intensity and enters fixation.
    pub fn start_trial(&mut self) {
        if self.staircase.is_finished() {
            self.current = None;
            return;
        }

        let id = self.staircase.trial_count() + 1;
        let intensity = self.staircase.peek_next_value();
        let target_side = Side::random(&mut self.rng);
        let now_ns = self.timer.now();

        self.current = Some(Trial {
            id,
            target_side,
            intensity,
            stimulus: BladePair::for_target(target_side, intensity, self.config.reference_angle),
            durations: TrialDurations {
                fixation_ms: self.config.fixation_ms,
            },
            timestamps: TrialTimestamps {
                start: now_ns,
                stimulus_start: None,
                response: None,
            },
            state: TrialState::Fixation,
            repeats: 0,
        });
        info!(trial = id, intensity, target = %target_side, "trial started");
    }

    /// Waits out the fixation period and opens the response window.
    pub fn show_stimulus(&mut self) {
        let Some(trial) = &mut self.current else {
            return;
        };
        if trial.state != TrialState::Fixation {
            return;
        }

        self.timer
            .sleep(Duration::from_millis(trial.durations.fixation_ms));
        trial.state = TrialState::Stimulus;
        let now_ns = self.timer.now();
        trial.timestamps.stimulus_start = Some(now_ns);
        trial.state = TrialState::Response;
        debug!(trial = trial.id, at_ns = now_ns, "stimulus shown");
    }

    pub fn handle_event(&mut self, event: ExperimentEvent) -> bool {
        match (&self.phase, &event) {
            (phase, ExperimentEvent::Start) if phase.is_welcome() => self.advance_phase(),

            (phase, ExperimentEvent::ResponseReceived(side))
                if phase.is_staircase() && self.awaiting_response() =>
            {
                self.record_response(*side);
                true
            }

            (phase, ExperimentEvent::RepeatRequested)
                if phase.is_staircase() && self.awaiting_response() =>
            {
                self.repeat_trial()
            }

            (phase, ExperimentEvent::Abort) if !phase.is_debrief() => {
                warn!(trials = self.staircase.trial_count(), "session aborted");
                self.aborted = true;
                self.current = None;
                while !self.phase.is_debrief() && self.advance_phase() {}
                true
            }

            _ => false,
        }
    }

    /// Drives the whole session, blocking on the observer for every response.
    pub fn run<O: Observer>(&mut self, observer: &mut O) -> Result<SessionOutcome, ExperimentError> {
        if self.phase.is_welcome() {
            self.handle_event(ExperimentEvent::Start);
        }

        while self.phase.is_staircase() {
            self.show_stimulus();
            let Some(trial) = &self.current else {
                break;
            };
            let event = match observer.respond(trial)? {
                ObserverResponse::Choice(side) => ExperimentEvent::ResponseReceived(side),
                ObserverResponse::Repeat => ExperimentEvent::RepeatRequested,
                ObserverResponse::Abort => ExperimentEvent::Abort,
            };
            if !self.handle_event(event) {
                debug!(?event, "event ignored");
            }
        }

        Ok(self.outcome())
    }

    fn awaiting_response(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|t| TrialState::Response == t.state)
    }

    fn repeat_trial(&mut self) -> bool {
        let max_repeats = self.config.max_repeats_per_trial;
        let Some(trial) = &mut self.current else {
            return false;
        };
        if max_repeats.is_some_and(|max| trial.repeats >= max) {
            info!(trial = trial.id, "repeat limit reached, waiting for a choice");
            return false;
        }

        trial.repeats += 1;
        trial.state = TrialState::Fixation;
        trial.timestamps.stimulus_start = None;
        info!(trial = trial.id, repeats = trial.repeats, "repeating trial");
        true
    }

    /// Feeds the choice to the staircase, logs the trial and moves on.
    fn record_response(&mut self, choice: Side) {
        let Some(mut trial) = self.current.take() else {
            return;
        };

        let now_ns = self.timer.now();
        trial.timestamps.response = Some(now_ns);
        trial.state = TrialState::Complete;
        let correct = choice == trial.target_side;
        let outcome = self.staircase.record_response(correct);

        let reaction_ns = trial.timestamps.stimulus_start.map(|s| now_ns.saturating_sub(s));
        info!(
            trial = trial.id,
            response = %choice,
            correct,
            reversal = outcome.is_reversal(),
            next = outcome.value,
            "response recorded"
        );

        self.records.push(TrialRecord {
            trial: trial.id,
            target_side: trial.target_side,
            intensity: trial.intensity,
            response: choice,
            correct,
            reversal: outcome.is_reversal(),
            repeats: trial.repeats,
            reaction_time_ns: reaction_ns,
            timestamp_ns: now_ns,
        });

        self.timer
            .sleep(Duration::from_millis(self.config.inter_trial_interval_ms));

        if outcome.finished {
            self.advance_phase();
        } else {
            self.start_trial();
        }
    }

    pub fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            staircase: self.staircase.config().clone(),
            trials: self.staircase.trial_count(),
            records: self.records.clone(),
            reversal_trials: self.staircase.reversal_trials().to_vec(),
            reversal_values: self.staircase.reversal_values().to_vec(),
            threshold: self.staircase.threshold(),
            aborted: self.aborted,
        }
    }

    /// Returns current phase
    pub fn current_phase(&self) -> &P {
        &self.phase
    }

    pub fn current_trial(&self) -> Option<&Trial> {
        self.current.as_ref()
    }

    pub fn current_trial_state(&self) -> Option<&TrialState> {
        self.current.as_ref().map(|trial| &trial.state)
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn trial_progress(&self) -> Option<(usize, usize)> {
        self.current
            .as_ref()
            .map(|t| (t.id, self.staircase.config().max_trials))
    }
}
