use std::io::{BufRead, Write};

use cogex_core::Side;
use cogex_experiment::{ExperimentError, Observer, ObserverResponse, Trial};
use rand::Rng;

/// Reads one answer per line from a terminal.
pub struct TerminalObserver<R: BufRead, W: Write> {
    input: R,
    output: W,
    reference_angle: f64,
}

impl<R: BufRead, W: Write> TerminalObserver<R, W> {
    pub fn new(input: R, output: W, reference_angle: f64) -> Self {
        Self {
            input,
            output,
            reference_angle,
        }
    }

    pub fn show_instructions(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "Type 'l' if the left blade matched the reference, 'r' if the right one did.")?;
        writeln!(self.output, "Press Enter on an empty line to repeat the trial if unsure, 'q' to quit.")?;
        self.output.flush()
    }

    fn parse(line: &str) -> Option<ObserverResponse> {
        match line.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Some(ObserverResponse::Choice(Side::Left)),
            "r" | "right" => Some(ObserverResponse::Choice(Side::Right)),
            "" | "space" => Some(ObserverResponse::Repeat),
            "q" | "quit" | "escape" => Some(ObserverResponse::Abort),
            _ => None,
        }
    }

    fn prompt(&mut self, trial: &Trial) -> std::io::Result<()> {
        let (left, right) = trial.stimulus.orientations(self.reference_angle);
        writeln!(self.output, "\n+")?;
        writeln!(
            self.output,
            "Trial #{}: left blade rotated {:.1}°, right blade rotated {:.1}°",
            trial.id, left, right
        )?;
        write!(self.output, "[l/r, Enter = repeat, q = quit] > ")?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Observer for TerminalObserver<R, W> {
    fn respond(&mut self, trial: &Trial) -> Result<ObserverResponse, ExperimentError> {
        let io_err = |e: std::io::Error| ExperimentError::Observer(e.to_string());
        self.prompt(trial).map_err(io_err)?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line).map_err(io_err)? == 0 {
                return Ok(ObserverResponse::Abort);
            }
            if let Some(response) = Self::parse(&line) {
                return Ok(response);
            }
            write!(self.output, "unrecognised key {:?}, try again > ", line.trim())
                .and_then(|_| self.output.flush())
                .map_err(io_err)?;
        }
    }
}

/// Answers from a two-alternative logistic psychometric function.
///
/// At `threshold` degrees the observer is right 75% of the time; `slope`
/// controls how quickly performance climbs from chance to perfect.
pub struct SimulatedObserver<G: Rng> {
    rng: G,
    threshold: f64,
    slope: f64,
}

impl<G: Rng> SimulatedObserver<G> {
    pub fn new(rng: G, threshold: f64, slope: f64) -> Self {
        Self {
            rng,
            threshold,
            slope,
        }
    }

    pub fn p_correct(&self, intensity: f64) -> f64 {
        let slope = self.slope.max(f64::EPSILON);
        0.5 + 0.5 / (1.0 + (-(intensity - self.threshold) / slope).exp())
    }
}

impl<G: Rng> Observer for SimulatedObserver<G> {
    fn respond(&mut self, trial: &Trial) -> Result<ObserverResponse, ExperimentError> {
        let p = self.p_correct(trial.intensity).clamp(0.0, 1.0);
        let side = if self.rng.random_bool(p) {
            trial.target_side
        } else {
            match trial.target_side {
                Side::Left => Side::Right,
                Side::Right => Side::Left,
            }
        };
        Ok(ObserverResponse::Choice(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogex_core::{BladePair, TrialState};
    use cogex_experiment::{TrialDurations, TrialTimestamps};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn trial(target_side: Side, intensity: f64) -> Trial {
        Trial {
            id: 1,
            target_side,
            intensity,
            stimulus: BladePair::for_target(target_side, intensity, 90.0),
            durations: TrialDurations { fixation_ms: 500 },
            timestamps: TrialTimestamps {
                start: 0,
                stimulus_start: Some(0),
                response: None,
            },
            state: TrialState::Response,
            repeats: 0,
        }
    }

    fn answer(input: &str) -> (ObserverResponse, String) {
        let mut out = Vec::new();
        let response = {
            let mut observer = TerminalObserver::new(Cursor::new(input), &mut out, 90.0);
            observer.respond(&trial(Side::Left, 20.0)).unwrap()
        };
        (response, String::from_utf8(out).unwrap())
    }

    #[test]
    fn terminal_parses_keys() {
        assert_eq!(answer("l\n").0, ObserverResponse::Choice(Side::Left));
        assert_eq!(answer("RIGHT\n").0, ObserverResponse::Choice(Side::Right));
        assert_eq!(answer("\n").0, ObserverResponse::Repeat);
        assert_eq!(answer("q\n").0, ObserverResponse::Abort);
    }

    #[test]
    fn terminal_retries_unknown_keys() {
        let (response, printed) = answer("x\nup\nr\n");
        assert_eq!(response, ObserverResponse::Choice(Side::Right));
        assert_eq!(printed.matches("try again").count(), 2);
    }

    #[test]
    fn terminal_eof_aborts() {
        assert_eq!(answer("").0, ObserverResponse::Abort);
    }

    #[test]
    fn terminal_prompt_shows_orientations() {
        let (_, printed) = answer("l\n");
        assert!(printed.contains("Trial #1: left blade rotated 0.0°, right blade rotated 20.0°"));
    }

    #[test]
    fn simulated_is_at_chance_far_below_threshold() {
        let observer = SimulatedObserver::new(StdRng::seed_from_u64(0), 12.0, 2.0);
        assert!((observer.p_correct(-100.0) - 0.5).abs() < 1e-6);
        assert!((observer.p_correct(12.0) - 0.75).abs() < 1e-12);
        assert!(observer.p_correct(100.0) > 0.999);
    }

    #[test]
    fn simulated_always_right_for_huge_differences() {
        let mut observer = SimulatedObserver::new(StdRng::seed_from_u64(3), 5.0, 1.0);
        for side in [Side::Left, Side::Right] {
            for _ in 0..20 {
                let response = observer.respond(&trial(side, 90.0)).unwrap();
                assert_eq!(response, ObserverResponse::Choice(side));
            }
        }
    }
}
