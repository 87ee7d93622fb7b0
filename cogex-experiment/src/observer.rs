use cogex_core::Side;

use crate::error::ExperimentError;
use crate::trial::Trial;

/// What the observer did after seeing a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverResponse {
    /// Picked the side that looked like the reference.
    Choice(Side),
    /// Show the same trial again, nothing is recorded.
    Repeat,
    /// Stop the session.
    Abort,
}

/// Source of responses: a person at a terminal, a simulation or a test script.
///
/// `respond` may block until an answer is available.
pub trait Observer {
    fn respond(&mut self, trial: &Trial) -> Result<ObserverResponse, ExperimentError>;
}

impl<F> Observer for F
where
    F: FnMut(&Trial) -> Result<ObserverResponse, ExperimentError>,
{
    fn respond(&mut self, trial: &Trial) -> Result<ObserverResponse, ExperimentError> {
        self(trial)
    }
}
