//! Adaptive up/down staircase for estimating a just-noticeable difference.
//!
//! The [`Staircase`] owns all of its state. Callers ask it for the intensity
//! to present with [`Staircase::peek_next_value`] and feed back whether the
//! observer answered correctly with [`Staircase::record_response`].

pub mod config;
pub mod error;
pub mod staircase;
pub mod threshold;

pub use config::StaircaseConfig;
pub use error::ConfigError;
pub use staircase::{Direction, ResponseOutcome, Staircase, TrialPoint};
pub use threshold::{FINAL_REVERSALS_AVERAGED, ThresholdEstimate};
