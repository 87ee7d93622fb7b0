pub mod config;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod state;
pub mod trial;
pub use config::ExperimentConfig;
pub use error::ExperimentError;
pub use observer::{Observer, ObserverResponse};
pub use outcome::SessionOutcome;
pub use state::{ExperimentEvent, ExperimentStateMachine};
pub use trial::{Trial, TrialDurations, TrialTimestamps};
