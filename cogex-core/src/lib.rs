pub mod phase;
pub mod stimulus;
pub mod trial;

pub use phase::{Phase, StandardPhase};
pub use stimulus::{BladePair, Side};
pub use trial::{TrialRecord, TrialState};
