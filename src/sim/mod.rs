pub mod event;
pub mod phase;
pub mod recorder;
pub mod session;

pub use event::{EventDetector, EventKind, FlightEvent};
pub use phase::{Difficulty, FlightPhase, LandingCriteria, PhaseThresholds, TouchdownReport};
pub use recorder::{FlightRecorder, FlightSample, FlightStatistics};
pub use session::{Session, SessionConfig, Snapshot};
