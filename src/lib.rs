pub mod dynamics;
pub mod error;
pub mod io;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use dynamics::{BodyState, ControlInput, G0};
pub use error::{ConfigError, StepError};
pub use physics::{AeroModel, WindConfig, WindField};
pub use sim::{Difficulty, FlightPhase, Session, SessionConfig, Snapshot};
pub use vehicle::{VehicleConfig, VehicleConfigBuilder};

// Convenience re-export of the preset table.
pub use vehicle::presets;
