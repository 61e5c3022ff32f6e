pub mod rigid_body;
pub mod state;

pub use rigid_body::{step, MAX_ANGULAR_RATE};
pub use state::{BodyState, ControlInput, G0};
