pub mod aerodynamics;
pub mod atmosphere;
pub mod wind;

pub use aerodynamics::{AeroModel, AeroOutput};
pub use atmosphere::Atmo;
pub use wind::{WindConfig, WindField};
