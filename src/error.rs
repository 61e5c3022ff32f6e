use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Invalid vehicle or session configuration.
///
/// Detected eagerly at construction — a session that ticks was built from
/// a valid config, so none of these can surface mid-simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("vehicle height must be positive, got {0} m")]
    NonPositiveHeight(f64),

    #[error("vehicle diameter must be positive, got {0} m")]
    NonPositiveDiameter(f64),

    #[error("dry mass must be positive, got {0} kg")]
    NonPositiveDryMass(f64),

    #[error("initial fuel mass cannot be negative, got {0} kg")]
    NegativeFuelMass(f64),

    #[error("{name} at {value} m is outside the vehicle (height {height} m)")]
    ComOutOfBounds {
        name: &'static str,
        value: f64,
        height: f64,
    },

    #[error("engine thrust must be positive, got {0} N")]
    NonPositiveThrust(f64),

    #[error("specific impulse must be positive, got {0} s")]
    NonPositiveIsp(f64),

    #[error("gimbal limit cannot be negative, got {0} deg")]
    NegativeGimbalLimit(f64),

    #[error("minimum throttle fraction must be within [0, 1], got {0}")]
    ThrottleFloorOutOfRange(f64),

    #[error("unknown vehicle preset '{0}'")]
    UnknownPreset(String),

    #[error("wind level must be within 0..=9, got {0}")]
    WindLevelOutOfRange(i32),
}

/// Fatal per-step failure. The session that produced it is dead; the
/// process is not.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    #[error("numerical instability: non-finite {quantity} at t={time:.3} s")]
    NumericalInstability { quantity: &'static str, time: f64 },
}
