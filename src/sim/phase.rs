use serde::{Deserialize, Serialize};

use crate::dynamics::state::BodyState;

// ---------------------------------------------------------------------------
// Flight phases
// ---------------------------------------------------------------------------

/// Discrete flight phase. Transitions are one-directional; `Landed` and
/// `Crashed` are absorbing. Computed fresh from the kinematic state each
/// tick and never fed back into the dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    Descent,
    LandingBurn,
    FinalApproach,
    Touchdown,
    Landed,
    Crashed,
}

impl FlightPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlightPhase::Landed | FlightPhase::Crashed)
    }
}

/// Altitude gates for the phase transitions, m.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseThresholds {
    /// Below this, a nonzero throttle marks the start of the landing burn.
    pub burn_start_altitude: f64,
    /// Below this, the burn becomes the final approach.
    pub final_approach_altitude: f64,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            burn_start_altitude: 2_000.0,
            final_approach_altitude: 500.0,
        }
    }
}

/// Advance the phase for one tick. Transitions cascade (a single tick may
/// pass through more than one gate) but never regress, and terminal
/// phases are left untouched. Touchdown itself is resolved by
/// [`evaluate_touchdown`] on the crossing state.
pub fn advance(
    phase: FlightPhase,
    state: &BodyState,
    throttle: f64,
    thresholds: &PhaseThresholds,
) -> FlightPhase {
    if phase.is_terminal() {
        return phase;
    }

    let altitude = state.altitude();

    // Ground crossing trumps everything else, whatever phase the vehicle
    // managed to reach on the way down.
    if altitude <= 0.0 {
        return FlightPhase::Touchdown;
    }

    let mut phase = phase;
    if phase == FlightPhase::Descent
        && throttle > 0.0
        && altitude < thresholds.burn_start_altitude
    {
        phase = FlightPhase::LandingBurn;
    }
    if phase == FlightPhase::LandingBurn && altitude < thresholds.final_approach_altitude {
        phase = FlightPhase::FinalApproach;
    }
    phase
}

// ---------------------------------------------------------------------------
// Difficulty profiles and touchdown evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Professional,
}

/// Landing success limits. All four must hold simultaneously.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LandingCriteria {
    pub max_vertical_speed: f64,   // m/s
    pub max_horizontal_speed: f64, // m/s
    pub max_pad_distance: f64,     // m
    pub max_tilt_deg: f64,         // deg from vertical
}

impl Difficulty {
    pub fn criteria(&self) -> LandingCriteria {
        match self {
            Difficulty::Easy => LandingCriteria {
                max_vertical_speed: 20.0,
                max_horizontal_speed: 10.0,
                max_pad_distance: 10.0,
                max_tilt_deg: 10.0,
            },
            Difficulty::Medium => LandingCriteria {
                max_vertical_speed: 10.0,
                max_horizontal_speed: 5.0,
                max_pad_distance: 5.0,
                max_tilt_deg: 5.0,
            },
            Difficulty::Professional => LandingCriteria {
                max_vertical_speed: 5.0,
                max_horizontal_speed: 2.0,
                max_pad_distance: 1.0,
                max_tilt_deg: 2.0,
            },
        }
    }
}

/// Touchdown measurements, captured once at the tick the vehicle crosses
/// the pad plane and never recomputed (the host's rendering layer may
/// keep moving the vehicle afterwards).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TouchdownReport {
    pub vertical_speed: f64,   // m/s, magnitude
    pub horizontal_speed: f64, // m/s
    pub pad_distance: f64,     // m
    pub tilt_deg: f64,         // deg
    pub landed: bool,
}

/// One-shot landing evaluation on the crossing state. If the integrator
/// overshoots (y goes from positive to negative within a single step) the
/// overshot state *is* the crossing state; nothing waits for an exact
/// y = 0 sample.
pub fn evaluate_touchdown(state: &BodyState, criteria: &LandingCriteria) -> TouchdownReport {
    let vertical_speed = state.velocity.y.abs();
    let horizontal_speed = state.horizontal_speed();
    let pad_distance = state.pad_distance();
    let tilt_deg = state.tilt().to_degrees();

    let landed = vertical_speed <= criteria.max_vertical_speed
        && horizontal_speed <= criteria.max_horizontal_speed
        && pad_distance <= criteria.max_pad_distance
        && tilt_deg <= criteria.max_tilt_deg;

    TouchdownReport {
        vertical_speed,
        horizontal_speed,
        pad_distance,
        tilt_deg,
        landed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
