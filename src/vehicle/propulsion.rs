use nalgebra::Vector3;

use crate::dynamics::state::{ControlInput, G0};
use crate::vehicle::{MassProperties, VehicleConfig};

// ---------------------------------------------------------------------------
// Single gimbaled engine
// ---------------------------------------------------------------------------

/// Engine output for one tick.
#[derive(Debug, Clone, Copy)]
pub struct ThrustOutput {
    pub force_body: Vector3<f64>,  // N, body frame
    pub torque_body: Vector3<f64>, // N·m, body frame about the COM
    pub mass_flow: f64,            // kg/s consumed from fuel
}

impl ThrustOutput {
    pub fn zero() -> Self {
        Self {
            force_body: Vector3::zeros(),
            torque_body: Vector3::zeros(),
            mass_flow: 0.0,
        }
    }
}

/// Compute thrust force, gimbal torque, and propellant mass flow.
///
/// Throttle semantics: exactly 0 cuts the engine; anything above 0 is
/// raised to the engine's minimum stable throttle (a real engine cannot
/// idle below that fraction, but it can be shut down entirely).
///
/// If the commanded burn would consume more propellant than remains,
/// thrust and mass flow are scaled down so the tank empties exactly at
/// the end of the tick instead of going negative.
pub fn thrust(
    config: &VehicleConfig,
    props: &MassProperties,
    input: &ControlInput,
    fuel_remaining: f64,
    dt: f64,
) -> ThrustOutput {
    if input.throttle <= 0.0 || fuel_remaining <= 0.0 {
        return ThrustOutput::zero();
    }

    let throttle = input
        .throttle
        .clamp(config.throttle_min_frac, 1.0);
    let mut magnitude = throttle * config.engine_thrust_max;
    let mut mass_flow = magnitude / (config.engine_isp * G0);

    // Fuel exhaustion ramps thrust toward zero mid-tick rather than
    // overshooting the tank.
    if dt > 0.0 && mass_flow * dt > fuel_remaining {
        let scale = fuel_remaining / (mass_flow * dt);
        magnitude *= scale;
        mass_flow *= scale;
    }

    // Nominal thrust reacts along body +y; the gimbal tips it by two
    // single-axis rotations, each clamped to the hardware limit.
    let limit = config.gimbal_limit_deg;
    let pitch = input.gimbal_pitch_deg.clamp(-limit, limit).to_radians();
    let yaw = input.gimbal_yaw_deg.clamp(-limit, limit).to_radians();
    let force_body = Vector3::new(
        magnitude * pitch.sin(),
        magnitude * pitch.cos() * yaw.cos(),
        magnitude * yaw.sin(),
    );

    // Moment about the COM from the engine mount at the base.
    let torque_body = props.engine_lever_arm().cross(&force_body);

    ThrustOutput {
        force_body,
        torque_body,
        mass_flow,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
