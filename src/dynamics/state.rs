use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665; // standard gravity, m/s^2

// ---------------------------------------------------------------------------
// 6DOF body state: position, velocity, attitude, angular rate, fuel
// ---------------------------------------------------------------------------

/// Kinematic state of the vehicle. Owned by the session; mutated only by
/// the rigid-body integrator.
///
/// World frame: +y up, x/z horizontal, origin at the pad center.
/// Body frame: +y nose (roll axis), x/z transverse; the orientation
/// quaternion rotates body vectors into the world frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vector3<f64>,           // m, world
    pub velocity: Vector3<f64>,           // m/s, world
    pub orientation: UnitQuaternion<f64>, // body → world
    pub angular_velocity: Vector3<f64>,   // rad/s, body frame
    pub fuel_remaining: f64,              // kg
}

impl BodyState {
    /// Upright at the given altitude with the given vertical velocity
    /// (negative = descending).
    pub fn descending(altitude: f64, vertical_velocity: f64, fuel: f64) -> Self {
        Self {
            position: Vector3::new(0.0, altitude, 0.0),
            velocity: Vector3::new(0.0, vertical_velocity, 0.0),
            orientation: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
            fuel_remaining: fuel,
        }
    }

    /// Altitude above the pad plane, m.
    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    /// Body +y (nose direction) expressed in the world frame.
    pub fn up_axis(&self) -> Vector3<f64> {
        self.orientation * Vector3::y()
    }

    /// Angle between the body up-axis and world up, rad.
    pub fn tilt(&self) -> f64 {
        self.up_axis().y.clamp(-1.0, 1.0).acos()
    }

    /// Speed in the horizontal (x, z) plane, m/s.
    pub fn horizontal_speed(&self) -> f64 {
        (self.velocity.x * self.velocity.x + self.velocity.z * self.velocity.z).sqrt()
    }

    /// Distance from the pad center in the horizontal plane, m.
    pub fn pad_distance(&self) -> f64 {
        (self.position.x * self.position.x + self.position.z * self.position.z).sqrt()
    }
}

// ---------------------------------------------------------------------------
// Per-tick control input
// ---------------------------------------------------------------------------

/// Control command for one tick. Transient: only the latest value is ever
/// used, nothing is persisted. Values outside their ranges are clamped at
/// the consuming site.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ControlInput {
    pub throttle: f64,         // [0, 1]; exactly 0 = engine cut
    pub gimbal_pitch_deg: f64, // deg, clamped to ±gimbal_limit_deg
    pub gimbal_yaw_deg: f64,   // deg, clamped to ±gimbal_limit_deg
}

impl ControlInput {
    pub fn coast() -> Self {
        Self::default()
    }

    pub fn throttle_only(throttle: f64) -> Self {
        Self {
            throttle,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn descending_state_is_upright() {
        let s = BodyState::descending(5_000.0, -180.0, 3_000.0);
        assert_relative_eq!(s.altitude(), 5_000.0);
        assert_relative_eq!(s.tilt(), 0.0);
        assert_relative_eq!(s.horizontal_speed(), 0.0);
        assert_relative_eq!(s.velocity.y, -180.0);
    }

    #[test]
    fn tilt_measures_angle_from_world_up() {
        let mut s = BodyState::descending(100.0, 0.0, 0.0);
        s.orientation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 12_f64.to_radians());
        assert_relative_eq!(s.tilt().to_degrees(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn horizontal_quantities_ignore_vertical_components() {
        let mut s = BodyState::descending(50.0, -8.0, 0.0);
        s.velocity = Vector3::new(3.0, -8.0, 4.0);
        s.position = Vector3::new(3.0, 50.0, 4.0);
        assert_relative_eq!(s.horizontal_speed(), 5.0);
        assert_relative_eq!(s.pad_distance(), 5.0);
    }
}
