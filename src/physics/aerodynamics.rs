use nalgebra::{UnitQuaternion, Vector3};

use crate::physics::atmosphere;
use crate::vehicle::{MassProperties, VehicleConfig};

// ---------------------------------------------------------------------------
// Piecewise drag coefficients
// ---------------------------------------------------------------------------

/// Axial drag coefficient at the transonic peak (M = 1.2). The supersonic
/// branch decays from this value so the curve stays continuous at the
/// boundary by construction.
const CD_TRANSONIC_PEAK: f64 = 0.892;

/// Base normal (side-on) drag coefficient for a cylinder.
const CD_NORMAL_BASE: f64 = 1.8;

/// Relative speeds below this produce no aerodynamic force at all; unit
/// directions are undefined at zero velocity.
const MIN_AIRSPEED: f64 = 0.1;

/// World-frame horizontal relative velocity below this is treated as a
/// pure vertical fall: atan2 of two near-zero components is
/// ill-conditioned, so the incidence angles are forced to exactly zero.
const VERTICAL_FALL_EPS: f64 = 1e-3;

/// Axial drag coefficient as a function of Mach number.
///
/// Subsonic rise, linear transonic wave-drag ramp, then 1/M supersonic
/// decay anchored at the transonic peak. Continuity at both boundaries is
/// asserted by tests.
pub fn axial_drag_coefficient(mach: f64) -> f64 {
    let m = mach.abs();
    if m < 0.8 {
        0.5 + 0.3 * m * m
    } else if m < 1.2 {
        0.692 + 0.5 * (m - 0.8)
    } else {
        CD_TRANSONIC_PEAK * 1.2 / m
    }
}

/// Normal/side drag coefficient as a function of incidence angle (rad)
/// and Mach number: Cn = 1.8 · (1 + 0.15·angle²) · (1 + 0.1·M).
pub fn normal_drag_coefficient(angle: f64, mach: f64) -> f64 {
    let a = angle.abs();
    let m = mach.abs();
    CD_NORMAL_BASE * (1.0 + 0.15 * a * a) * (1.0 + 0.1 * m)
}

// ---------------------------------------------------------------------------
// Body-frame aerodynamic forces and moments
// ---------------------------------------------------------------------------

/// Aerodynamic output for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct AeroOutput {
    pub force_body: Vector3<f64>,  // N
    pub torque_body: Vector3<f64>, // N·m about the COM
}

impl AeroOutput {
    pub fn zero() -> Self {
        Self {
            force_body: Vector3::zeros(),
            torque_body: Vector3::zeros(),
        }
    }
}

/// Aerodynamic model for a slender cylindrical body.
///
/// The normal-flow center of pressure sits at half the body length from
/// the nose; with a loaded COM below that, the vehicle is unstable in
/// some attitudes and needs active control, which is the intended
/// behavior for a booster.
#[derive(Debug, Clone)]
pub struct AeroModel {
    /// Linear rotational damping, N·m·s per rad/s of body rate.
    pub damping: f64,
}

impl Default for AeroModel {
    fn default() -> Self {
        Self { damping: 2.0 }
    }
}

impl AeroModel {
    /// Compute body-frame force and moment from the world-frame motion
    /// state and local atmosphere.
    pub fn forces(
        &self,
        velocity_world: &Vector3<f64>,
        wind_world: &Vector3<f64>,
        orientation: &UnitQuaternion<f64>,
        angular_velocity: &Vector3<f64>,
        altitude: f64,
        config: &VehicleConfig,
        props: &MassProperties,
    ) -> AeroOutput {
        let rel_world = velocity_world - wind_world;
        let speed = rel_world.norm();
        if speed < MIN_AIRSPEED {
            return AeroOutput::zero();
        }

        // Into the body frame via the inverse (transpose) rotation.
        let rel_body = orientation.inverse() * rel_world;

        // Incidence angles. Body y is axial; x is lateral, z normal.
        let u = rel_body.y;
        let v = rel_body.x;
        let w = rel_body.z;
        let vertical_fall =
            rel_world.x.abs() < VERTICAL_FALL_EPS && rel_world.z.abs() < VERTICAL_FALL_EPS;
        let (alpha, beta) = if vertical_fall {
            (0.0, 0.0)
        } else {
            (w.atan2(u), v.atan2(u))
        };

        let atmo = atmosphere::sample(altitude);
        let mach = speed / atmo.sound_speed;
        let q_dyn = 0.5 * atmo.density * speed * speed;
        let area = config.cross_section();

        // Axial drag opposes the axial velocity component.
        let f_axial = -q_dyn * area * axial_drag_coefficient(mach) * u.signum();
        // Normal and side forces from incidence, each with its own
        // angle-dependent coefficient.
        let f_normal = -q_dyn * area * normal_drag_coefficient(alpha, mach) * alpha.sin();
        let f_side = -q_dyn * area * normal_drag_coefficient(beta, mach) * beta.sin();

        let force_body = Vector3::new(f_side, f_axial, f_normal);

        // Moment about the COM. The axial component acts along the
        // symmetry axis and contributes nothing; the lateral components
        // act at the normal-flow CP, half the body length from the nose.
        let cp_normal_height = 0.5 * config.height;
        let lever = Vector3::new(0.0, cp_normal_height - props.com_height, 0.0);
        let mut torque_body = lever.cross(&Vector3::new(f_side, 0.0, f_normal));

        // Rotational damping from air resistance to spin.
        torque_body -= self.damping * angular_velocity;

        AeroOutput {
            force_body,
            torque_body,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
