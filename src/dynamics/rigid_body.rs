use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::dynamics::state::BodyState;
use crate::error::StepError;
use crate::vehicle::MassProperties;

// ---------------------------------------------------------------------------
// 6DOF rigid-body step (semi-implicit Euler)
// ---------------------------------------------------------------------------

/// Angular rate ceiling, rad/s (30°/s). This is a numerical-stability
/// guard against runaway spin from stiff torque terms at small dt, not a
/// physical limiter: keep it when reproducing behavior.
pub const MAX_ANGULAR_RATE: f64 = 0.523_598_775_598_298_8;

/// Advance the body state by one fixed timestep.
///
/// Translation uses semi-implicit (symplectic) Euler: velocity first,
/// then position from the *new* velocity — better stability than explicit
/// Euler at identical cost. Rotation solves Euler's equation with the
/// diagonal inertia elementwise, then integrates the quaternion via its
/// derivative q̇ = ½·q⊗(0, ω) and renormalizes: linearized quaternion
/// integration drifts off the unit sphere, and at 60 Hz the skew becomes
/// visible within seconds if the renormalization is dropped.
///
/// `fuel_burn` is the propellant mass consumed this tick (already scaled
/// by the propulsion model so it cannot exceed what remains).
///
/// Any non-finite output component is reported as
/// [`StepError::NumericalInstability`] instead of being returned.
pub fn step(
    state: &BodyState,
    props: &MassProperties,
    force_world: &Vector3<f64>,
    torque_body: &Vector3<f64>,
    fuel_burn: f64,
    dt: f64,
    time: f64,
) -> Result<BodyState, StepError> {
    // --- Translation ---
    let accel = force_world / props.mass;
    let velocity = state.velocity + accel * dt;
    let position = state.position + velocity * dt;

    // --- Rotation: I·ω̇ = τ − ω×(I·ω), diagonal inertia ---
    let omega = state.angular_velocity;
    let i = props.inertia;
    let i_omega = Vector3::new(i.x * omega.x, i.y * omega.y, i.z * omega.z);
    let gyro = omega.cross(&i_omega);
    let omega_dot = Vector3::new(
        (torque_body.x - gyro.x) / i.x,
        (torque_body.y - gyro.y) / i.y,
        (torque_body.z - gyro.z) / i.z,
    );
    let mut angular_velocity = omega + omega_dot * dt;
    let rate = angular_velocity.norm();
    if rate > MAX_ANGULAR_RATE {
        angular_velocity *= MAX_ANGULAR_RATE / rate;
    }

    // --- Orientation: q̇ = ½·q⊗(0, ω), then renormalize ---
    let omega_quat = Quaternion::new(
        0.0,
        angular_velocity.x,
        angular_velocity.y,
        angular_velocity.z,
    );
    let q_dot = state.orientation.quaternion() * omega_quat * 0.5;
    let orientation = UnitQuaternion::new_normalize(state.orientation.quaternion() + q_dot * dt);

    let fuel_remaining = (state.fuel_remaining - fuel_burn).max(0.0);

    let next = BodyState {
        position,
        velocity,
        orientation,
        angular_velocity,
        fuel_remaining,
    };
    validate_finite(&next, time)?;
    Ok(next)
}

/// Reject a step whose output contains NaN or infinity. The caller treats
/// this as fatal for the session; the corrupted state never escapes.
fn validate_finite(state: &BodyState, time: f64) -> Result<(), StepError> {
    let checks: [(&'static str, bool); 5] = [
        ("position", state.position.iter().all(|v| v.is_finite())),
        ("velocity", state.velocity.iter().all(|v| v.is_finite())),
        (
            "orientation",
            state.orientation.quaternion().coords.iter().all(|v| v.is_finite()),
        ),
        (
            "angular velocity",
            state.angular_velocity.iter().all(|v| v.is_finite()),
        ),
        ("fuel", state.fuel_remaining.is_finite()),
    ];
    for (quantity, ok) in checks {
        if !ok {
            return Err(StepError::NumericalInstability { quantity, time });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::G0;
    use crate::vehicle::VehicleConfigBuilder;
    use approx::assert_relative_eq;

    fn props() -> MassProperties {
        let cfg = VehicleConfigBuilder::new("Test")
            .height(47.7)
            .diameter(3.66)
            .dry_mass(22_200.0)
            .fuel_mass(3_000.0)
            .com_height_dry(20.0)
            .com_height_fuel(23.85)
            .build()
            .unwrap();
        MassProperties::of(&cfg, 3_000.0)
    }

    fn gravity(props: &MassProperties) -> Vector3<f64> {
        Vector3::new(0.0, -G0 * props.mass, 0.0)
    }

    #[test]
    fn semi_implicit_order_velocity_then_position() {
        // One gravity-only step from the entry scenario. Velocity updates
        // first, and the *new* velocity moves the position.
        let p = props();
        let state = BodyState::descending(5_000.0, -180.0, 3_000.0);
        let next = step(&state, &p, &gravity(&p), &Vector3::zeros(), 0.0, 1.0 / 60.0, 0.0)
            .unwrap();
        let v_expected = -180.0 - G0 / 60.0;
        assert_relative_eq!(next.velocity.y, v_expected, epsilon = 1e-9);
        assert_relative_eq!(next.position.y, 5_000.0 + v_expected / 60.0, epsilon = 1e-9);
    }

    #[test]
    fn quaternion_stays_unit_under_spin() {
        let p = props();
        let mut state = BodyState::descending(1_000.0, 0.0, 3_000.0);
        state.angular_velocity = Vector3::new(0.3, 0.1, -0.2);
        for i in 0..600 {
            state = step(
                &state,
                &p,
                &Vector3::zeros(),
                &Vector3::zeros(),
                0.0,
                1.0 / 60.0,
                i as f64 / 60.0,
            )
            .unwrap();
            let norm = state.orientation.quaternion().norm();
            assert!(
                (norm - 1.0).abs() < 1e-6,
                "quaternion norm drifted to {norm} at step {i}"
            );
        }
    }

    #[test]
    fn zero_torque_conserves_angular_velocity() {
        let p = props();
        let mut state = BodyState::descending(1_000.0, 0.0, 3_000.0);
        // Single-axis spin: the gyroscopic term vanishes for rotation
        // about a principal axis, so omega must be bit-stable.
        state.angular_velocity = Vector3::new(0.25, 0.0, 0.0);
        let initial = state.angular_velocity;
        for i in 0..120 {
            state = step(
                &state,
                &p,
                &Vector3::zeros(),
                &Vector3::zeros(),
                0.0,
                1.0 / 60.0,
                i as f64 / 60.0,
            )
            .unwrap();
        }
        assert_relative_eq!(state.angular_velocity.x, initial.x, epsilon = 1e-12);
        assert_relative_eq!(state.angular_velocity.y, initial.y, epsilon = 1e-12);
        assert_relative_eq!(state.angular_velocity.z, initial.z, epsilon = 1e-12);
    }

    #[test]
    fn angular_rate_clamps_at_thirty_degrees_per_second() {
        let p = props();
        let state = BodyState::descending(1_000.0, 0.0, 3_000.0);
        // Absurd torque, one tick: unclamped this would spin up hard.
        let torque = Vector3::new(1e12, 0.0, 0.0);
        let next = step(&state, &p, &Vector3::zeros(), &torque, 0.0, 1.0 / 60.0, 0.0).unwrap();
        assert_relative_eq!(next.angular_velocity.norm(), MAX_ANGULAR_RATE, epsilon = 1e-12);
    }

    #[test]
    fn fuel_burn_subtracts_and_floors_at_zero() {
        let p = props();
        let state = BodyState::descending(1_000.0, 0.0, 10.0);
        let next = step(&state, &p, &Vector3::zeros(), &Vector3::zeros(), 4.0, 1.0 / 60.0, 0.0)
            .unwrap();
        assert_relative_eq!(next.fuel_remaining, 6.0);
        let next =
            step(&next, &p, &Vector3::zeros(), &Vector3::zeros(), 100.0, 1.0 / 60.0, 0.0).unwrap();
        assert_eq!(next.fuel_remaining, 0.0);
    }

    #[test]
    fn non_finite_force_is_reported_not_propagated() {
        let p = props();
        let state = BodyState::descending(1_000.0, 0.0, 3_000.0);
        let bad = Vector3::new(f64::NAN, 0.0, 0.0);
        let err = step(&state, &p, &bad, &Vector3::zeros(), 0.0, 1.0 / 60.0, 1.25).unwrap_err();
        assert!(matches!(
            err,
            StepError::NumericalInstability { quantity: "position", .. }
                | StepError::NumericalInstability { quantity: "velocity", .. }
        ));
    }

    #[test]
    fn non_finite_torque_is_reported() {
        let p = props();
        let state = BodyState::descending(1_000.0, 0.0, 3_000.0);
        let bad = Vector3::new(0.0, f64::INFINITY, 0.0);
        assert!(step(&state, &p, &Vector3::zeros(), &bad, 0.0, 1.0 / 60.0, 0.0).is_err());
    }
}
