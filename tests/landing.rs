use approx::assert_relative_eq;
use nalgebra::{UnitQuaternion, Vector3};

use lander_sim::dynamics::{rigid_body, BodyState, ControlInput, G0};
use lander_sim::physics::aerodynamics::{self, AeroModel};
use lander_sim::physics::atmosphere;
use lander_sim::presets;
use lander_sim::sim::{Difficulty, Session, SessionConfig};
use lander_sim::vehicle::MassProperties;

const DT: f64 = 1.0 / 60.0;

fn falcon_config() -> SessionConfig {
    SessionConfig::new(presets::falcon9_block5())
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn straight_descent_first_step_reference_values() {
    // 22 200 kg dry + 3 000 kg fuel, 5 000 m, -180 m/s, no throttle, no
    // wind, no drag: one 1/60 s step must match hand-computed symplectic
    // Euler exactly.
    let mut session = Session::new(falcon_config().without_aero()).unwrap();
    let snap = session.step(&ControlInput::coast(), DT).unwrap();

    let v_expected = -180.0 - G0 / 60.0; // -180.16344...
    assert_relative_eq!(snap.velocity.y, v_expected, epsilon = 1e-9);
    assert_relative_eq!(snap.velocity.y, -180.16344, epsilon = 1e-5);
    assert_relative_eq!(snap.position.y, 5_000.0 + v_expected / 60.0, epsilon = 1e-9);
    assert_relative_eq!(snap.position.y, 4_997.0, epsilon = 1e-2);
}

#[test]
fn free_fall_matches_analytic_solution_over_ten_seconds() {
    let config = falcon_config().with_initial(10_000.0, 0.0).without_aero();
    let mut session = Session::new(config).unwrap();
    let mut snap = session.snapshot();
    for _ in 0..600 {
        snap = session.step(&ControlInput::coast(), DT).unwrap();
    }
    assert_relative_eq!(snap.vertical_speed, -G0 * 10.0, epsilon = 1e-9);
    assert_relative_eq!(snap.horizontal_speed, 0.0, epsilon = 1e-12);
    // Symplectic Euler position: r = r0 - g·dt²·n(n+1)/2.
    let expected_y = 10_000.0 - G0 * DT * DT * (600.0 * 601.0) / 2.0;
    assert_relative_eq!(snap.position.y, expected_y, epsilon = 1e-6);
}

// ---------------------------------------------------------------------------
// Touchdown classification at the crossing tick
// ---------------------------------------------------------------------------

fn crossing_session(tilt_deg: f64) -> Session {
    // Staged so that one dt = 0.1 s step carries y from +0.5 to about
    // -0.3 with ~8 m/s vertical speed, 3 m/s horizontal speed, and 2 m
    // pad distance at the crossing.
    let state = BodyState {
        position: Vector3::new(1.7, 0.5, 0.0),
        velocity: Vector3::new(3.0, -7.02, 0.0),
        orientation: UnitQuaternion::from_axis_angle(
            &Vector3::z_axis(),
            tilt_deg.to_radians(),
        ),
        angular_velocity: Vector3::zeros(),
        fuel_remaining: 500.0,
    };
    Session::from_state(
        falcon_config()
            .without_aero()
            .with_difficulty(Difficulty::Medium),
        state,
    )
    .unwrap()
}

#[test]
fn overshoot_crossing_lands_within_medium_limits() {
    let mut session = crossing_session(3.0);
    let snap = session.step(&ControlInput::coast(), 0.1).unwrap();

    // The step overshot the pad plane; the overshot state is the
    // crossing state.
    assert!(snap.position.y < 0.0);
    assert!(snap.landed);
    let report = snap.touchdown.unwrap();
    assert_relative_eq!(report.vertical_speed, 8.0, epsilon = 0.01);
    assert_relative_eq!(report.horizontal_speed, 3.0, epsilon = 1e-9);
    assert_relative_eq!(report.pad_distance, 2.0, epsilon = 1e-9);
    assert_relative_eq!(report.tilt_deg, 3.0, epsilon = 1e-9);
}

#[test]
fn crash_on_tilt_despite_velocities_within_limits() {
    let mut session = crossing_session(12.0);
    let snap = session.step(&ControlInput::coast(), 0.1).unwrap();
    assert!(snap.crashed);
    let report = snap.touchdown.unwrap();
    assert!(!report.landed);
    assert_relative_eq!(report.tilt_deg, 12.0, epsilon = 1e-9);
    assert!(report.vertical_speed <= 10.0 && report.horizontal_speed <= 5.0);
}

// ---------------------------------------------------------------------------
// Physical properties
// ---------------------------------------------------------------------------

#[test]
fn terminal_velocity_converges_to_drag_weight_balance() {
    // Drop from rest at sea level with drag on. Altitude falls below the
    // pad plane; the atmosphere clamps to sea-level density, so the fall
    // converges to the classic v_t = sqrt(2mg/(rho·A·Cd)). The classifier
    // is not in the loop here: this drives the integrator directly.
    let vehicle = presets::falcon9_block5();
    let aero = AeroModel::default();
    let props = MassProperties::of(&vehicle, vehicle.fuel_mass_initial);
    let mut state = BodyState::descending(0.0, 0.0, vehicle.fuel_mass_initial);

    for i in 0..9_000 {
        let out = aero.forces(
            &state.velocity,
            &Vector3::zeros(),
            &state.orientation,
            &state.angular_velocity,
            state.position.y,
            &vehicle,
            &props,
        );
        let force = Vector3::new(0.0, -G0 * props.mass, 0.0)
            + state.orientation * out.force_body;
        state = rigid_body::step(
            &state,
            &props,
            &force,
            &out.torque_body,
            0.0,
            DT,
            i as f64 * DT,
        )
        .unwrap();
    }

    let speed = state.velocity.norm();
    let atmo = atmosphere::sample(0.0);
    let cd = aerodynamics::axial_drag_coefficient(speed / atmo.sound_speed);
    let v_terminal =
        (2.0 * props.mass * G0 / (atmo.density * vehicle.cross_section() * cd)).sqrt();
    assert_relative_eq!(speed, v_terminal, max_relative = 0.01);
}

#[test]
fn fuel_is_monotonic_and_bounded_for_any_throttle_history() {
    let mut session = Session::new(falcon_config().with_initial(20_000.0, -50.0)).unwrap();
    let mut previous = session.snapshot().fuel_remaining;
    for i in 0..3_000_usize {
        // Deterministic but erratic throttle pattern, including dead bands.
        let throttle = match (i * 37) % 100 {
            0..=30 => 0.0,
            n => n as f64 / 100.0,
        };
        let snap = session
            .step(&ControlInput::throttle_only(throttle), DT)
            .unwrap();
        assert!(snap.fuel_remaining <= previous + 1e-12);
        assert!((0.0..=3_000.0).contains(&snap.fuel_remaining));
        previous = snap.fuel_remaining;
        if snap.landed || snap.crashed {
            break;
        }
    }
}

#[test]
fn zero_torque_preserves_angular_velocity_regardless_of_orientation() {
    let vehicle = presets::falcon9_block5();
    let props = MassProperties::of(&vehicle, 1_000.0);

    // Transverse spin (pitch/yaw plane): with Ixx = Izz the gyroscopic
    // term vanishes, so omega must be constant whatever the attitude.
    for tilt in [0.0_f64, 0.4, 1.2, 2.8] {
        let mut state = BodyState {
            position: Vector3::new(0.0, 5_000.0, 0.0),
            velocity: Vector3::zeros(),
            orientation: UnitQuaternion::from_axis_angle(&Vector3::x_axis(), tilt),
            angular_velocity: Vector3::new(0.12, 0.0, -0.07),
            fuel_remaining: 1_000.0,
        };
        let initial = state.angular_velocity;
        for i in 0..300 {
            state = rigid_body::step(
                &state,
                &props,
                &Vector3::zeros(),
                &Vector3::zeros(),
                0.0,
                DT,
                i as f64 * DT,
            )
            .unwrap();
        }
        assert_relative_eq!(state.angular_velocity.x, initial.x, epsilon = 1e-10);
        assert_relative_eq!(state.angular_velocity.y, initial.y, epsilon = 1e-10);
        assert_relative_eq!(state.angular_velocity.z, initial.z, epsilon = 1e-10);
    }
}

#[test]
fn quaternion_stays_unit_through_a_gimballed_burn() {
    let mut session = Session::new(falcon_config()).unwrap();
    let mut snap = session.snapshot();
    for _ in 0..6_000 {
        let input = ControlInput {
            throttle: if snap.altitude < 1_800.0 { 1.0 } else { 0.0 },
            gimbal_pitch_deg: 2.0,
            gimbal_yaw_deg: -1.0,
        };
        snap = session.step(&input, DT).unwrap();
        let norm = snap.orientation.quaternion().norm();
        assert!((norm - 1.0).abs() < 1e-6);
        if snap.landed || snap.crashed {
            break;
        }
    }
    assert!(snap.landed || snap.crashed, "descent should reach the pad");
}

// ---------------------------------------------------------------------------
// Degenerate inputs are well-defined, not errors
// ---------------------------------------------------------------------------

#[test]
fn coasting_in_still_air_from_rest_produces_clean_free_fall() {
    // Zero velocity + zero wind means zero relative airspeed: the aero
    // model must special-case this rather than normalize a zero vector.
    let config = falcon_config().with_initial(3_000.0, 0.0);
    let mut session = Session::new(config).unwrap();
    let snap = session.step(&ControlInput::coast(), DT).unwrap();
    assert_relative_eq!(snap.vertical_speed, -G0 * DT, epsilon = 1e-9);
    assert_relative_eq!(snap.horizontal_speed, 0.0, epsilon = 1e-12);
    assert_relative_eq!(snap.tilt_deg, 0.0, epsilon = 1e-9);
}
