use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::dynamics::state::{BodyState, ControlInput, G0};
use crate::dynamics::rigid_body;
use crate::error::{ConfigError, StepError};
use crate::physics::{AeroModel, AeroOutput, WindConfig, WindField};
use crate::sim::phase::{
    self, Difficulty, FlightPhase, PhaseThresholds, TouchdownReport,
};
use crate::vehicle::{propulsion, MassProperties, VehicleConfig};

// ---------------------------------------------------------------------------
// Session configuration
// ---------------------------------------------------------------------------

/// Everything fixed at session start. Initial attitude is upright with a
/// purely vertical velocity — the post-entry-burn condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub vehicle: VehicleConfig,
    pub wind: WindConfig,
    pub difficulty: Difficulty,
    pub thresholds: PhaseThresholds,
    pub initial_altitude: f64,          // m
    pub initial_vertical_velocity: f64, // m/s, negative = descending
    /// Aerodynamic forces on/off. Off exists for deterministic free-fall
    /// testing and host-side debugging, not for gameplay.
    pub aero_enabled: bool,
}

impl SessionConfig {
    pub fn new(vehicle: VehicleConfig) -> Self {
        Self {
            vehicle,
            wind: WindConfig::default(),
            difficulty: Difficulty::Medium,
            thresholds: PhaseThresholds::default(),
            initial_altitude: 5_000.0,
            initial_vertical_velocity: -180.0,
            aero_enabled: true,
        }
    }

    pub fn with_wind(mut self, wind: WindConfig) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_initial(mut self, altitude: f64, vertical_velocity: f64) -> Self {
        self.initial_altitude = altitude;
        self.initial_vertical_velocity = vertical_velocity;
        self
    }

    pub fn without_aero(mut self) -> Self {
        self.aero_enabled = false;
        self
    }
}

// ---------------------------------------------------------------------------
// Read-only per-tick snapshot
// ---------------------------------------------------------------------------

/// Immutable view of the simulation after a tick, for the session/transport
/// collaborator. Serialization format is the collaborator's concern; this
/// type just makes the fields serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub angular_velocity: Vector3<f64>,
    pub fuel_remaining: f64,
    pub mass: f64,
    pub altitude: f64,
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    pub tilt_deg: f64,
    pub phase: FlightPhase,
    pub landed: bool,
    pub crashed: bool,
    /// Present once terminal; frozen at the crossing tick.
    pub touchdown: Option<TouchdownReport>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One simulation instance: owns the vehicle config and the body state,
/// and advances them one tick at a time under external control inputs.
///
/// `step` is synchronous, does no I/O, and holds no external resources;
/// dropping the session is cancellation. Steps on one session must be
/// sequential, but independent sessions are free to run on different
/// threads.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    wind: WindField,
    aero: AeroModel,
    state: BodyState,
    time: f64,
    phase: FlightPhase,
    touchdown: Option<TouchdownReport>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let vehicle = config.vehicle.clone().validated()?;
        let state = BodyState::descending(
            config.initial_altitude,
            config.initial_vertical_velocity,
            vehicle.fuel_mass_initial,
        );
        Ok(Self {
            wind: WindField::new(config.wind.clone()),
            aero: AeroModel::default(),
            state,
            time: 0.0,
            phase: FlightPhase::Descent,
            touchdown: None,
            config: SessionConfig { vehicle, ..config },
        })
    }

    /// Start from an explicit body state instead of the config's upright
    /// initial condition (hosts restoring a saved descent, tests staging
    /// a particular crossing geometry).
    pub fn from_state(config: SessionConfig, state: BodyState) -> Result<Self, ConfigError> {
        let mut session = Self::new(config)?;
        let fuel = state
            .fuel_remaining
            .clamp(0.0, session.config.vehicle.fuel_mass_initial);
        session.state = BodyState {
            fuel_remaining: fuel,
            ..state
        };
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Advance one tick under the given control input.
    ///
    /// Terminal sessions (landed, crashed, or numerically dead) ignore the
    /// input and return the frozen snapshot. A `StepError` marks the
    /// session crashed; it is fatal for this session only.
    pub fn step(&mut self, input: &ControlInput, dt: f64) -> Result<Snapshot, StepError> {
        if self.phase.is_terminal() {
            return Ok(self.snapshot());
        }

        let vehicle = &self.config.vehicle;
        let props = MassProperties::of(vehicle, self.state.fuel_remaining);

        // Engine: force/torque in body frame plus propellant flow,
        // already limited by what is left in the tank.
        let throttle = input.throttle.clamp(0.0, 1.0);
        let clamped = ControlInput { throttle, ..*input };
        let thrust = propulsion::thrust(vehicle, &props, &clamped, self.state.fuel_remaining, dt);

        // Aerodynamics against the local wind.
        let aero = if self.config.aero_enabled {
            let wind = self.wind.velocity_world(self.state.altitude(), self.time);
            self.aero.forces(
                &self.state.velocity,
                &wind,
                &self.state.orientation,
                &self.state.angular_velocity,
                self.state.altitude(),
                vehicle,
                &props,
            )
        } else {
            AeroOutput::zero()
        };

        // Net force in the world frame, net torque in the body frame.
        let gravity = Vector3::new(0.0, -G0 * props.mass, 0.0);
        let force_world =
            gravity + self.state.orientation * (thrust.force_body + aero.force_body);
        let torque_body = thrust.torque_body + aero.torque_body;

        let next = rigid_body::step(
            &self.state,
            &props,
            &force_world,
            &torque_body,
            thrust.mass_flow * dt,
            dt,
            self.time,
        );
        let next = match next {
            Ok(next) => next,
            Err(err) => {
                // The session is unrecoverable; report it crashed and
                // surface the instability to the host.
                self.phase = FlightPhase::Crashed;
                return Err(err);
            }
        };

        self.state = next;
        self.time += dt;

        self.phase = phase::advance(self.phase, &self.state, throttle, &self.config.thresholds);
        if self.phase == FlightPhase::Touchdown {
            // One-shot evaluation on the crossing state, even when the
            // step overshot below the pad plane.
            let report =
                phase::evaluate_touchdown(&self.state, &self.config.difficulty.criteria());
            self.phase = if report.landed {
                FlightPhase::Landed
            } else {
                FlightPhase::Crashed
            };
            self.touchdown = Some(report);
        }

        Ok(self.snapshot())
    }

    /// Current read-only view.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time,
            position: self.state.position,
            velocity: self.state.velocity,
            orientation: self.state.orientation,
            angular_velocity: self.state.angular_velocity,
            fuel_remaining: self.state.fuel_remaining,
            mass: MassProperties::of(&self.config.vehicle, self.state.fuel_remaining).mass,
            altitude: self.state.altitude(),
            vertical_speed: self.state.velocity.y,
            horizontal_speed: self.state.horizontal_speed(),
            tilt_deg: self.state.tilt().to_degrees(),
            phase: self.phase,
            landed: self.phase == FlightPhase::Landed,
            crashed: self.phase == FlightPhase::Crashed,
            touchdown: self.touchdown,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
