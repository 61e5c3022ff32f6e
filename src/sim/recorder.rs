use serde::{Deserialize, Serialize};

use crate::dynamics::state::ControlInput;
use crate::sim::event::{
    EngineDetector, EventDetector, FlightEvent, FuelExhaustionDetector, PhaseDetector,
};
use crate::sim::phase::FlightPhase;
use crate::sim::session::Snapshot;

// ---------------------------------------------------------------------------
// Flight data recorder
// ---------------------------------------------------------------------------

/// One recorded sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSample {
    pub time: f64,
    pub altitude: f64,
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    pub fuel: f64,
    pub mass: f64,
    pub throttle: f64,
    pub gimbal_pitch_deg: f64,
    pub gimbal_yaw_deg: f64,
    pub tilt_deg: f64,
    pub phase: FlightPhase,
}

/// End-of-flight statistics derived from the samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightStatistics {
    pub flight_time: f64,
    pub fuel_used: f64,
    pub max_speed: f64,
    pub max_tilt_deg: f64,
    pub engine_on_fraction: f64,
    pub sample_count: usize,
}

/// Records a descent for post-flight review.
///
/// Samples at a fixed interval while the vehicle coasts, and every tick
/// while control is active (throttle or gimbal nonzero), so burns are
/// captured at full rate without recording minutes of quiet free fall.
#[derive(Debug)]
pub struct FlightRecorder {
    sample_interval: f64,
    last_sample_time: f64,
    samples: Vec<FlightSample>,
    events: Vec<FlightEvent>,
    prev: Option<Snapshot>,
    engine_detector: EngineDetector,
    phase_detector: PhaseDetector,
    fuel_detector: FuelExhaustionDetector,
}

impl FlightRecorder {
    /// `sample_interval` in seconds; 0.05 records at 20 Hz.
    pub fn new(sample_interval: f64) -> Self {
        Self {
            sample_interval,
            last_sample_time: f64::NEG_INFINITY,
            samples: Vec::new(),
            events: Vec::new(),
            prev: None,
            engine_detector: EngineDetector::default(),
            phase_detector: PhaseDetector,
            fuel_detector: FuelExhaustionDetector::default(),
        }
    }

    /// Feed the snapshot produced by a tick together with the input that
    /// drove it.
    pub fn record(&mut self, snapshot: &Snapshot, input: &ControlInput) {
        if let Some(prev) = &self.prev {
            let detectors: [&mut dyn EventDetector; 3] = [
                &mut self.engine_detector,
                &mut self.phase_detector,
                &mut self.fuel_detector,
            ];
            for detector in detectors {
                if let Some(kind) = detector.check(prev, snapshot) {
                    self.events.push(FlightEvent {
                        time: snapshot.time,
                        altitude: snapshot.altitude,
                        kind,
                    });
                }
            }
        }

        let control_active = input.throttle > 0.0
            || input.gimbal_pitch_deg.abs() > 0.1
            || input.gimbal_yaw_deg.abs() > 0.1;
        let interval_elapsed = snapshot.time - self.last_sample_time >= self.sample_interval;

        if control_active || interval_elapsed {
            self.last_sample_time = snapshot.time;
            self.samples.push(FlightSample {
                time: snapshot.time,
                altitude: snapshot.altitude,
                vertical_speed: snapshot.vertical_speed,
                horizontal_speed: snapshot.horizontal_speed,
                fuel: snapshot.fuel_remaining,
                mass: snapshot.mass,
                throttle: input.throttle,
                gimbal_pitch_deg: input.gimbal_pitch_deg,
                gimbal_yaw_deg: input.gimbal_yaw_deg,
                tilt_deg: snapshot.tilt_deg,
                phase: snapshot.phase,
            });
        }

        self.prev = Some(snapshot.clone());
    }

    pub fn samples(&self) -> &[FlightSample] {
        &self.samples
    }

    pub fn events(&self) -> &[FlightEvent] {
        &self.events
    }

    pub fn statistics(&self) -> Option<FlightStatistics> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        let engine_on = self.samples.iter().filter(|s| s.throttle > 0.0).count();
        Some(FlightStatistics {
            flight_time: last.time - first.time,
            fuel_used: first.fuel - last.fuel,
            max_speed: self
                .samples
                .iter()
                .map(|s| (s.vertical_speed * s.vertical_speed
                    + s.horizontal_speed * s.horizontal_speed)
                    .sqrt())
                .fold(0.0_f64, f64::max),
            max_tilt_deg: self.samples.iter().map(|s| s.tilt_deg).fold(0.0_f64, f64::max),
            engine_on_fraction: engine_on as f64 / self.samples.len() as f64,
            sample_count: self.samples.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
