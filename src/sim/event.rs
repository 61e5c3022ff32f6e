use serde::{Deserialize, Serialize};

use crate::sim::session::Snapshot;
use crate::sim::phase::FlightPhase;

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

/// Kinds of discrete flight events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    EngineIgnition,
    EngineCutoff,
    LandingBurnStart,
    FinalApproachStart,
    FuelExhausted,
    Touchdown { landed: bool },
}

/// An event with the time and altitude it occurred at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightEvent {
    pub time: f64,
    pub altitude: f64,
    pub kind: EventKind,
}

/// Trait for passive event detectors. Implementations inspect consecutive
/// snapshots and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind>;
}

/// Detects engine ignition and cutoff from the fuel flow between ticks.
#[derive(Debug, Default)]
pub struct EngineDetector {
    burning: bool,
}

impl EventDetector for EngineDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        let burning_now = current.fuel_remaining < prev.fuel_remaining;
        let event = match (self.burning, burning_now) {
            (false, true) => Some(EventKind::EngineIgnition),
            (true, false) => Some(EventKind::EngineCutoff),
            _ => None,
        };
        self.burning = burning_now;
        event
    }
}

/// Detects phase changes worth reporting.
#[derive(Debug, Default)]
pub struct PhaseDetector;

impl EventDetector for PhaseDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        if prev.phase == current.phase {
            return None;
        }
        match current.phase {
            FlightPhase::LandingBurn => Some(EventKind::LandingBurnStart),
            FlightPhase::FinalApproach => Some(EventKind::FinalApproachStart),
            FlightPhase::Landed => Some(EventKind::Touchdown { landed: true }),
            FlightPhase::Crashed => Some(EventKind::Touchdown { landed: false }),
            _ => None,
        }
    }
}

/// Fires once when the tank runs dry.
#[derive(Debug, Default)]
pub struct FuelExhaustionDetector {
    fired: bool,
}

impl EventDetector for FuelExhaustionDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.fuel_remaining > 0.0 && current.fuel_remaining <= 0.0 {
            self.fired = true;
            Some(EventKind::FuelExhausted)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
