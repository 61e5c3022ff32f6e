use serde::{Deserialize, Serialize};

use crate::sim::event::FlightEvent;
use crate::sim::phase::TouchdownReport;
use crate::sim::recorder::{FlightRecorder, FlightSample, FlightStatistics};

/// Post-flight review bundle for the host: everything a replay or
/// debrief screen needs, in one serializable value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightReview {
    pub samples: Vec<FlightSample>,
    pub events: Vec<FlightEvent>,
    pub statistics: Option<FlightStatistics>,
    pub touchdown: Option<TouchdownReport>,
}

impl FlightReview {
    pub fn from_recorder(recorder: &FlightRecorder, touchdown: Option<TouchdownReport>) -> Self {
        Self {
            samples: recorder.samples().to_vec(),
            events: recorder.events().to_vec(),
            statistics: recorder.statistics(),
            touchdown,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
