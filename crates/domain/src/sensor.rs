//! Sensor samples: one row per report, carrying the command resolved for it.

use serde::{Deserialize, Serialize};

use crate::id::SampleId;
use crate::pump::PumpCommand;
use crate::time::Timestamp;

/// Raw readings sent by the field node with each report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReading {
    pub moisture_level: f64,
    pub water_level: f64,
}

/// A persisted report: the readings plus the pump command decided for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub id: SampleId,
    pub moisture_level: f64,
    pub water_level: f64,
    pub pump_status: PumpCommand,
    pub recorded_at: Timestamp,
}

impl SensorSample {
    /// Record `reading` together with the command resolved at `recorded_at`.
    #[must_use]
    pub fn new(reading: SensorReading, pump_status: PumpCommand, recorded_at: Timestamp) -> Self {
        Self {
            id: SampleId::new(),
            moisture_level: reading.moisture_level,
            water_level: reading.water_level,
            pump_status,
            recorded_at,
        }
    }

    #[must_use]
    pub fn reading(&self) -> SensorReading {
        SensorReading {
            moisture_level: self.moisture_level,
            water_level: self.water_level,
        }
    }
}
