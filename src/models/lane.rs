use serde::{Deserialize, Serialize};

/// Origin/destination pair with its operational timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub origin: String,
    pub destination: String,
    /// One-way transit time; the return leg is assumed to take as long
    pub transit_time_hours: Option<f64>,
    /// Full load/transit/unload cycle, informational
    pub service_cycle_hours: Option<f64>,
}

impl Lane {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            transit_time_hours: None,
            service_cycle_hours: None,
        }
    }

    pub fn with_transit_hours(mut self, hours: f64) -> Self {
        self.transit_time_hours = Some(hours);
        self
    }

    pub fn with_service_cycle_hours(mut self, hours: f64) -> Self {
        self.service_cycle_hours = Some(hours);
        self
    }

    /// Transit time when it is usable for RTA, i.e. strictly positive
    pub fn positive_transit_hours(&self) -> Option<f64> {
        self.transit_time_hours.filter(|hours| *hours > 0.0)
    }

    pub fn label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}
