//! # Fleet Unit Model
//!
//! A schedulable combination of vehicle, trailer, driver and carrier.

use super::dispatch_order::ThermalProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationalStatus {
    Active,
    Maintenance,
    Inactive,
    OutOfService,
}

impl OperationalStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Maintenance => write!(f, "MAINTENANCE"),
            Self::Inactive => write!(f, "INACTIVE"),
            Self::OutOfService => write!(f, "OUT_OF_SERVICE"),
        }
    }
}

/// Status of each physical component; the trailer is absent on rigid trucks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStatus {
    pub vehicle: OperationalStatus,
    pub trailer: Option<OperationalStatus>,
}

impl UnitStatus {
    pub fn active() -> Self {
        Self {
            vehicle: OperationalStatus::Active,
            trailer: Some(OperationalStatus::Active),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetUnit {
    pub id: String,
    pub operational_status: UnitStatus,
    pub max_load_kg: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub compartments: u32,
    pub supports_multi_zone: bool,
    pub carrier_id: String,
    pub vehicle_plate: Option<String>,
    pub trailer_plate: Option<String>,
    pub driver_name: Option<String>,
}

impl FleetUnit {
    /// Active single-compartment unit with the given capacity and envelope
    pub fn new(
        id: impl Into<String>,
        carrier_id: impl Into<String>,
        max_load_kg: f64,
        temp_min_c: f64,
        temp_max_c: f64,
    ) -> Self {
        Self {
            id: id.into(),
            operational_status: UnitStatus::active(),
            max_load_kg,
            temp_min_c,
            temp_max_c,
            compartments: 1,
            supports_multi_zone: false,
            carrier_id: carrier_id.into(),
            vehicle_plate: None,
            trailer_plate: None,
            driver_name: None,
        }
    }

    pub fn with_zones(mut self, compartments: u32, supports_multi_zone: bool) -> Self {
        self.compartments = compartments.max(1);
        self.supports_multi_zone = supports_multi_zone;
        self
    }

    pub fn capacity_tonnes(&self) -> f64 {
        self.max_load_kg / 1000.0
    }

    pub fn envelope(&self) -> ThermalProfile {
        ThermalProfile::new(self.temp_min_c, self.temp_max_c)
    }

    /// First component that is not `ACTIVE`, as `(component, status)`
    pub fn inactive_component(&self) -> Option<(&'static str, OperationalStatus)> {
        if !self.operational_status.vehicle.is_active() {
            return Some(("vehicle", self.operational_status.vehicle));
        }
        match self.operational_status.trailer {
            Some(status) if !status.is_active() => Some(("trailer", status)),
            _ => None,
        }
    }

    pub fn is_operational(&self) -> bool {
        self.inactive_component().is_none()
    }

    pub fn label(&self) -> &str {
        self.vehicle_plate.as_deref().unwrap_or(&self.id)
    }
}
