//! # Dispatch Order Model
//!
//! A shipment request moving through the dispatch lifecycle. The fleet unit
//! reference is only ever written by the assignment operations in
//! [`crate::orchestration`].

use crate::state_machine::{Stage, Substatus};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SECONDS_PER_DAY: i64 = 86_400;

/// Temperature range in degrees Celsius, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalProfile {
    pub min_c: f64,
    pub max_c: f64,
}

impl ThermalProfile {
    pub fn new(min_c: f64, max_c: f64) -> Self {
        Self { min_c, max_c }
    }

    /// Overlapping part of two ranges, if any
    pub fn intersect(&self, other: &ThermalProfile) -> Option<ThermalProfile> {
        let min_c = self.min_c.max(other.min_c);
        let max_c = self.max_c.min(other.max_c);
        (min_c <= max_c).then_some(ThermalProfile { min_c, max_c })
    }

    /// Smallest range covering both
    pub fn span(&self, other: &ThermalProfile) -> ThermalProfile {
        ThermalProfile {
            min_c: self.min_c.min(other.min_c),
            max_c: self.max_c.max(other.max_c),
        }
    }

    pub fn encloses(&self, other: &ThermalProfile) -> bool {
        self.min_c <= other.min_c && self.max_c >= other.max_c
    }
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    /// Quantity already normalised to tonnes
    pub quantity_tn: f64,
    /// Unit of measure the planner entered the line in (display only)
    pub unit: String,
    pub thermal_profile: Option<ThermalProfile>,
}

impl OrderItem {
    pub fn new(product_id: impl Into<String>, quantity_tn: f64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity_tn,
            unit: "TN".to_string(),
            thermal_profile: None,
        }
    }

    pub fn with_thermal_profile(mut self, min_c: f64, max_c: f64) -> Self {
        self.thermal_profile = Some(ThermalProfile::new(min_c, max_c));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOrder {
    pub id: String,
    pub stage: Stage,
    pub substatus: Substatus,
    pub fleet_unit_id: Option<String>,
    pub carrier_id: Option<String>,
    pub origin: String,
    pub destination: String,
    pub planned_start_at: DateTime<Utc>,
    pub planned_end_at: DateTime<Utc>,
    pub pickup_window_start: Option<NaiveTime>,
    pub pickup_window_end: Option<NaiveTime>,
    pub items: Vec<OrderItem>,
}

impl DispatchOrder {
    /// Create an order in `DISPATCH/NEW` with no items
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        planned_start_at: DateTime<Utc>,
        planned_end_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            stage: Stage::Dispatch,
            substatus: Substatus::New,
            fleet_unit_id: None,
            carrier_id: None,
            origin: origin.into(),
            destination: destination.into(),
            planned_start_at,
            planned_end_at,
            pickup_window_start: None,
            pickup_window_end: None,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn planned_start_date(&self) -> NaiveDate {
        self.planned_start_at.date_naive()
    }

    /// Planned start falls on a day strictly before `today`
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.planned_start_date() < today
    }

    /// Whole days covered by the planned window, never less than one
    pub fn trip_duration_days(&self) -> i64 {
        let seconds = (self.planned_end_at - self.planned_start_at).num_seconds();
        if seconds <= 0 {
            return 1;
        }
        ((seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1)
    }

    pub fn total_tonnes(&self) -> f64 {
        self.items.iter().map(|item| item.quantity_tn).sum()
    }

    pub fn unique_product_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.product_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn lane_label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }

    pub fn is_assigned(&self) -> bool {
        self.fleet_unit_id.is_some()
    }
}
