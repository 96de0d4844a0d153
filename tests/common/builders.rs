//! Test data builders for orders and fleet units.

#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use dispatch_core::{DispatchOrder, FleetUnit, OrderItem, Stage, Substatus};

/// Fixed "today" shared by the integration suites
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 14).unwrap()
}

pub fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
}

/// Builder pattern for test dispatch orders
pub struct OrderBuilder {
    id: String,
    origin: String,
    destination: String,
    start_day_offset: i64,
    duration_hours: i64,
    stage: Stage,
    substatus: Substatus,
    fleet_unit_id: Option<String>,
    carrier_id: Option<String>,
    items: Vec<OrderItem>,
}

impl OrderBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            origin: "SCL".to_string(),
            destination: "ANF".to_string(),
            start_day_offset: 1,
            duration_hours: 12,
            stage: Stage::Dispatch,
            substatus: Substatus::New,
            fleet_unit_id: None,
            carrier_id: None,
            items: Vec::new(),
        }
    }

    pub fn lane(mut self, origin: &str, destination: &str) -> Self {
        self.origin = origin.to_string();
        self.destination = destination.to_string();
        self
    }

    /// Planned start relative to [`today`]
    pub fn starting_in_days(mut self, days: i64) -> Self {
        self.start_day_offset = days;
        self
    }

    pub fn lasting_hours(mut self, hours: i64) -> Self {
        self.duration_hours = hours;
        self
    }

    pub fn in_state(mut self, stage: Stage, substatus: Substatus) -> Self {
        self.stage = stage;
        self.substatus = substatus;
        self
    }

    pub fn assigned_to(mut self, fleet_unit_id: &str, carrier_id: &str) -> Self {
        self.stage = Stage::Dispatch;
        self.substatus = Substatus::Assigned;
        self.fleet_unit_id = Some(fleet_unit_id.to_string());
        self.carrier_id = Some(carrier_id.to_string());
        self
    }

    pub fn item(mut self, product_id: &str, tonnes: f64) -> Self {
        self.items.push(OrderItem::new(product_id, tonnes));
        self
    }

    pub fn chilled_item(mut self, product_id: &str, tonnes: f64, min_c: f64, max_c: f64) -> Self {
        self.items
            .push(OrderItem::new(product_id, tonnes).with_thermal_profile(min_c, max_c));
        self
    }

    pub fn build(self) -> DispatchOrder {
        let start = at(today(), 8) + Duration::days(self.start_day_offset);
        let mut order = DispatchOrder::new(
            self.id,
            self.origin,
            self.destination,
            start,
            start + Duration::hours(self.duration_hours),
        );
        order.stage = self.stage;
        order.substatus = self.substatus;
        order.fleet_unit_id = self.fleet_unit_id;
        order.carrier_id = self.carrier_id;
        order.items = self.items;
        order
    }
}

/// Active reefer with a wide envelope
pub fn reefer(id: &str, max_load_kg: f64) -> FleetUnit {
    FleetUnit::new(id, "carrier-a", max_load_kg, -25.0, 15.0)
}
