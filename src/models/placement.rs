//! Things a planner can drop onto a fleet unit, and the load view the
//! validator reads from them.

use super::dispatch_order::{DispatchOrder, ThermalProfile};
use crate::scheduling::{Assignment, DayInterval};
use serde::{Deserialize, Serialize};

/// A new order from the board, or a trip already sitting on a unit's timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementCandidate {
    Order(DispatchOrder),
    Trip {
        order: DispatchOrder,
        assignment: Assignment,
    },
}

impl PlacementCandidate {
    pub fn order(&self) -> &DispatchOrder {
        match self {
            Self::Order(order) | Self::Trip { order, .. } => order,
        }
    }

    pub fn load_profile(&self) -> LoadProfile {
        match self {
            Self::Order(order) => LoadProfile::from_order(order),
            Self::Trip { order, assignment } => LoadProfile {
                duration_days: assignment.duration_days,
                rta_span_days: Some(assignment.rta_span_days()),
                ..LoadProfile::from_order(order)
            },
        }
    }
}

/// What the validator needs to know about a load, whatever it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProfile {
    pub order_id: String,
    pub total_tonnes: f64,
    pub unique_products: usize,
    /// Ranges of the items that carry a thermal requirement
    pub product_ranges: Vec<ThermalProfile>,
    pub duration_days: i64,
    /// Occupied RTA days a trip brings along when it is moved
    pub rta_span_days: Option<i64>,
}

impl LoadProfile {
    pub fn from_order(order: &DispatchOrder) -> Self {
        Self {
            order_id: order.id.clone(),
            total_tonnes: order.total_tonnes(),
            unique_products: order.unique_product_count(),
            product_ranges: order
                .items
                .iter()
                .filter_map(|item| item.thermal_profile)
                .collect(),
            duration_days: order.trip_duration_days(),
            rta_span_days: None,
        }
    }

    /// Days the load claims when it starts on `start`. A new order is checked
    /// on its start day alone; a moved trip claims its whole trip plus RTA.
    pub fn occupied_interval(&self, start: i64) -> DayInterval {
        match self.rta_span_days {
            Some(rta) => DayInterval::new(
                start,
                start
                    .saturating_add(self.duration_days.max(1))
                    .saturating_add(rta),
            ),
            None => DayInterval::single_day(start),
        }
    }

    /// `[min of mins, max of maxes]`; `None` when nothing is temperature controlled
    pub fn required_envelope(&self) -> Option<ThermalProfile> {
        let (first, rest) = self.product_ranges.split_first()?;
        Some(rest.iter().fold(*first, |acc, range| acc.span(range)))
    }

    /// Range every item tolerates at once. Outer `None` means the ranges are
    /// disjoint; `Some(None)` means there is no thermal requirement at all.
    pub fn shared_range(&self) -> Option<Option<ThermalProfile>> {
        let Some((first, rest)) = self.product_ranges.split_first() else {
            return Some(None);
        };
        rest.iter()
            .try_fold(*first, |acc, range| acc.intersect(range))
            .map(Some)
    }

    /// A single thermal zone can serve every item
    pub fn fits_single_zone(&self) -> bool {
        self.shared_range().is_some()
    }
}
