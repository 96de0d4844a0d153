//! Forward-looking occupancy of a single fleet unit.

use super::occupancy::{find_conflict, Assignment, DayInterval};
use super::rta::RtaPolicy;
use crate::models::DispatchOrder;
use crate::services::LaneLookup;
use crate::state_machine::Substatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trip on the unit's timeline, split into its drawn segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub order_id: String,
    pub lane_label: String,
    pub trip: DayInterval,
    pub rta: Option<DayInterval>,
    pub rta_duration_days: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyTimeline {
    fleet_unit_id: String,
    reference_date: NaiveDate,
    /// Sorted by start day
    assignments: Vec<Assignment>,
}

impl OccupancyTimeline {
    /// Timeline of `fleet_unit_id` from the orders currently assigned to it.
    ///
    /// Canceled orders release their unit and are skipped.
    pub fn build<'a>(
        fleet_unit_id: &str,
        orders: impl IntoIterator<Item = &'a DispatchOrder>,
        reference_date: NaiveDate,
        lanes: &dyn LaneLookup,
        policy: &RtaPolicy,
    ) -> Self {
        let assignments = orders
            .into_iter()
            .filter(|order| order.fleet_unit_id.as_deref() == Some(fleet_unit_id))
            .filter(|order| order.substatus != Substatus::Canceled)
            .map(|order| {
                let lane = lanes.lane_for(order);
                Assignment::for_order(order, fleet_unit_id, reference_date, lane.as_ref(), policy)
            })
            .collect();

        Self::from_assignments(fleet_unit_id, reference_date, assignments)
    }

    pub fn from_assignments(
        fleet_unit_id: impl Into<String>,
        reference_date: NaiveDate,
        mut assignments: Vec<Assignment>,
    ) -> Self {
        assignments.sort_by_key(|a| (a.day_offset, a.order_id.clone()));
        Self {
            fleet_unit_id: fleet_unit_id.into(),
            reference_date,
            assignments,
        }
    }

    pub fn fleet_unit_id(&self) -> &str {
        &self.fleet_unit_id
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn entries(&self) -> Vec<TimelineEntry> {
        self.assignments
            .iter()
            .map(|a| TimelineEntry {
                order_id: a.order_id.clone(),
                lane_label: a.lane_label.clone(),
                trip: a.trip_interval(),
                rta: a.rta_interval(),
                rta_duration_days: a.rta_duration_days,
            })
            .collect()
    }

    pub fn conflict_with(
        &self,
        candidate: &DayInterval,
        ignore_order_id: Option<&str>,
    ) -> Option<&Assignment> {
        find_conflict(candidate, &self.assignments, ignore_order_id)
    }

    pub fn is_free(&self, candidate: &DayInterval, ignore_order_id: Option<&str>) -> bool {
        self.conflict_with(candidate, ignore_order_id).is_none()
    }

    /// Earliest start at or after `from_offset` where `duration_days` fit.
    pub fn next_available_offset(&self, from_offset: i64, duration_days: i64) -> i64 {
        let mut start = from_offset;
        loop {
            let window = DayInterval::new(start, start.saturating_add(duration_days.max(1)));
            match self.conflict_with(&window, None) {
                Some(conflict) => start = conflict.busy_interval().end,
                None => return start,
            }
        }
    }

    /// Record a planned assignment so later checks see it
    pub fn reserve(&mut self, assignment: Assignment) {
        let position = self
            .assignments
            .partition_point(|a| a.day_offset <= assignment.day_offset);
        self.assignments.insert(position, assignment);
    }
}
