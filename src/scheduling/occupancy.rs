//! Busy intervals and conflict detection on a fleet unit's day grid.
//!
//! Day offsets are whole days relative to the chart's reference date. All
//! intervals are half-open: `[start, end)`.

use super::rta::{should_show_rta, RtaPolicy};
use crate::models::{DispatchOrder, Lane};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayInterval {
    pub start: i64,
    pub end: i64,
}

impl DayInterval {
    /// `end` is clamped so the interval is never inverted
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn single_day(offset: i64) -> Self {
        Self::new(offset, offset + 1)
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Empty intervals occupy no days and overlap nothing
    pub fn overlaps(&self, other: &DayInterval) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }
}

/// Whole days from `reference` to `date`; negative before the reference
pub fn day_offset(date: NaiveDate, reference: NaiveDate) -> i64 {
    (date - reference).num_days()
}

/// Scheduling view of an assigned order. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub fleet_unit_id: String,
    pub order_id: String,
    pub day_offset: i64,
    pub duration_days: i64,
    pub rta_duration_days: f64,
    pub lane_label: String,
}

impl Assignment {
    /// Derive the assignment of `order` to `fleet_unit_id`, relative to `reference`.
    pub fn for_order(
        order: &DispatchOrder,
        fleet_unit_id: impl Into<String>,
        reference: NaiveDate,
        lane: Option<&Lane>,
        policy: &RtaPolicy,
    ) -> Self {
        let duration_days = order.trip_duration_days();
        Self {
            fleet_unit_id: fleet_unit_id.into(),
            order_id: order.id.clone(),
            day_offset: day_offset(order.planned_start_date(), reference),
            duration_days,
            rta_duration_days: policy.compute(lane, Some(duration_days as f64)),
            lane_label: order.lane_label(),
        }
    }

    /// Same assignment moved to another start day
    pub fn at_offset(&self, day_offset: i64) -> Self {
        Self {
            day_offset,
            ..self.clone()
        }
    }

    pub fn trip_interval(&self) -> DayInterval {
        DayInterval::new(
            self.day_offset,
            self.day_offset.saturating_add(self.duration_days.max(1)),
        )
    }

    /// Whole days of RTA that count as occupancy
    pub fn rta_span_days(&self) -> i64 {
        if should_show_rta(self.rta_duration_days) {
            self.rta_duration_days.ceil() as i64
        } else {
            0
        }
    }

    pub fn rta_interval(&self) -> Option<DayInterval> {
        let span = self.rta_span_days();
        let trip_end = self.trip_interval().end;
        (span > 0).then(|| DayInterval::new(trip_end, trip_end.saturating_add(span)))
    }

    /// Trip plus RTA
    pub fn busy_interval(&self) -> DayInterval {
        let trip = self.trip_interval();
        DayInterval::new(trip.start, trip.end.saturating_add(self.rta_span_days()))
    }

    /// Calendar day the unit can take new work again. Saturates at the end
    /// of the calendar for absurdly long RTAs.
    pub fn free_from(&self, reference: NaiveDate) -> NaiveDate {
        Duration::try_days(self.busy_interval().end)
            .and_then(|days| reference.checked_add_signed(days))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// First existing assignment whose busy interval overlaps `candidate`.
///
/// The assignment belonging to `ignore_order_id` is skipped so a trip can be
/// moved within its own unit.
pub fn find_conflict<'a>(
    candidate: &DayInterval,
    existing: &'a [Assignment],
    ignore_order_id: Option<&str>,
) -> Option<&'a Assignment> {
    existing
        .iter()
        .filter(|assignment| Some(assignment.order_id.as_str()) != ignore_order_id)
        .find(|assignment| assignment.busy_interval().overlaps(candidate))
}

pub fn overlaps(
    candidate: &DayInterval,
    existing: &[Assignment],
    ignore_order_id: Option<&str>,
) -> bool {
    find_conflict(candidate, existing, ignore_order_id).is_some()
}

/// Conflict check for dropping a whole trip (with its own RTA) onto a unit.
pub fn check_move<'a>(
    candidate: &Assignment,
    existing: &'a [Assignment],
) -> Option<&'a Assignment> {
    existing
        .iter()
        .filter(|assignment| assignment.fleet_unit_id == candidate.fleet_unit_id)
        .filter(|assignment| assignment.order_id != candidate.order_id)
        .find(|assignment| assignment.busy_interval().overlaps(&candidate.busy_interval()))
}
