//! # Occupancy Scheduler
//!
//! Computes how long a fleet unit stays unavailable after a trip (RTA) and
//! detects collisions between a proposed assignment and the unit's existing
//! ones. Both the compatibility validator and trip moves go through
//! [`find_conflict`], so the "ignore the same order" rule lives in one place.

pub mod occupancy;
pub mod rta;
pub mod timeline;

pub use occupancy::{check_move, day_offset, find_conflict, overlaps, Assignment, DayInterval};
pub use rta::{
    compute_rta, should_show_rta, RtaPolicy, DEFAULT_FALLBACK_TRIP_RATIO, DEFAULT_MIN_RTA_DAYS,
    RTA_DISPLAY_THRESHOLD_DAYS,
};
pub use timeline::{OccupancyTimeline, TimelineEntry};
