//! Return-to-Availability (RTA) estimation.
//!
//! RTA is the time a fleet unit needs after finishing a trip before it can be
//! dispatched again. Estimates are taken, in order of preference, from the
//! lane's transit time, from the trip length, or from the configured minimum.

use crate::models::Lane;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_RTA_DAYS: f64 = 0.5;
pub const DEFAULT_FALLBACK_TRIP_RATIO: f64 = 0.5;

/// Below this an RTA is neither drawn nor counted as occupancy
pub const RTA_DISPLAY_THRESHOLD_DAYS: f64 = 0.5;

const HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RtaPolicy {
    /// Floor used when no lane transit time is known
    pub min_rta_days: f64,
    /// Share of the trip length assumed for the way back
    pub fallback_trip_ratio: f64,
}

impl Default for RtaPolicy {
    fn default() -> Self {
        Self {
            min_rta_days: DEFAULT_MIN_RTA_DAYS,
            fallback_trip_ratio: DEFAULT_FALLBACK_TRIP_RATIO,
        }
    }
}

impl RtaPolicy {
    /// RTA in days. No upper cap: a week-long lane yields a week of RTA.
    pub fn compute(&self, lane: Option<&Lane>, trip_duration_days: Option<f64>) -> f64 {
        if let Some(hours) = lane.and_then(Lane::positive_transit_hours) {
            return round_to_tenth(hours / HOURS_PER_DAY);
        }

        match trip_duration_days {
            Some(days) => (days * self.fallback_trip_ratio).max(self.min_rta_days),
            None => self.min_rta_days,
        }
    }
}

/// RTA with the default policy
pub fn compute_rta(lane: Option<&Lane>, trip_duration_days: Option<f64>) -> f64 {
    RtaPolicy::default().compute(lane, trip_duration_days)
}

pub fn should_show_rta(days: f64) -> bool {
    days >= RTA_DISPLAY_THRESHOLD_DAYS
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rta_from_lane_transit_time() {
        let lane = Lane::new("SCL", "ANF").with_transit_hours(48.0);
        assert_eq!(compute_rta(Some(&lane), Some(7.0)), 2.0);
    }

    #[test]
    fn test_rta_rounds_to_one_decimal() {
        let lane = Lane::new("SCL", "VAP").with_transit_hours(7.0);
        // 7 / 24 = 0.2916..
        assert_eq!(compute_rta(Some(&lane), None), 0.3);
    }

    #[test]
    fn test_rta_from_trip_duration() {
        assert_eq!(compute_rta(None, Some(7.0)), 3.5);
        assert_eq!(compute_rta(None, Some(0.4)), 0.5);
    }

    #[test]
    fn test_zero_transit_falls_back_to_trip() {
        let lane = Lane::new("SCL", "ANF").with_transit_hours(0.0);
        assert_eq!(compute_rta(Some(&lane), Some(3.0)), 1.5);
    }

    #[test]
    fn test_rta_default_minimum() {
        assert_eq!(compute_rta(None, None), 0.5);
        let policy = RtaPolicy {
            min_rta_days: 1.0,
            ..RtaPolicy::default()
        };
        assert_eq!(policy.compute(None, None), 1.0);
    }

    #[test]
    fn test_no_upper_cap() {
        let lane = Lane::new("SCL", "PUQ").with_transit_hours(168.0);
        assert_eq!(compute_rta(Some(&lane), None), 7.0);
    }

    #[test]
    fn test_should_show_rta_threshold() {
        assert!(should_show_rta(0.5));
        assert!(should_show_rta(3.5));
        assert!(!should_show_rta(0.3));
    }
}
