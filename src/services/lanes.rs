//! Lane lookup collaborator.

use crate::models::{DispatchOrder, Lane};
use std::collections::HashMap;

/// Source of lane timings used for RTA estimation
pub trait LaneLookup: Send + Sync {
    fn find_lane(&self, origin: &str, destination: &str) -> Option<Lane>;

    fn lane_for(&self, order: &DispatchOrder) -> Option<Lane> {
        self.find_lane(&order.origin, &order.destination)
    }
}

/// In-memory lane table keyed by `(origin, destination)`
#[derive(Debug, Clone, Default)]
pub struct LaneTable {
    lanes: HashMap<(String, String), Lane>,
}

impl LaneTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lane: Lane) -> Option<Lane> {
        self.lanes
            .insert((lane.origin.clone(), lane.destination.clone()), lane)
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

impl FromIterator<Lane> for LaneTable {
    fn from_iter<I: IntoIterator<Item = Lane>>(iter: I) -> Self {
        let mut table = LaneTable::new();
        for lane in iter {
            table.insert(lane);
        }
        table
    }
}

impl LaneLookup for LaneTable {
    fn find_lane(&self, origin: &str, destination: &str) -> Option<Lane> {
        self.lanes
            .get(&(origin.to_string(), destination.to_string()))
            .cloned()
    }
}
