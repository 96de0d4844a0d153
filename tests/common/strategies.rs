#![allow(dead_code)]

use dispatch_core::{Assignment, DayInterval, Stage, Substatus};
use proptest::prelude::*;

/// Any substatus, including terminal ones
pub fn substatus_strategy() -> impl Strategy<Value = Substatus> {
    prop::sample::select(Substatus::ALL.to_vec())
}

pub fn stage_strategy() -> impl Strategy<Value = Stage> {
    prop::sample::select(Stage::ALL.to_vec())
}

/// Half-open day intervals within a two-month chart
pub fn interval_strategy() -> impl Strategy<Value = DayInterval> {
    (-10i64..50, 0i64..10).prop_map(|(start, len)| DayInterval::new(start, start + len))
}

/// Assignments on a single unit with realistic trip and RTA lengths
pub fn assignment_strategy() -> impl Strategy<Value = Assignment> {
    (
        "[a-z]{3}-[0-9]{1,3}",
        0i64..40,
        1i64..6,
        prop_oneof![Just(0.0), Just(0.3), 0.5f64..5.0],
    )
        .prop_map(|(order_id, day_offset, duration_days, rta)| Assignment {
            fleet_unit_id: "u-1".to_string(),
            order_id,
            day_offset,
            duration_days,
            rta_duration_days: rta,
            lane_label: "SCL → ANF".to_string(),
        })
}

/// Lane transit hours, including zero and missing values
pub fn transit_hours_strategy() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(prop_oneof![Just(0.0), 0.1f64..400.0])
}
