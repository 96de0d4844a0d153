//! Compatibility checks between loads and fleet units.

mod common;

use common::{reefer, today, OrderBuilder};
use dispatch_core::{
    Assignment, CompatibilityValidator, ConstraintKind, FixedClock, FleetUnit, Lane,
    OccupancyTimeline, OperationalStatus, PlacementCandidate, RtaPolicy, SchedulingContext,
};
use dispatch_core::{LaneTable, OrderBoard};
use std::sync::Arc;

fn validator() -> CompatibilityValidator {
    CompatibilityValidator::new(Arc::new(FixedClock::on(today())))
}

#[test]
fn overweight_single_product_order_reports_only_weight() {
    let order = OrderBuilder::new("o-1").item("cement", 12.0).build();
    let unit = reefer("u-10t", 10_000.0);

    let result = validator().validate(&order, &unit, &SchedulingContext::new());

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("12.0"));
    assert!(result.errors[0].contains("10.0"));
}

#[test]
fn maintenance_unit_yields_exactly_one_error() {
    let mut unit = reefer("u-1", 1_000.0);
    unit.operational_status.vehicle = OperationalStatus::Maintenance;
    let order = OrderBuilder::new("o-1")
        .starting_in_days(-3)
        .item("cement", 40.0)
        .build();

    let context = SchedulingContext::on(order.planned_start_date());
    let result = validator().validate(&order, &unit, &context);

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.violations[0].kind, ConstraintKind::OperationalStatus);
}

#[test]
fn disjoint_products_need_enough_thermal_zones() {
    let order = OrderBuilder::new("o-1")
        .chilled_item("frozen-peas", 3.0, -22.0, -18.0)
        .chilled_item("fresh-milk", 3.0, 2.0, 6.0)
        .build();

    let single = reefer("u-1", 20_000.0);
    let result = validator().validate(&order, &single, &SchedulingContext::new());
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ConstraintKind::NoMultiZoneSupport);
    assert!(result.errors[0].contains("multi-zone"));

    let dual = reefer("u-2", 20_000.0).with_zones(2, true);
    assert!(validator().validate(&order, &dual, &SchedulingContext::new()).is_valid);
}

#[test]
fn errors_accumulate_in_evaluation_order() {
    let unit = FleetUnit::new("u-1", "carrier-a", 5_000.0, 0.0, 4.0);
    let order = OrderBuilder::new("o-1")
        .starting_in_days(-1)
        .chilled_item("ice", 4.0, -20.0, -15.0)
        .chilled_item("bananas", 4.0, 12.0, 14.0)
        .build();

    let context = SchedulingContext::on(order.planned_start_date());
    let result = validator().validate(&order, &unit, &context);

    let kinds: Vec<_> = result.violations.iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ConstraintKind::PastDate,
            ConstraintKind::WeightCapacity,
            ConstraintKind::TemperatureMin,
            ConstraintKind::TemperatureMax,
            ConstraintKind::NoMultiZoneSupport,
        ]
    );
}

#[test]
fn rta_blocks_the_days_after_an_existing_trip() {
    let lanes: LaneTable = vec![Lane::new("SCL", "PMC").with_transit_hours(48.0)]
        .into_iter()
        .collect();
    let existing = OrderBuilder::new("o-busy")
        .lane("SCL", "PMC")
        .starting_in_days(1)
        .lasting_hours(20)
        .assigned_to("u-1", "carrier-a")
        .build();
    let board = OrderBoard::from_orders([existing]);
    let timeline = OccupancyTimeline::build(
        "u-1",
        &board.orders(),
        today(),
        &lanes,
        &RtaPolicy::default(),
    );

    // Trip on day 1, RTA of 2 days blocks days 2 and 3
    let candidate = OrderBuilder::new("o-new").item("cement", 1.0).build();
    for (day, free) in [(1, false), (2, false), (3, false), (4, true)] {
        let target = today() + chrono::Duration::days(day);
        let context = SchedulingContext::on(target)
            .with_schedule(today(), timeline.assignments().to_vec());
        let result = validator().validate(&candidate, &reefer("u-1", 20_000.0), &context);
        assert_eq!(result.is_valid, free, "day {day}: {:?}", result.errors);
        if !free {
            assert!(result.errors[0].contains("SCL → PMC"));
        }
    }
}

#[test]
fn moving_a_trip_within_its_own_unit_ignores_itself() {
    let order = OrderBuilder::new("o-1")
        .assigned_to("u-1", "carrier-a")
        .item("cement", 1.0)
        .build();
    let own = Assignment::for_order(&order, "u-1", today(), None, &RtaPolicy::default());
    let candidate = PlacementCandidate::Trip {
        order: order.clone(),
        assignment: own.clone(),
    };

    let context = SchedulingContext::on(order.planned_start_date())
        .with_schedule(today(), vec![own.clone()]);
    assert!(validator()
        .validate_candidate(&candidate, &reefer("u-1", 20_000.0), &context)
        .is_valid);

    // An explicit ignore id overrides the load's own id
    let context = context.ignoring("someone-else");
    assert!(validator()
        .validate_candidate(&candidate, &reefer("u-1", 20_000.0), &context)
        .has(ConstraintKind::SchedulingConflict));
}

#[test]
fn moved_trip_is_checked_over_its_whole_length() {
    // 60 hours on the road: three days on the chart
    let order = OrderBuilder::new("o-move")
        .lasting_hours(60)
        .item("cement", 1.0)
        .build();
    let moving = Assignment::for_order(&order, "u-1", today(), None, &RtaPolicy::default());
    assert_eq!(moving.duration_days, 3);

    let blocker = Assignment {
        fleet_unit_id: "u-1".to_string(),
        order_id: "o-other".to_string(),
        day_offset: 7,
        duration_days: 1,
        rta_duration_days: 0.0,
        lane_label: "SCL → PMC".to_string(),
    };
    let unit = reefer("u-1", 20_000.0);
    let context = SchedulingContext::on(today() + chrono::Duration::days(5))
        .with_schedule(today(), vec![blocker]);

    // As a fresh order only the start day is claimed
    assert!(validator().validate(&order, &unit, &context).is_valid);

    let candidate = PlacementCandidate::Trip {
        order,
        assignment: moving,
    };
    let result = validator().validate_candidate(&candidate, &unit, &context);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ConstraintKind::SchedulingConflict);
    assert!(result.errors[0].contains("o-other"));
}

#[test]
fn verdict_serializes_for_the_caller() {
    let order = OrderBuilder::new("o-1").item("cement", 30.0).build();
    let result = validator().validate(&order, &reefer("u-1", 10_000.0), &SchedulingContext::new());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["is_valid"], false);
    assert_eq!(json["violations"][0]["kind"], "weight_capacity");
}
