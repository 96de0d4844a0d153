use super::{ConstraintKind, SchedulingContext, ValidationResult};
use crate::models::{DispatchOrder, FleetUnit, LoadProfile, PlacementCandidate};
use crate::scheduling::{day_offset, find_conflict};
use crate::services::Clock;
use std::sync::Arc;
use tracing::debug;

/// Evaluates one load against one fleet unit
#[derive(Debug, Clone)]
pub struct CompatibilityValidator {
    clock: Arc<dyn Clock>,
}

impl CompatibilityValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn validate(
        &self,
        order: &DispatchOrder,
        unit: &FleetUnit,
        context: &SchedulingContext,
    ) -> ValidationResult {
        self.validate_load(&LoadProfile::from_order(order), unit, context)
    }

    pub fn validate_candidate(
        &self,
        candidate: &PlacementCandidate,
        unit: &FleetUnit,
        context: &SchedulingContext,
    ) -> ValidationResult {
        self.validate_load(&candidate.load_profile(), unit, context)
    }

    /// First unit in `units` that accepts `candidate`, or every unit's verdict.
    pub fn first_compatible_unit<'a, F>(
        &self,
        candidate: &PlacementCandidate,
        units: &'a [FleetUnit],
        mut context_for: F,
    ) -> Result<&'a FleetUnit, Vec<(String, ValidationResult)>>
    where
        F: FnMut(&FleetUnit) -> SchedulingContext,
    {
        let load = candidate.load_profile();
        let mut rejections = Vec::with_capacity(units.len());

        for unit in units {
            let verdict = self.validate_load(&load, unit, &context_for(unit));
            if verdict.is_valid {
                return Ok(unit);
            }
            rejections.push((unit.id.clone(), verdict));
        }

        Err(rejections)
    }

    fn validate_load(
        &self,
        load: &LoadProfile,
        unit: &FleetUnit,
        context: &SchedulingContext,
    ) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if let Some((component, status)) = unit.inactive_component() {
            result.push(
                ConstraintKind::OperationalStatus,
                format!(
                    "Unit {} is not operational: {component} is {status}",
                    unit.label()
                ),
            );
            return result;
        }

        self.check_past_date(context, &mut result);
        check_schedule(load, context, &mut result);
        check_weight(load, unit, &mut result);
        check_temperature(load, unit, &mut result);
        check_zones(load, unit, &mut result);

        debug!(
            order_id = %load.order_id,
            fleet_unit_id = %unit.id,
            is_valid = result.is_valid,
            error_count = result.errors.len(),
            "Compatibility evaluated"
        );

        result
    }

    fn check_past_date(&self, context: &SchedulingContext, result: &mut ValidationResult) {
        let Some(target) = context.target_date else {
            return;
        };
        let today = self.clock.today();
        if target < today {
            result.push(
                ConstraintKind::PastDate,
                format!("Target date {target} is in the past (today is {today})"),
            );
        }
    }
}

fn check_schedule(load: &LoadProfile, context: &SchedulingContext, result: &mut ValidationResult) {
    let (Some(target), Some(reference), Some(existing)) = (
        context.target_date,
        context.reference_date,
        context.existing_assignments.as_deref(),
    ) else {
        return;
    };

    let candidate = load.occupied_interval(day_offset(target, reference));
    let ignore = context.ignore_order_id.as_deref().unwrap_or(load.order_id.as_str());
    if let Some(conflict) = find_conflict(&candidate, existing, Some(ignore)) {
        result.push(
            ConstraintKind::SchedulingConflict,
            format!(
                "Unit is busy with trip {} (order {}) and is available again on {}",
                conflict.lane_label,
                conflict.order_id,
                conflict.free_from(reference)
            ),
        );
    }
}

fn check_weight(load: &LoadProfile, unit: &FleetUnit, result: &mut ValidationResult) {
    let capacity = unit.capacity_tonnes();
    if capacity < load.total_tonnes {
        result.push(
            ConstraintKind::WeightCapacity,
            format!(
                "Load of {:.1} Tn exceeds unit capacity of {:.1} Tn",
                load.total_tonnes, capacity
            ),
        );
    }
}

fn check_temperature(load: &LoadProfile, unit: &FleetUnit, result: &mut ValidationResult) {
    let Some(required) = load.required_envelope() else {
        return;
    };

    if unit.temp_min_c > required.min_c {
        result.push(
            ConstraintKind::TemperatureMin,
            format!(
                "Unit minimum temperature {}°C is above the required {}°C",
                unit.temp_min_c, required.min_c
            ),
        );
    }
    if unit.temp_max_c < required.max_c {
        result.push(
            ConstraintKind::TemperatureMax,
            format!(
                "Unit maximum temperature {}°C is below the required {}°C",
                unit.temp_max_c, required.max_c
            ),
        );
    }
}

fn check_zones(load: &LoadProfile, unit: &FleetUnit, result: &mut ValidationResult) {
    let products = load.unique_products;
    if products <= 1 || load.fits_single_zone() {
        return;
    }

    let compartments = unit.compartments as usize;
    if unit.supports_multi_zone && compartments >= products {
        return;
    }

    if unit.supports_multi_zone {
        result.push(
            ConstraintKind::InsufficientCompartments,
            format!(
                "Insufficient compartments: {products} products need {products} \
                 compartments, unit has {compartments}"
            ),
        );
    } else if compartments <= 1 {
        result.push(
            ConstraintKind::NoMultiZoneSupport,
            format!(
                "Unit does not support multi-zone: {products} products need separate \
                 temperature zones"
            ),
        );
    } else {
        result.push(
            ConstraintKind::IrreconcilableTemperature,
            format!(
                "Irreconcilable temperature conflict: {compartments} compartments share one \
                 thermal zone but the {products} products have no common range"
            ),
        );
    }
}
