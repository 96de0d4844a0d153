//! # Compatibility Validation
//!
//! Decides whether a fleet unit may carry a load on a given day. The checks run
//! in a fixed order:
//!
//! 1. Operational status (blocking: stops evaluation with a single error)
//! 2. Past target date
//! 3. RTA / overlap with the unit's other trips
//! 4. Weight capacity
//! 5. Temperature envelope
//! 6. Multi-zone / compartments
//!
//! Every non-blocking failure is reported so the planner sees the full picture.

pub mod compatibility;

pub use compatibility::CompatibilityValidator;

use crate::error::DispatchError;
use crate::scheduling::Assignment;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Categories of constraint failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    OperationalStatus,
    PastDate,
    SchedulingConflict,
    WeightCapacity,
    TemperatureMin,
    TemperatureMax,
    NoMultiZoneSupport,
    InsufficientCompartments,
    IrreconcilableTemperature,
}

impl ConstraintKind {
    /// Blocking constraints end evaluation immediately
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::OperationalStatus)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub kind: ConstraintKind,
    pub message: String,
}

/// Outcome of a compatibility check
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Human-readable reasons, in evaluation order
    pub errors: Vec<String>,
    pub violations: Vec<ConstraintViolation>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: ConstraintKind, message: impl Into<String>) {
        let message = message.into();
        self.errors.push(message.clone());
        self.violations.push(ConstraintViolation { kind, message });
        self.is_valid = false;
    }

    pub fn has(&self, kind: ConstraintKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    pub fn into_result(self) -> Result<(), DispatchError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(DispatchError::ConstraintViolation(self.errors))
        }
    }
}

/// Where and among what the load would be placed. Everything is optional:
/// missing pieces simply disable the checks that need them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulingContext {
    /// Day the planner wants the trip to start
    pub target_date: Option<NaiveDate>,
    /// Day offset zero of the chart
    pub reference_date: Option<NaiveDate>,
    /// The candidate unit's current trips
    pub existing_assignments: Option<Vec<Assignment>>,
    /// Assignment to leave out of the overlap check; defaults to the load's own order
    pub ignore_order_id: Option<String>,
}

impl SchedulingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(target_date: NaiveDate) -> Self {
        Self {
            target_date: Some(target_date),
            ..Self::default()
        }
    }

    pub fn with_schedule(mut self, reference_date: NaiveDate, existing: Vec<Assignment>) -> Self {
        self.reference_date = Some(reference_date);
        self.existing_assignments = Some(existing);
        self
    }

    pub fn ignoring(mut self, order_id: impl Into<String>) -> Self {
        self.ignore_order_id = Some(order_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_invalidates() {
        let mut result = ValidationResult::ok();
        assert!(result.is_valid);
        assert!(result.clone().into_result().is_ok());

        result.push(ConstraintKind::WeightCapacity, "too heavy");
        assert!(!result.is_valid);
        assert!(result.has(ConstraintKind::WeightCapacity));
        assert_eq!(
            result.into_result().unwrap_err(),
            DispatchError::ConstraintViolation(vec!["too heavy".to_string()])
        );
    }
}
