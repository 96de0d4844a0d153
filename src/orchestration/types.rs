//! # Batch Types
//!
//! Operations a batch can run and the aggregated per-order outcome.

use crate::models::{DispatchOrder, FleetUnit};
use crate::state_machine::{Stage, Substatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What to do with every order of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum BatchOperation {
    /// Put each order on the first compatible unit, tried in the given order
    AutoAssign { candidates: Vec<FleetUnit> },
    /// Tender assigned orders to their carrier
    SendToCarrier,
    /// Release the fleet unit
    Unassign,
    /// Local guarded cancel; no remote call
    Cancel,
    /// Local guarded transition; no remote call
    Transition {
        to_stage: Stage,
        to_substatus: Substatus,
    },
}

impl BatchOperation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AutoAssign { .. } => "auto_assign",
            Self::SendToCarrier => "send_to_carrier",
            Self::Unassign => "unassign",
            Self::Cancel => "cancel",
            Self::Transition { .. } => "transition",
        }
    }

    /// Operations that need a live planned date
    pub fn rejects_expired(&self) -> bool {
        matches!(self, Self::AutoAssign { .. } | Self::SendToCarrier)
    }

    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::AutoAssign { .. } | Self::SendToCarrier | Self::Unassign
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    OrderNotFound,
    /// The id already appeared earlier in the same batch
    DuplicateOrderId,
    ExpiredPlannedDate,
    MissingFleetAssignment,
    IllegalTransition,
    NoCompatibleUnit,
    RemoteCommit,
    Internal,
}

impl FailureReason {
    /// Rejected before any remote call was made
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::RemoteCommit | Self::Internal)
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::OrderNotFound => "order not found",
            Self::DuplicateOrderId => "duplicate order id",
            Self::ExpiredPlannedDate => "expired planned date",
            Self::MissingFleetAssignment => "missing fleet assignment",
            Self::IllegalTransition => "illegal transition",
            Self::NoCompatibleUnit => "no compatible unit",
            Self::RemoteCommit => "remote commit failed",
            Self::Internal => "internal error",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSuccess {
    pub order_id: String,
    /// State after the operation (authoritative for remote operations)
    pub order: DispatchOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub order_id: String,
    pub reason: FailureReason,
    pub message: String,
}

impl BatchFailure {
    pub fn new(
        order_id: impl Into<String>,
        reason: FailureReason,
        message: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            reason,
            message: message.into(),
        }
    }
}

/// One entry per submitted order id, successes and failures kept apart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub operation: String,
    pub total: usize,
    pub success_count: usize,
    pub fail_count: usize,
    pub successful: Vec<BatchSuccess>,
    pub failed: Vec<BatchFailure>,
    pub duration_ms: u64,
}

impl BatchResult {
    pub fn new(
        batch_id: Uuid,
        operation: &BatchOperation,
        successful: Vec<BatchSuccess>,
        failed: Vec<BatchFailure>,
        duration_ms: u64,
    ) -> Self {
        Self {
            batch_id,
            operation: operation.name().to_string(),
            total: successful.len() + failed.len(),
            success_count: successful.len(),
            fail_count: failed.len(),
            successful,
            failed,
            duration_ms,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.fail_count == 0
    }

    pub fn failure_for(&self, order_id: &str) -> Option<&BatchFailure> {
        self.failed.iter().find(|f| f.order_id == order_id)
    }

    pub fn success_for(&self, order_id: &str) -> Option<&BatchSuccess> {
        self.successful.iter().find(|s| s.order_id == order_id)
    }
}
