//! Error types for the dispatch engine.
//!

use crate::state_machine::{Stage, Substatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("Illegal transition: {from} -> ({to_stage}, {to_substatus})")]
    IllegalTransition {
        from: Substatus,
        to_stage: Stage,
        to_substatus: Substatus,
    },
    #[error("Stage {stage} is not cancelable")]
    NotCancelable { stage: Stage },
    #[error("Constraint violation: {}", .0.join("; "))]
    ConstraintViolation(Vec<String>),
    #[error("Scheduling conflict: {0}")]
    SchedulingConflict(String),
    #[error("Remote commit failed for order {order_id}: {reason}")]
    RemoteCommit { order_id: String, reason: String },
    #[error("Order not found: {0}")]
    OrderNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Whether the caller can recover by picking another unit or date, or by retrying.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::IllegalTransition { .. } | Self::NotCancelable { .. } | Self::Internal(_)
        )
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(error: serde_json::Error) -> Self {
        DispatchError::InvalidInput(format!("JSON serialization error: {error}"))
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
