use super::states::{Stage, Substatus};
use crate::error::DispatchError;
use thiserror::Error;

/// Error types for order lifecycle transitions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateMachineError {
    #[error("Invalid state transition from {from} to ({to_stage}, {to_substatus})")]
    InvalidTransition {
        from: Substatus,
        to_stage: Stage,
        to_substatus: Substatus,
    },

    #[error("Orders in stage {stage} cannot be canceled")]
    NotCancelable { stage: Stage },

    #[error("Substatus {substatus} does not belong to stage {stage}")]
    StageMismatch { stage: Stage, substatus: Substatus },
}

pub type StateMachineResult<T> = Result<T, StateMachineError>;

impl From<StateMachineError> for DispatchError {
    fn from(err: StateMachineError) -> Self {
        match err {
            StateMachineError::InvalidTransition {
                from,
                to_stage,
                to_substatus,
            } => DispatchError::IllegalTransition {
                from,
                to_stage,
                to_substatus,
            },
            StateMachineError::NotCancelable { stage } => DispatchError::NotCancelable { stage },
            StateMachineError::StageMismatch { .. } => DispatchError::InvalidInput(err.to_string()),
        }
    }
}
