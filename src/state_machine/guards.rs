use super::errors::{StateMachineError, StateMachineResult};
use super::states::{Stage, Substatus};
use super::transitions::is_valid_transition;
use crate::models::DispatchOrder;

/// Guard conditions for order lifecycle transitions
#[derive(Debug)]
pub struct TransitionGuard;

impl TransitionGuard {
    /// Check whether `order` may move to `(to_stage, to_substatus)`.
    ///
    /// An order whose own stage does not own its substatus is malformed and
    /// refuses every move. Cancellation is refused outright outside cancelable
    /// stages so the caller gets the more specific error instead of a generic
    /// table miss.
    pub fn check(
        order: &DispatchOrder,
        to_stage: Stage,
        to_substatus: Substatus,
    ) -> StateMachineResult<()> {
        if order.substatus != Substatus::Canceled && !order.stage.owns(order.substatus) {
            return Err(StateMachineError::StageMismatch {
                stage: order.stage,
                substatus: order.substatus,
            });
        }

        if to_substatus == Substatus::Canceled && !order.stage.is_cancelable() {
            return Err(StateMachineError::NotCancelable { stage: order.stage });
        }

        if to_substatus != Substatus::Canceled && !to_stage.owns(to_substatus) {
            return Err(StateMachineError::StageMismatch {
                stage: to_stage,
                substatus: to_substatus,
            });
        }

        if is_valid_transition(order.substatus, to_stage, to_substatus) {
            Ok(())
        } else {
            Err(StateMachineError::InvalidTransition {
                from: order.substatus,
                to_stage,
                to_substatus,
            })
        }
    }
}

/// Apply a guarded transition in place; the order is untouched on rejection.
pub fn apply_transition(
    order: &mut DispatchOrder,
    to_stage: Stage,
    to_substatus: Substatus,
) -> StateMachineResult<()> {
    TransitionGuard::check(order, to_stage, to_substatus)?;
    order.stage = to_stage;
    order.substatus = to_substatus;
    Ok(())
}

/// Cancel an order, keeping the stage it was canceled in.
pub fn cancel(order: &mut DispatchOrder) -> StateMachineResult<()> {
    let stage = order.stage;
    apply_transition(order, stage, Substatus::Canceled)
}
