//! Snapshot, apply, then commit or roll back.
//!
//! The local change is guarded by the state machine and applied under the
//! order's entry lock together with the snapshot. The remote commit runs
//! without any lock held; its answer replaces the speculative copy, and on
//! failure the snapshot is put back verbatim.

use super::board::OrderBoard;
use super::committer::DispatchCommitter;
use crate::error::{DispatchError, Result};
use crate::log_dispatch;
use crate::models::{DispatchOrder, FleetUnit};
use crate::state_machine::{apply_transition, Stage, Substatus};
use tracing::debug;

/// A change that needs the dispatch service's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteAction {
    Assign {
        fleet_unit_id: String,
        carrier_id: String,
    },
    Unassign,
    SendToCarrier,
}

impl RemoteAction {
    pub fn assign_to(unit: &FleetUnit) -> Self {
        Self::Assign {
            fleet_unit_id: unit.id.clone(),
            carrier_id: unit.carrier_id.clone(),
        }
    }

    pub fn target(&self) -> (Stage, Substatus) {
        match self {
            Self::Assign { .. } => (Stage::Dispatch, Substatus::Assigned),
            Self::Unassign => (Stage::Dispatch, Substatus::Unassigned),
            Self::SendToCarrier => (Stage::Tenders, Substatus::Pending),
        }
    }

    /// Local preconditions and state-machine guard, without mutating
    pub fn check(&self, order: &DispatchOrder) -> Result<()> {
        let mut scratch = order.clone();
        self.apply_locally(&mut scratch)
    }

    /// Speculative local change
    pub fn apply_locally(&self, order: &mut DispatchOrder) -> Result<()> {
        if matches!(self, Self::SendToCarrier)
            && (order.fleet_unit_id.is_none() || order.carrier_id.is_none())
        {
            return Err(DispatchError::InvalidInput(format!(
                "Order {} has a missing fleet assignment",
                order.id
            )));
        }

        let (to_stage, to_substatus) = self.target();
        apply_transition(order, to_stage, to_substatus)?;

        match self {
            Self::Assign {
                fleet_unit_id,
                carrier_id,
            } => {
                order.fleet_unit_id = Some(fleet_unit_id.clone());
                order.carrier_id = Some(carrier_id.clone());
            }
            Self::Unassign => {
                order.fleet_unit_id = None;
                order.carrier_id = None;
            }
            Self::SendToCarrier => {}
        }
        Ok(())
    }

    async fn commit(
        &self,
        committer: &dyn DispatchCommitter,
        order_id: &str,
    ) -> Result<DispatchOrder> {
        let response = match self {
            Self::Assign { fleet_unit_id, .. } => committer.assign(order_id, fleet_unit_id).await,
            Self::Unassign => committer.unassign(order_id).await,
            Self::SendToCarrier => committer.send_to_carrier(order_id).await,
        };
        response.map_err(|e| e.into_dispatch_error(order_id))
    }
}

/// How one optimistic update ended
#[derive(Debug, Clone, PartialEq)]
pub enum OptimisticOutcome {
    /// Remote accepted; local state holds the authoritative order
    Committed(DispatchOrder),
    /// Remote failed; local state was restored to `snapshot`
    RolledBack {
        snapshot: DispatchOrder,
        error: DispatchError,
    },
    /// Refused locally; nothing was mutated and nothing was sent
    Rejected(DispatchError),
}

impl OptimisticOutcome {
    pub fn into_result(self) -> Result<DispatchOrder> {
        match self {
            Self::Committed(order) => Ok(order),
            Self::RolledBack { error, .. } | Self::Rejected(error) => Err(error),
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Run `action` against `order_id` with rollback on remote failure
pub async fn execute_optimistic(
    board: &OrderBoard,
    committer: &dyn DispatchCommitter,
    order_id: &str,
    action: &RemoteAction,
) -> OptimisticOutcome {
    let snapshot = match board.apply(order_id, |order| action.apply_locally(order)) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            debug!(order_id = %order_id, error = %error, "Optimistic update refused locally");
            return OptimisticOutcome::Rejected(error);
        }
    };

    match action.commit(committer, order_id).await {
        Ok(authoritative) => {
            board.upsert(authoritative.clone());
            log_dispatch!(
                debug,
                "COMMITTED",
                order_id: order_id,
                stage: authoritative.stage,
                substatus: authoritative.substatus,
            );
            OptimisticOutcome::Committed(authoritative)
        }
        Err(error) => {
            log_dispatch!(
                warn,
                "ROLLBACK",
                order_id: order_id,
                error: error.to_string(),
                restored_substatus: snapshot.substatus,
            );
            board.restore(snapshot.clone());
            OptimisticOutcome::RolledBack { snapshot, error }
        }
    }
}

/// Assign `order_id` to `unit` optimistically.
pub async fn assign_optimistic(
    board: &OrderBoard,
    committer: &dyn DispatchCommitter,
    order_id: &str,
    unit: &FleetUnit,
) -> Result<DispatchOrder> {
    execute_optimistic(board, committer, order_id, &RemoteAction::assign_to(unit))
        .await
        .into_result()
}

/// Release the order's fleet unit optimistically.
pub async fn unassign_optimistic(
    board: &OrderBoard,
    committer: &dyn DispatchCommitter,
    order_id: &str,
) -> Result<DispatchOrder> {
    execute_optimistic(board, committer, order_id, &RemoteAction::Unassign)
        .await
        .into_result()
}

pub async fn send_to_carrier_optimistic(
    board: &OrderBoard,
    committer: &dyn DispatchCommitter,
    order_id: &str,
) -> Result<DispatchOrder> {
    execute_optimistic(board, committer, order_id, &RemoteAction::SendToCarrier)
        .await
        .into_result()
}
