//! # Batch Orchestrator
//!
//! Runs one operation over many orders without letting a single failure stop
//! the batch. Every order goes through three phases:
//!
//! 1. **Pre-filter**: repeated or unknown ids, expired planned dates, missing
//!    fleet assignments and illegal transitions are rejected locally and never
//!    reach the committer. Only the first occurrence of an id is processed.
//! 2. **Plan** (auto-assign only): orders are placed one after another on the
//!    first compatible candidate unit. Each planned trip is reserved on that
//!    unit's timeline so later orders of the same batch see it.
//! 3. **Commit**: remote changes are spawned together, bounded by a semaphore,
//!    and joined. Each item updates or restores its own local state.
//!
//! Local operations (`Cancel`, `Transition`) are applied directly on the board.

use super::board::OrderBoard;
use super::committer::DispatchCommitter;
use super::optimistic::{execute_optimistic, OptimisticOutcome, RemoteAction};
use super::types::{BatchFailure, BatchOperation, BatchResult, BatchSuccess, FailureReason};
use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::log_batch;
use crate::models::{DispatchOrder, FleetUnit, PlacementCandidate};
use crate::scheduling::{Assignment, OccupancyTimeline, RtaPolicy};
use crate::services::{Clock, LaneLookup};
use crate::state_machine::{apply_transition, cancel, Stage, Substatus, TransitionGuard};
use crate::validation::{CompatibilityValidator, SchedulingContext};
use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error};
use uuid::Uuid;

/// Drives batch operations against an [`OrderBoard`]
#[derive(Clone)]
pub struct BatchOrchestrator {
    committer: Arc<dyn DispatchCommitter>,
    lanes: Arc<dyn LaneLookup>,
    clock: Arc<dyn Clock>,
    validator: CompatibilityValidator,
    policy: RtaPolicy,
    max_concurrent_commits: usize,
}

impl fmt::Debug for BatchOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchOrchestrator")
            .field("clock", &self.clock)
            .field("policy", &self.policy)
            .field("max_concurrent_commits", &self.max_concurrent_commits)
            .finish_non_exhaustive()
    }
}

impl BatchOrchestrator {
    pub fn new(
        committer: Arc<dyn DispatchCommitter>,
        lanes: Arc<dyn LaneLookup>,
        clock: Arc<dyn Clock>,
        config: &DispatchConfig,
    ) -> Self {
        Self {
            committer,
            lanes,
            validator: CompatibilityValidator::new(Arc::clone(&clock)),
            clock,
            policy: config.scheduling.rta_policy(),
            max_concurrent_commits: config.batch.max_concurrent_commits.max(1),
        }
    }

    pub fn validator(&self) -> &CompatibilityValidator {
        &self.validator
    }

    /// Apply `operation` to every id in `order_ids`.
    ///
    /// Partial failure is reported in the result, never as an error.
    pub async fn run_batch<I, S>(
        &self,
        board: &OrderBoard,
        order_ids: I,
        operation: BatchOperation,
    ) -> BatchResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch_id = Uuid::new_v4();
        let started = Instant::now();
        let today = self.clock.today();

        let mut successful = Vec::new();
        let mut failed = Vec::new();
        let mut remote = Vec::new();
        let mut seen = HashSet::new();
        let mut planner = AssignmentPlanner::new(self, board, today);

        for order_id in order_ids {
            let order_id = order_id.as_ref();
            if !seen.insert(order_id.to_string()) {
                failed.push(BatchFailure::new(
                    order_id,
                    FailureReason::DuplicateOrderId,
                    format!("Order {order_id} appears more than once in the batch"),
                ));
                continue;
            }

            let Some(order) = board.get(order_id) else {
                failed.push(BatchFailure::new(
                    order_id,
                    FailureReason::OrderNotFound,
                    format!("Order {order_id} not found"),
                ));
                continue;
            };

            if operation.rejects_expired() && order.is_expired(today) {
                failed.push(BatchFailure::new(
                    order_id,
                    FailureReason::ExpiredPlannedDate,
                    format!(
                        "Order {order_id} has an expired planned date ({})",
                        order.planned_start_date()
                    ),
                ));
                continue;
            }

            match self.prepare(&order, &operation, &mut planner) {
                Ok(Prepared::Remote(action)) => remote.push((order_id.to_string(), action)),
                Ok(Prepared::Local(change)) => match board.apply(order_id, |o| change.apply(o)) {
                    Ok(_) => {
                        if let Some(order) = board.get(order_id) {
                            successful.push(BatchSuccess {
                                order_id: order_id.to_string(),
                                order,
                            });
                        }
                    }
                    Err(err) => failed.push(failure_from_error(order_id, &err)),
                },
                Err(failure) => failed.push(failure),
            }
        }

        let (committed, remote_failures) = self.commit_all(board, remote).await;
        successful.extend(committed);
        failed.extend(remote_failures);

        let result = BatchResult::new(
            batch_id,
            &operation,
            successful,
            failed,
            started.elapsed().as_millis() as u64,
        );

        log_batch!(
            info,
            "COMPLETED",
            batch_id: batch_id,
            batch_operation: operation.name(),
            total: result.total,
            success_count: result.success_count,
            fail_count: result.fail_count,
            duration_ms: result.duration_ms,
        );

        result
    }

    /// Decide what happens to one order, or why it is rejected before submission
    fn prepare(
        &self,
        order: &DispatchOrder,
        operation: &BatchOperation,
        planner: &mut AssignmentPlanner<'_>,
    ) -> Result<Prepared, BatchFailure> {
        match operation {
            BatchOperation::Cancel => Ok(Prepared::Local(LocalChange::Cancel)),
            BatchOperation::Transition {
                to_stage,
                to_substatus,
            } => Ok(Prepared::Local(LocalChange::Transition(*to_stage, *to_substatus))),
            BatchOperation::SendToCarrier => {
                if order.fleet_unit_id.is_none() || order.carrier_id.is_none() {
                    return Err(BatchFailure::new(
                        &order.id,
                        FailureReason::MissingFleetAssignment,
                        format!("Order {} has a missing fleet assignment", order.id),
                    ));
                }
                let action = RemoteAction::SendToCarrier;
                action
                    .check(order)
                    .map_err(|err| failure_from_error(&order.id, &err))?;
                Ok(Prepared::Remote(action))
            }
            BatchOperation::Unassign => {
                let action = RemoteAction::Unassign;
                action
                    .check(order)
                    .map_err(|err| failure_from_error(&order.id, &err))?;
                Ok(Prepared::Remote(action))
            }
            BatchOperation::AutoAssign { candidates } => {
                TransitionGuard::check(order, Stage::Dispatch, Substatus::Assigned)
                    .map_err(|err| failure_from_error(&order.id, &err.into()))?;
                let unit = planner.plan(order, candidates)?;
                Ok(Prepared::Remote(RemoteAction::assign_to(unit)))
            }
        }
    }

    async fn commit_all(
        &self,
        board: &OrderBoard,
        remote: Vec<(String, RemoteAction)>,
    ) -> (Vec<BatchSuccess>, Vec<BatchFailure>) {
        let mut successful = Vec::new();
        let mut failed = Vec::new();
        if remote.is_empty() {
            return (successful, failed);
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_commits));
        let mut order_ids = Vec::with_capacity(remote.len());
        let mut handles = Vec::with_capacity(remote.len());

        for (order_id, action) in remote {
            let board = board.clone();
            let committer = Arc::clone(&self.committer);
            let semaphore = Arc::clone(&semaphore);
            let task_order_id = order_id.clone();
            order_ids.push(order_id);

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return OptimisticOutcome::Rejected(DispatchError::Internal(format!(
                            "Failed to acquire commit permit: {e}"
                        )))
                    }
                };
                execute_optimistic(&board, committer.as_ref(), &task_order_id, &action).await
            }));
        }

        let results = join_all(handles).await;

        for (order_id, joined) in order_ids.into_iter().zip(results) {
            match joined {
                Ok(OptimisticOutcome::Committed(order)) => {
                    debug!(order_id = %order_id, "Batch item committed");
                    successful.push(BatchSuccess { order_id, order });
                }
                Ok(OptimisticOutcome::RolledBack { error, .. }) => {
                    failed.push(BatchFailure::new(
                        order_id,
                        FailureReason::RemoteCommit,
                        error.to_string(),
                    ));
                }
                Ok(OptimisticOutcome::Rejected(error)) => {
                    failed.push(failure_from_error(&order_id, &error));
                }
                Err(join_error) => {
                    error!(order_id = %order_id, error = %join_error, "Commit task panicked");
                    failed.push(BatchFailure::new(
                        order_id,
                        FailureReason::Internal,
                        format!("Commit task failed: {join_error}"),
                    ));
                }
            }
        }

        (successful, failed)
    }
}

enum Prepared {
    Remote(RemoteAction),
    Local(LocalChange),
}

#[derive(Debug, Clone, Copy)]
enum LocalChange {
    Cancel,
    Transition(Stage, Substatus),
}

impl LocalChange {
    fn apply(self, order: &mut DispatchOrder) -> crate::error::Result<()> {
        match self {
            Self::Cancel => cancel(order)?,
            Self::Transition(to_stage, to_substatus) => {
                apply_transition(order, to_stage, to_substatus)?
            }
        }
        Ok(())
    }
}

/// Sequential placement for auto-assign. A unit's timeline is read from the
/// board the first time the unit is considered, then grows with every
/// reservation. Nothing is committed until planning ends, so the board does
/// not change underneath the planner.
struct AssignmentPlanner<'a> {
    orchestrator: &'a BatchOrchestrator,
    board: &'a OrderBoard,
    today: NaiveDate,
    timelines: HashMap<String, OccupancyTimeline>,
}

impl<'a> AssignmentPlanner<'a> {
    fn new(orchestrator: &'a BatchOrchestrator, board: &'a OrderBoard, today: NaiveDate) -> Self {
        Self {
            orchestrator,
            board,
            today,
            timelines: HashMap::new(),
        }
    }

    fn timeline(&mut self, fleet_unit_id: &str) -> &mut OccupancyTimeline {
        let orchestrator = self.orchestrator;
        let board = self.board;
        let today = self.today;
        self.timelines
            .entry(fleet_unit_id.to_string())
            .or_insert_with(|| {
                OccupancyTimeline::build(
                    fleet_unit_id,
                    &board.orders_for_unit(fleet_unit_id),
                    today,
                    orchestrator.lanes.as_ref(),
                    &orchestrator.policy,
                )
            })
    }

    fn plan<'u>(
        &mut self,
        order: &DispatchOrder,
        candidates: &'u [FleetUnit],
    ) -> Result<&'u FleetUnit, BatchFailure> {
        if candidates.is_empty() {
            return Err(BatchFailure::new(
                &order.id,
                FailureReason::NoCompatibleUnit,
                "No candidate units supplied",
            ));
        }

        let orchestrator = self.orchestrator;
        let today = self.today;
        let target = order.planned_start_date();

        // Placed as a whole trip so its own RTA is checked against the unit's
        // schedule; the unit id is filled in once a unit accepts it.
        let lane = orchestrator.lanes.lane_for(order);
        let planned =
            Assignment::for_order(order, "", today, lane.as_ref(), &orchestrator.policy);
        let candidate = PlacementCandidate::Trip {
            order: order.clone(),
            assignment: planned.clone(),
        };

        let chosen = orchestrator
            .validator
            .first_compatible_unit(&candidate, candidates, |unit| {
                let existing = self.timeline(&unit.id).assignments().to_vec();
                SchedulingContext::on(target).with_schedule(today, existing)
            });

        match chosen {
            Ok(unit) => {
                debug!(
                    order_id = %order.id,
                    fleet_unit_id = %unit.id,
                    day_offset = planned.day_offset,
                    "Auto-assign planned"
                );
                self.timeline(&unit.id).reserve(Assignment {
                    fleet_unit_id: unit.id.clone(),
                    ..planned
                });
                Ok(unit)
            }
            Err(rejections) => {
                let reasons: Vec<_> = rejections
                    .iter()
                    .map(|(unit_id, verdict)| format!("{unit_id}: {}", verdict.errors.join("; ")))
                    .collect();
                Err(BatchFailure::new(
                    &order.id,
                    FailureReason::NoCompatibleUnit,
                    reasons.join(" | "),
                ))
            }
        }
    }
}

fn failure_from_error(order_id: &str, error: &DispatchError) -> BatchFailure {
    let reason = match error {
        DispatchError::OrderNotFound(_) => FailureReason::OrderNotFound,
        DispatchError::IllegalTransition { .. }
        | DispatchError::NotCancelable { .. }
        | DispatchError::InvalidInput(_) => FailureReason::IllegalTransition,
        DispatchError::RemoteCommit { .. } => FailureReason::RemoteCommit,
        DispatchError::ConstraintViolation(_) | DispatchError::SchedulingConflict(_) => {
            FailureReason::NoCompatibleUnit
        }
        DispatchError::Configuration(_) | DispatchError::Internal(_) => FailureReason::Internal,
    };
    BatchFailure::new(order_id, reason, error.to_string())
}
