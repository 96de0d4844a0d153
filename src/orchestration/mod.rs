//! # Orchestration
//!
//! Applies dispatch decisions to a caller-owned [`OrderBoard`].
//!
//! ## Core Components
//!
//! - **OrderBoard**: concurrent local view of orders, with atomic snapshot-and-apply
//! - **DispatchCommitter**: async collaborator that makes a change authoritative
//! - **Optimistic updates**: snapshot, apply locally, commit, roll back on failure
//! - **BatchOrchestrator**: one operation over many orders with per-item outcomes
//!
//! The state machine gates every mutation and the compatibility validator gates
//! every auto-assignment; neither is bypassed on the batch path.

pub mod batch;
pub mod board;
pub mod committer;
pub mod optimistic;
pub mod types;

pub use batch::BatchOrchestrator;
pub use board::OrderBoard;
pub use committer::{CommitError, DispatchCommitter};
pub use optimistic::{
    assign_optimistic, execute_optimistic, send_to_carrier_optimistic, unassign_optimistic,
    OptimisticOutcome, RemoteAction,
};
pub use types::{BatchFailure, BatchOperation, BatchResult, BatchSuccess, FailureReason};
