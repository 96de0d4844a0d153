#![allow(clippy::doc_markdown)] // Allow technical terms like RTA, TENDERS in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Dispatch Board Core
//!
//! Deterministic assignment engine behind a logistics dispatch board.
//!
//! ## Overview
//!
//! Given transport orders and a fleet, the engine answers three questions and
//! carries out the resulting decisions:
//!
//! - May this order move to that stage/substatus? ([`state_machine`])
//! - May this fleet unit carry this load on that day? ([`validation`])
//! - When is each unit busy, including its return-to-availability? ([`scheduling`])
//!
//! The [`orchestration`] layer applies decisions optimistically to a local
//! [`OrderBoard`], commits them through an injected [`DispatchCommitter`], and
//! rolls back per order when the commit fails.
//!
//! ## Module Organization
//!
//! - [`models`] - Orders, fleet units, lanes and placement candidates
//! - [`state_machine`] - Stage/substatus lifecycle and transition guards
//! - [`validation`] - Ordered compatibility checks between a load and a unit
//! - [`scheduling`] - RTA estimation, busy intervals and unit timelines
//! - [`orchestration`] - Order board, optimistic updates and batch runs
//! - [`services`] - Clock and lane lookup collaborators
//! - [`config`] - Layered configuration (defaults, TOML, environment)
//! - [`logging`] - Structured logging setup and domain macros
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dispatch_core::{
//!     BatchOperation, BatchOrchestrator, DispatchCommitter, DispatchConfig, FleetUnit,
//!     LaneTable, OrderBoard, SystemClock,
//! };
//! use std::sync::Arc;
//!
//! # async fn example(committer: Arc<dyn DispatchCommitter>, board: OrderBoard) -> dispatch_core::Result<()> {
//! dispatch_core::logging::init_structured_logging();
//! let config = DispatchConfig::load(None)?;
//!
//! let orchestrator = BatchOrchestrator::new(
//!     committer,
//!     Arc::new(LaneTable::new()),
//!     Arc::new(SystemClock),
//!     &config,
//! );
//!
//! let candidates = vec![FleetUnit::new("TRK-01", "carrier-a", 28_000.0, -25.0, 10.0)];
//! let result = orchestrator
//!     .run_batch(&board, ["ord-1", "ord-2"], BatchOperation::AutoAssign { candidates })
//!     .await;
//! println!("{} assigned, {} failed", result.success_count, result.fail_count);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod scheduling;
pub mod services;
pub mod state_machine;
pub mod validation;

pub use config::{BatchConfig, ConfigurationError, DispatchConfig, SchedulingConfig};
pub use error::{DispatchError, Result};
pub use models::{
    DispatchOrder, FleetUnit, Lane, LoadProfile, OperationalStatus, OrderItem, PlacementCandidate,
    ThermalProfile, UnitStatus,
};
pub use orchestration::{
    assign_optimistic, unassign_optimistic, BatchFailure, BatchOperation, BatchOrchestrator,
    BatchResult, BatchSuccess, CommitError, DispatchCommitter, FailureReason, OptimisticOutcome,
    OrderBoard,
};
pub use scheduling::{
    check_move, compute_rta, overlaps, should_show_rta, Assignment, DayInterval,
    OccupancyTimeline, RtaPolicy,
};
pub use services::{Clock, FixedClock, LaneLookup, LaneTable, SystemClock};
pub use state_machine::{
    is_cancelable, is_valid_transition, stage_of, transitions_from, Stage, StateMachineError,
    Substatus, TransitionTarget,
};
pub use validation::{
    CompatibilityValidator, ConstraintKind, ConstraintViolation, SchedulingContext,
    ValidationResult,
};
