// State machine module for the dispatch order lifecycle
//
// A pure lookup table of legal stage/substatus moves plus the guards the
// orchestrator runs before mutating an order.

pub mod errors;
pub mod guards;
pub mod states;
pub mod transitions;

// Re-export main types for convenient access
pub use errors::{StateMachineError, StateMachineResult};
pub use guards::{apply_transition, cancel, TransitionGuard};
pub use states::{stage_of, Stage, Substatus};
pub use transitions::{is_cancelable, is_valid_transition, transitions_from, TransitionTarget};
