//! # Collaborator Services
//!
//! Black-box collaborators the engine reads from: the clock and lane timings.
//! The commit collaborator lives with the orchestrator in
//! [`crate::orchestration::committer`].

pub mod clock;
pub mod lanes;

pub use clock::{Clock, FixedClock, SystemClock};
pub use lanes::{LaneLookup, LaneTable};
