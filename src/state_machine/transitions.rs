//! Transition table for the dispatch order lifecycle.
//!
//! Every substatus has an explicit entry. `CANCELED` never changes the stage an
//! order is in, so cancel targets are resolved against the current stage.

use super::states::{Stage, Substatus};
use serde::{Deserialize, Serialize};

/// A legal next state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionTarget {
    pub to_stage: Stage,
    pub to_substatus: Substatus,
}

impl TransitionTarget {
    pub const fn new(to_stage: Stage, to_substatus: Substatus) -> Self {
        Self {
            to_stage,
            to_substatus,
        }
    }
}

/// Raw table row: `None` stage means "stay in the current stage" (cancel).
type Edge = (Option<Stage>, Substatus);

const CANCEL: Edge = (None, Substatus::Canceled);

fn edges(from: Substatus) -> &'static [Edge] {
    use Stage::*;
    use Substatus::*;

    match from {
        New => &[(Some(Dispatch), Unassigned), (Some(Dispatch), Assigned), CANCEL],
        Unassigned => &[(Some(Dispatch), Assigned), CANCEL],
        Assigned => &[(Some(Dispatch), Unassigned), (Some(Tenders), Pending), CANCEL],

        Pending => &[
            (Some(Tenders), Accepted),
            (Some(Tenders), Rejected),
            (Some(Tenders), Expired),
            CANCEL,
        ],
        Accepted => &[(Some(Scheduled), Programmed), CANCEL],
        Rejected => &[(Some(Dispatch), Unassigned)],
        Expired => &[(Some(Dispatch), Unassigned), CANCEL],

        Programmed => &[(Some(Scheduled), AtOrigin), (Some(Scheduled), Observed), CANCEL],
        AtOrigin => &[(Some(Scheduled), Loading), (Some(Scheduled), Observed), CANCEL],
        Loading => &[(Some(Execution), InTransit), (Some(Scheduled), Observed), CANCEL],
        Observed => &[
            (Some(Scheduled), Loading),
            (Some(Scheduled), AtOrigin),
            (Some(Dispatch), Unassigned),
            CANCEL,
        ],

        InTransit => &[(Some(Execution), AtDestination)],
        AtDestination => &[(Some(Execution), Delivered)],
        Delivered => &[(Some(Conciliation), PendingAudit)],

        PendingAudit => &[(Some(Conciliation), Disputed), (Some(Conciliation), Closed)],
        Disputed => &[(Some(Conciliation), PendingAudit), (Some(Conciliation), Closed)],

        Closed | Canceled => &[],
    }
}

/// Exhaustive set of legal next states from `from`.
///
/// Cancel targets keep the stage `from` belongs to.
pub fn transitions_from(from: Substatus) -> Vec<TransitionTarget> {
    edges(from)
        .iter()
        .filter_map(|(stage, to_substatus)| {
            let to_stage = (*stage).or_else(|| from.stage())?;
            Some(TransitionTarget::new(to_stage, *to_substatus))
        })
        .collect()
}

/// True iff `(to_stage, to_substatus)` appears in `transitions_from(from)`.
pub fn is_valid_transition(from: Substatus, to_stage: Stage, to_substatus: Substatus) -> bool {
    transitions_from(from)
        .iter()
        .any(|t| t.to_stage == to_stage && t.to_substatus == to_substatus)
}

pub fn is_cancelable(stage: Stage) -> bool {
    stage.is_cancelable()
}
