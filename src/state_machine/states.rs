use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse lifecycle phase of a dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Order is on the board, waiting for or holding a fleet unit
    Dispatch,
    /// Order has been offered to a carrier
    Tenders,
    /// Carrier accepted; trip is programmed
    Scheduled,
    /// Trip is on the road
    Execution,
    /// Delivered; financial reconciliation in progress
    Conciliation,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Dispatch,
        Stage::Tenders,
        Stage::Scheduled,
        Stage::Execution,
        Stage::Conciliation,
    ];

    /// Substatuses owned by this stage. `CANCELED` is owned by none.
    pub fn substatuses(&self) -> &'static [Substatus] {
        use Substatus::*;
        match self {
            Self::Dispatch => &[New, Unassigned, Assigned],
            Self::Tenders => &[Pending, Accepted, Rejected, Expired],
            Self::Scheduled => &[Programmed, AtOrigin, Loading, Observed],
            Self::Execution => &[InTransit, AtDestination, Delivered],
            Self::Conciliation => &[PendingAudit, Disputed, Closed],
        }
    }

    /// Only orders that have not left the yard can be canceled.
    pub fn is_cancelable(&self) -> bool {
        matches!(self, Self::Dispatch | Self::Tenders | Self::Scheduled)
    }

    pub fn owns(&self, substatus: Substatus) -> bool {
        self.substatuses().contains(&substatus)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch => write!(f, "DISPATCH"),
            Self::Tenders => write!(f, "TENDERS"),
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::Execution => write!(f, "EXECUTION"),
            Self::Conciliation => write!(f, "CONCILIATION"),
        }
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DISPATCH" => Ok(Self::Dispatch),
            "TENDERS" => Ok(Self::Tenders),
            "SCHEDULED" => Ok(Self::Scheduled),
            "EXECUTION" => Ok(Self::Execution),
            "CONCILIATION" => Ok(Self::Conciliation),
            _ => Err(format!("Invalid stage: {s}")),
        }
    }
}

/// Fine-grained state within a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Substatus {
    New,
    Unassigned,
    Assigned,
    Pending,
    Accepted,
    Rejected,
    Expired,
    Programmed,
    AtOrigin,
    Loading,
    /// Trip flagged by the planner; may be sent back to the board
    Observed,
    InTransit,
    AtDestination,
    Delivered,
    PendingAudit,
    Disputed,
    Closed,
    Canceled,
}

impl Substatus {
    pub const ALL: [Substatus; 18] = [
        Substatus::New,
        Substatus::Unassigned,
        Substatus::Assigned,
        Substatus::Pending,
        Substatus::Accepted,
        Substatus::Rejected,
        Substatus::Expired,
        Substatus::Programmed,
        Substatus::AtOrigin,
        Substatus::Loading,
        Substatus::Observed,
        Substatus::InTransit,
        Substatus::AtDestination,
        Substatus::Delivered,
        Substatus::PendingAudit,
        Substatus::Disputed,
        Substatus::Closed,
        Substatus::Canceled,
    ];

    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Canceled)
    }

    /// Stage owning this substatus; `None` for `CANCELED`.
    pub fn stage(&self) -> Option<Stage> {
        Stage::ALL.into_iter().find(|stage| stage.owns(*self))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Unassigned => "UNASSIGNED",
            Self::Assigned => "ASSIGNED",
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
            Self::Programmed => "PROGRAMMED",
            Self::AtOrigin => "AT_ORIGIN",
            Self::Loading => "LOADING",
            Self::Observed => "OBSERVED",
            Self::InTransit => "IN_TRANSIT",
            Self::AtDestination => "AT_DESTINATION",
            Self::Delivered => "DELIVERED",
            Self::PendingAudit => "PENDING_AUDIT",
            Self::Disputed => "DISPUTED",
            Self::Closed => "CLOSED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for Substatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Substatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| format!("Invalid substatus: {s}"))
    }
}

/// Lookup owning stage for a substatus
pub fn stage_of(substatus: Substatus) -> Option<Stage> {
    substatus.stage()
}

/// New orders start on the board
impl Default for Stage {
    fn default() -> Self {
        Self::Dispatch
    }
}

impl Default for Substatus {
    fn default() -> Self {
        Self::New
    }
}
