//! Remote side of an optimistic update.
//!
//! The board mutates local state first and then asks a [`DispatchCommitter`]
//! to make the change authoritative. Whatever the committer returns replaces
//! the speculative local copy.

use crate::error::DispatchError;
use crate::models::DispatchOrder;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommitError {
    #[error("Rejected by dispatch service: {0}")]
    Rejected(String),
    #[error("Dispatch service unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid response from dispatch service: {0}")]
    InvalidResponse(String),
}

impl CommitError {
    pub fn into_dispatch_error(self, order_id: &str) -> DispatchError {
        DispatchError::RemoteCommit {
            order_id: order_id.to_string(),
            reason: self.to_string(),
        }
    }
}

/// Persists dispatch decisions and answers with the authoritative order
#[async_trait]
pub trait DispatchCommitter: Send + Sync {
    async fn assign(
        &self,
        order_id: &str,
        fleet_unit_id: &str,
    ) -> Result<DispatchOrder, CommitError>;

    async fn unassign(&self, order_id: &str) -> Result<DispatchOrder, CommitError>;

    async fn send_to_carrier(&self, order_id: &str) -> Result<DispatchOrder, CommitError>;
}
