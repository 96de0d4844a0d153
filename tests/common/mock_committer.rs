//! Scriptable stand-in for the remote dispatch service.

#![allow(dead_code)]

use async_trait::async_trait;
use dispatch_core::{CommitError, DispatchCommitter, DispatchOrder, OrderBoard, Stage, Substatus};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub method: &'static str,
    pub order_id: String,
    pub fleet_unit_id: Option<String>,
}

/// Answers from a shadow copy of the board so responses look authoritative.
/// Calls are recorded; failures and delays can be scripted per order.
#[derive(Debug)]
pub struct MockCommitter {
    orders: Mutex<HashMap<String, DispatchOrder>>,
    calls: Mutex<Vec<MockCall>>,
    failing: Mutex<HashSet<String>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockCommitter {
    pub fn new(board: &OrderBoard) -> Self {
        let orders = board
            .orders()
            .into_iter()
            .map(|order| (order.id.clone(), order))
            .collect();
        Self {
            orders: Mutex::new(orders),
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail_for(&self, order_id: &str) {
        self.failing.lock().insert(order_id.to_string());
    }

    /// Highest number of calls observed running at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    pub fn called_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.calls().into_iter().map(|c| c.order_id).collect();
        ids.sort();
        ids
    }

    async fn respond(
        &self,
        method: &'static str,
        order_id: &str,
        fleet_unit_id: Option<&str>,
        change: impl FnOnce(&mut DispatchOrder),
    ) -> Result<DispatchOrder, CommitError> {
        self.calls.lock().push(MockCall {
            method,
            order_id: order_id.to_string(),
            fleet_unit_id: fleet_unit_id.map(str::to_string),
        });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.lock().contains(order_id) {
            return Err(CommitError::Rejected(format!("{method} refused for {order_id}")));
        }

        let mut orders = self.orders.lock();
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| CommitError::InvalidResponse(format!("unknown order {order_id}")))?;
        change(order);
        Ok(order.clone())
    }
}

#[async_trait]
impl DispatchCommitter for MockCommitter {
    async fn assign(
        &self,
        order_id: &str,
        fleet_unit_id: &str,
    ) -> Result<DispatchOrder, CommitError> {
        self.respond("assign", order_id, Some(fleet_unit_id), |order| {
            order.stage = Stage::Dispatch;
            order.substatus = Substatus::Assigned;
            order.fleet_unit_id = Some(fleet_unit_id.to_string());
            order.carrier_id = Some("carrier-a".to_string());
        })
        .await
    }

    async fn unassign(&self, order_id: &str) -> Result<DispatchOrder, CommitError> {
        self.respond("unassign", order_id, None, |order| {
            order.stage = Stage::Dispatch;
            order.substatus = Substatus::Unassigned;
            order.fleet_unit_id = None;
            order.carrier_id = None;
        })
        .await
    }

    async fn send_to_carrier(&self, order_id: &str) -> Result<DispatchOrder, CommitError> {
        self.respond("send_to_carrier", order_id, None, |order| {
            order.stage = Stage::Tenders;
            order.substatus = Substatus::Pending;
        })
        .await
    }
}
