//! Caller-owned local view of dispatch orders.

use crate::error::{DispatchError, Result};
use crate::models::DispatchOrder;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent map of orders keyed by id. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    orders: Arc<DashMap<String, DispatchOrder>>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_orders(orders: impl IntoIterator<Item = DispatchOrder>) -> Self {
        let board = Self::new();
        for order in orders {
            board.upsert(order);
        }
        board
    }

    /// Insert or overwrite; returns the previous copy
    pub fn upsert(&self, order: DispatchOrder) -> Option<DispatchOrder> {
        self.orders.insert(order.id.clone(), order)
    }

    pub fn get(&self, order_id: &str) -> Option<DispatchOrder> {
        self.orders.get(order_id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, order_id: &str) -> bool {
        self.orders.contains_key(order_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Copy of every order, sorted by id
    pub fn orders(&self) -> Vec<DispatchOrder> {
        let mut orders: Vec<_> = self.orders.iter().map(|e| e.value().clone()).collect();
        orders.sort_by(|a, b| a.id.cmp(&b.id));
        orders
    }

    /// Orders currently holding `fleet_unit_id`
    pub fn orders_for_unit(&self, fleet_unit_id: &str) -> Vec<DispatchOrder> {
        self.orders()
            .into_iter()
            .filter(|order| order.fleet_unit_id.as_deref() == Some(fleet_unit_id))
            .collect()
    }

    /// Snapshot the order and mutate it under its entry lock.
    ///
    /// Returns the pre-change snapshot. If `change` fails the entry is put back
    /// exactly as it was and nothing is observable to other readers.
    pub fn apply<F>(&self, order_id: &str, change: F) -> Result<DispatchOrder>
    where
        F: FnOnce(&mut DispatchOrder) -> Result<()>,
    {
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| DispatchError::OrderNotFound(order_id.to_string()))?;

        let snapshot = entry.value().clone();
        if let Err(error) = change(entry.value_mut()) {
            *entry.value_mut() = snapshot;
            return Err(error);
        }
        Ok(snapshot)
    }

    /// Put a snapshot back verbatim
    pub fn restore(&self, snapshot: DispatchOrder) {
        self.upsert(snapshot);
    }
}
