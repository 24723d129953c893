//! # Order Ledger
//!
//! Assigns order identifiers and timestamps once a purchase has committed,
//! and keeps the archive of committed orders.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use shopfront_core::{LedgerError, LineItem, Order, OrderLedger};

/// In-memory order ledger shared across sessions by cloning.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    orders: Arc<Mutex<Vec<Order>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        MemoryLedger::default()
    }

    /// All committed orders, oldest first.
    pub fn orders(&self) -> Result<Vec<Order>, LedgerError> {
        Ok(self
            .orders
            .lock()
            .map_err(|_| LedgerError::Unavailable("order ledger lock poisoned".to_string()))?
            .clone())
    }
}

impl OrderLedger for MemoryLedger {
    fn new_order(&self, items: Vec<LineItem>) -> Result<Order, LedgerError> {
        let order = Order {
            order_id: Uuid::new_v4().to_string(),
            ordered_at: Utc::now(),
            items,
        };
        self.orders
            .lock()
            .map_err(|_| LedgerError::Unavailable("order ledger lock poisoned".to_string()))?
            .push(order.clone());
        info!(order_id = %order.order_id, lines = order.items.len(), "order recorded");
        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
