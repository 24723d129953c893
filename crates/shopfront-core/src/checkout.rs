//! # Checkout Reconciliation
//!
//! Drives a purchase attempt against the stock store and partitions the
//! trolley into committed and insufficient sets.
//!
//! ## Reconciliation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  checkout(trolley)                                                  │
//! │       │                                                             │
//! │       ├── trolley empty ────────────────────────► Empty             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  batch_purchase(id-ordered lines)                                   │
//! │       │                                                             │
//! │       ├── Err ──────────────────────────────────► EngineError       │
//! │       │                                            (trolley intact) │
//! │       ├── no rejections ── ledger.new_order ────► Committed         │
//! │       │                    trolley cleared                          │
//! │       │                                                             │
//! │       └── rejections ───── drop each rejected ──► PartiallyRejected │
//! │                            line from trolley       (rest kept, NOT  │
//! │                                                    retried here)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The satisfiable remainder is deliberately not retried in the same pass:
//! the customer re-attempts checkout explicitly, and that second attempt
//! either fully commits or reports further shortages, never mixes.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::contract::{OrderLedger, PurchaseLine, StockStore};
use crate::error::EngineResult;
use crate::trolley::Trolley;
use crate::types::{LineItem, Order};

/// A line dropped from the trolley because stock was insufficient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedLine {
    pub product_id: String,
    pub description: String,
    pub requested: i64,
    pub available: i64,
}

/// Result of one reconciliation attempt. Exactly one of these per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutOutcome {
    /// Every line was satisfiable; the purchase is committed and the
    /// trolley has been cleared.
    Committed(Order),

    /// Some lines were short on stock. They have been removed from the
    /// trolley; the still-satisfiable lines remain in it.
    PartiallyRejected { removed: Vec<RemovedLine> },

    /// Checkout was requested with an empty trolley. The store was never
    /// called.
    Empty,
}

/// Reconciles a trolley against authoritative stock.
///
/// Both collaborators are explicitly injected; the reconciler holds no
/// global state.
pub struct CheckoutReconciler<'a, S, L> {
    store: &'a S,
    ledger: &'a L,
}

impl<'a, S: StockStore, L: OrderLedger> CheckoutReconciler<'a, S, L> {
    pub fn new(store: &'a S, ledger: &'a L) -> Self {
        CheckoutReconciler { store, ledger }
    }

    /// Attempts to purchase the whole trolley.
    ///
    /// On `Err` the trolley is exactly as it was before the call: every
    /// trolley mutation happens only after the collaborator calls have
    /// succeeded.
    pub fn checkout(&self, trolley: &mut Trolley) -> EngineResult<CheckoutOutcome> {
        if trolley.is_empty() {
            debug!("checkout requested with an empty trolley");
            return Ok(CheckoutOutcome::Empty);
        }

        // Canonical product-id order for the store's batch lookup,
        // decoupled from whatever the display sort currently is.
        let request: Vec<PurchaseLine> = trolley
            .checkout_lines()
            .map(|line| PurchaseLine {
                product_id: line.product.product_id.clone(),
                quantity: line.quantity,
            })
            .collect();

        debug!(lines = request.len(), "attempting batch purchase");
        let rejected = self.store.batch_purchase(&request)?;

        if rejected.is_empty() {
            // Full commit: snapshot the purchased lines before the ledger
            // call so a ledger failure leaves the trolley untouched.
            let purchased: Vec<LineItem> = trolley.checkout_lines().cloned().collect();
            let order = self.ledger.new_order(purchased)?;
            trolley.cancel();
            info!(
                order_id = %order.order_id,
                lines = order.items.len(),
                total = %order.total(),
                "checkout committed"
            );
            return Ok(CheckoutOutcome::Committed(order));
        }

        // Partial rejection: nothing was committed by the store. Drop each
        // rejected line and report it exactly once.
        let mut removed = Vec::with_capacity(rejected.len());
        for shortage in rejected {
            if let Some(line) = trolley.remove_line(&shortage.product_id) {
                removed.push(RemovedLine {
                    product_id: shortage.product_id,
                    description: line.product.description,
                    requested: shortage.requested,
                    available: shortage.available,
                });
            }
        }
        warn!(
            removed = removed.len(),
            remaining = trolley.line_count(),
            "checkout partially rejected"
        );
        Ok(CheckoutOutcome::PartiallyRejected { removed })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use chrono::Utc;

    use crate::contract::InsufficientLine;
    use crate::error::{EngineError, LedgerError, StoreError};
    use crate::types::Product;

    /// Store double scripted with a fixed batch-purchase response.
    struct ScriptedStore {
        rejections: Vec<InsufficientLine>,
        fail: bool,
        purchase_calls: Cell<u32>,
    }

    impl ScriptedStore {
        fn accepting() -> Self {
            ScriptedStore {
                rejections: Vec::new(),
                fail: false,
                purchase_calls: Cell::new(0),
            }
        }

        fn rejecting(rejections: Vec<InsufficientLine>) -> Self {
            ScriptedStore {
                rejections,
                fail: false,
                purchase_calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            ScriptedStore {
                rejections: Vec::new(),
                fail: true,
                purchase_calls: Cell::new(0),
            }
        }
    }

    impl StockStore for ScriptedStore {
        fn lookup_by_id(&self, _product_id: &str) -> Result<Option<Product>, StoreError> {
            Ok(None)
        }

        fn search_by_text(&self, _text: &str) -> Result<Vec<Product>, StoreError> {
            Ok(Vec::new())
        }

        fn batch_purchase(
            &self,
            _lines: &[PurchaseLine],
        ) -> Result<Vec<InsufficientLine>, StoreError> {
            self.purchase_calls.set(self.purchase_calls.get() + 1);
            if self.fail {
                return Err(StoreError::Unavailable("store offline".to_string()));
            }
            Ok(self.rejections.clone())
        }
    }

    struct FixedLedger {
        fail: bool,
    }

    impl OrderLedger for FixedLedger {
        fn new_order(&self, items: Vec<LineItem>) -> Result<Order, LedgerError> {
            if self.fail {
                return Err(LedgerError::Unavailable("ledger offline".to_string()));
            }
            Ok(Order {
                order_id: "order-0001".to_string(),
                ordered_at: Utc::now(),
                items,
            })
        }
    }

    fn product(id: &str, description: &str, price_pence: i64, stock: i64) -> Product {
        Product {
            product_id: id.to_string(),
            description: description.to_string(),
            image_ref: format!("{id}.jpg"),
            unit_price_pence: price_pence,
            stock_quantity: stock,
        }
    }

    fn trolley_with(entries: &[(&Product, i64)]) -> Trolley {
        let mut trolley = Trolley::new();
        for &(product, qty) in entries {
            for _ in 0..qty {
                trolley.add(product);
            }
        }
        trolley
    }

    #[test]
    fn test_empty_trolley_yields_empty_and_never_calls_the_store() {
        let store = ScriptedStore::accepting();
        let ledger = FixedLedger { fail: false };
        let mut trolley = Trolley::new();

        let outcome = CheckoutReconciler::new(&store, &ledger)
            .checkout(&mut trolley)
            .unwrap();

        assert_eq!(outcome, CheckoutOutcome::Empty);
        assert_eq!(store.purchase_calls.get(), 0);
    }

    #[test]
    fn test_full_success_commits_and_clears_the_trolley() {
        let store = ScriptedStore::accepting();
        let ledger = FixedLedger { fail: false };
        let tv = product("0001", "40 inch TV", 26900, 10);
        let mut trolley = trolley_with(&[(&tv, 2)]);
        let expected_items: Vec<LineItem> = trolley.checkout_lines().cloned().collect();

        let outcome = CheckoutReconciler::new(&store, &ledger)
            .checkout(&mut trolley)
            .unwrap();

        let order = match outcome {
            CheckoutOutcome::Committed(order) => order,
            other => panic!("expected Committed, got {other:?}"),
        };
        assert!(!order.order_id.is_empty());
        // Purchased snapshot equals the pre-checkout trolley contents.
        assert_eq!(order.items, expected_items);
        assert!(trolley.is_empty());
    }

    #[test]
    fn test_partial_rejection_trims_the_trolley_and_reports_each_line_once() {
        let a = product("000A", "Blender", 4500, 5);
        let b = product("000B", "Espresso maker", 12000, 1);
        let store = ScriptedStore::rejecting(vec![InsufficientLine {
            product_id: "000B".to_string(),
            requested: 2,
            available: 1,
        }]);
        let ledger = FixedLedger { fail: false };
        let mut trolley = trolley_with(&[(&a, 3), (&b, 2)]);

        let outcome = CheckoutReconciler::new(&store, &ledger)
            .checkout(&mut trolley)
            .unwrap();

        assert_eq!(
            outcome,
            CheckoutOutcome::PartiallyRejected {
                removed: vec![RemovedLine {
                    product_id: "000B".to_string(),
                    description: "Espresso maker".to_string(),
                    requested: 2,
                    available: 1,
                }],
            }
        );
        // Only the satisfiable line remains; it is not retried here.
        assert_eq!(trolley.line_count(), 1);
        assert_eq!(trolley.quantity_of("000A"), 3);
        assert_eq!(trolley.quantity_of("000B"), 0);
    }

    #[test]
    fn test_store_failure_leaves_the_trolley_untouched() {
        let store = ScriptedStore::failing();
        let ledger = FixedLedger { fail: false };
        let tv = product("0001", "40 inch TV", 26900, 10);
        let mut trolley = trolley_with(&[(&tv, 2)]);
        let before = trolley.clone();

        let err = CheckoutReconciler::new(&store, &ledger)
            .checkout(&mut trolley)
            .unwrap_err();

        assert!(matches!(err, EngineError::Store(_)));
        assert_eq!(trolley, before);
    }

    #[test]
    fn test_ledger_failure_leaves_the_trolley_untouched() {
        let store = ScriptedStore::accepting();
        let ledger = FixedLedger { fail: true };
        let tv = product("0001", "40 inch TV", 26900, 10);
        let mut trolley = trolley_with(&[(&tv, 1)]);
        let before = trolley.clone();

        let err = CheckoutReconciler::new(&store, &ledger)
            .checkout(&mut trolley)
            .unwrap_err();

        assert!(matches!(err, EngineError::Ledger(_)));
        assert_eq!(trolley, before);
    }
}
