//! # Collaborator Contracts
//!
//! Traits the engine consumes. The catalogue/stock store and the order
//! ledger are external collaborators; the engine never talks to storage
//! directly and is injected with implementations of these traits
//! (`shopfront-store` ships the reference ones).

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, StoreError};
use crate::types::{LineItem, Order, Product};

/// One line of a batch purchase request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    pub product_id: String,
    pub quantity: i64,
}

/// A line the store could not satisfy, with what was actually available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsufficientLine {
    pub product_id: String,
    pub requested: i64,
    pub available: i64,
}

/// The catalogue/stock store.
///
/// ## Batch Purchase Contract
/// `batch_purchase` is all-or-nothing: either every line is satisfiable and
/// every deduction is committed (empty return), or the insufficient subset
/// is returned and NOTHING is committed. The operation is atomic and
/// serializable with respect to other sessions' purchases on overlapping
/// products. An `Err` means an I/O failure with state untouched.
pub trait StockStore {
    /// Looks a product up by its exact id. A miss is `Ok(None)`, not an
    /// error.
    fn lookup_by_id(&self, product_id: &str) -> Result<Option<Product>, StoreError>;

    /// Matches products fuzzily against description text.
    fn search_by_text(&self, text: &str) -> Result<Vec<Product>, StoreError>;

    /// Attempts to purchase the whole set of lines. Empty result = full
    /// success.
    fn batch_purchase(&self, lines: &[PurchaseLine]) -> Result<Vec<InsufficientLine>, StoreError>;
}

/// The order ledger: assigns order identifiers and timestamps once a
/// purchase has committed.
pub trait OrderLedger {
    fn new_order(&self, items: Vec<LineItem>) -> Result<Order, LedgerError>;
}
