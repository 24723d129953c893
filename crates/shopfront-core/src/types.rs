//! # Domain Types
//!
//! Core domain types used throughout Shopfront.
//!
//! ## Snapshot Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Catalogue (authoritative)        Engine (snapshots)                │
//! │                                                                     │
//! │  Product { stock_quantity } ──search──► Product copy                │
//! │                                              │                      │
//! │                                              ▼                      │
//! │                                   LineItem { product, quantity }    │
//! │                                                                     │
//! │  The ordered quantity lives on the LineItem, never on a shared      │
//! │  Product record. A cached search result and a trolley line can      │
//! │  never alias each other.                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalogue product.
///
/// The engine only ever holds a snapshot of this record, taken at search
/// time. `stock_quantity` is the count the store reported then; the store's
/// own copy is the authoritative one and is only changed by `batch_purchase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, stable identifier.
    pub product_id: String,

    /// Display name shown in search results, the trolley and receipts.
    pub description: String,

    /// Reference to the product image shown on the search page.
    pub image_ref: String,

    /// Unit price in pence.
    pub unit_price_pence: i64,

    /// Stock count at snapshot time. Non-negative.
    pub stock_quantity: i64,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_pence(self.unit_price_pence)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One trolley line: a product snapshot with an ordered quantity.
///
/// Created on the first add of a product not yet in the trolley, mutated by
/// later adds/removes, destroyed when the quantity reaches zero or checkout
/// clears the trolley.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: Product,

    /// Quantity requested. Always >= 1 while the line exists.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a fresh line for a product, quantity 1.
    pub fn new(product: Product) -> Self {
        LineItem { product, quantity: 1 }
    }

    /// Line total (unit price × quantity), exact.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price() * self.quantity
    }
}

// =============================================================================
// Sort Mode
// =============================================================================

/// Trolley ordering criterion. Cyclic with wraparound; `ById` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    ById,
    ByDescription,
    ByTotalAsc,
    ByTotalDesc,
}

impl SortMode {
    /// Advances to the next mode, wrapping after the last.
    pub fn next(self) -> Self {
        match self {
            SortMode::ById => SortMode::ByDescription,
            SortMode::ByDescription => SortMode::ByTotalAsc,
            SortMode::ByTotalAsc => SortMode::ByTotalDesc,
            SortMode::ByTotalDesc => SortMode::ById,
        }
    }

    /// Label shown next to the sort-cycle control.
    pub fn label(self) -> &'static str {
        match self {
            SortMode::ById => "By product ID",
            SortMode::ByDescription => "By description",
            SortMode::ByTotalAsc => "By total price (low to high)",
            SortMode::ByTotalDesc => "By total price (high to low)",
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A committed purchase: an immutable snapshot of the trolley at checkout,
/// stamped with the identifier and timestamp the ledger assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub ordered_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
}

impl Order {
    /// Order total across all purchased lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
