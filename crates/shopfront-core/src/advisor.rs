//! # Stock Advisor
//!
//! Turns a stock count into a tiered human-readable message for the search
//! page.

use serde::{Deserialize, Serialize};

/// Counts below this (and above zero) are reported as low stock.
///
/// Fixed policy constant, not configuration.
pub const LOW_STOCK_THRESHOLD: i64 = 15;

/// Stock-level tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockTier {
    OutOfStock,
    Low,
    Ample,
}

/// Tier plus the message shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdvice {
    pub tier: StockTier,
    pub message: String,
}

/// Classifies a stock quantity.
pub fn advise(stock_quantity: i64) -> StockAdvice {
    if stock_quantity == 0 {
        StockAdvice {
            tier: StockTier::OutOfStock,
            message: "No stock available".to_string(),
        }
    } else if stock_quantity < LOW_STOCK_THRESHOLD {
        StockAdvice {
            tier: StockTier::Low,
            message: format!("Low stock: only {stock_quantity} left!"),
        }
    } else {
        StockAdvice {
            tier: StockTier::Ample,
            message: format!("In stock: {stock_quantity}"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
