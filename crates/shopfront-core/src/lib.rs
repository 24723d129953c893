//! # shopfront-core: Trolley/Checkout Engine for Shopfront
//!
//! This crate is the **heart** of Shopfront. It maintains the in-memory
//! trolley, reconciles it against authoritative stock at checkout time, and
//! emits the view state the presentation layer renders.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Shopfront Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation Layer                         │   │
//! │  │   search box ──► results list ──► trolley ──► receipt       │   │
//! │  └───────────────────────────┬─────────────────────────────────┘   │
//! │                              │ intents / view state                │
//! │  ┌───────────────────────────▼─────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐           │   │
//! │  │  │ trolley │ │checkout │ │ advisor  │ │ search  │           │   │
//! │  │  │ Trolley │ │Reconcile│ │StockTier │ │ routing │           │   │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └─────────┘           │   │
//! │  │                                                             │   │
//! │  │  NO I/O • COLLABORATORS BEHIND TRAITS • PURE LOGIC          │   │
//! │  └───────────────────────────┬─────────────────────────────────┘   │
//! │                              │ StockStore / OrderLedger traits     │
//! │  ┌───────────────────────────▼─────────────────────────────────┐   │
//! │  │           shopfront-store (collaborator crate)              │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, SortMode, Order)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error taxonomy
//! - [`trolley`] - Ordered cart with merge-on-add and sort cycling
//! - [`checkout`] - Reconciliation of the trolley against authoritative stock
//! - [`advisor`] - Stock-level advice messages
//! - [`search`] - Query routing (exact id vs fuzzy text)
//! - [`contract`] - Collaborator traits (stock store, order ledger)
//! - [`session`] - Intent processing and view-state emission

// =============================================================================
// Module Declarations
// =============================================================================

pub mod advisor;
pub mod checkout;
pub mod contract;
pub mod error;
pub mod money;
pub mod search;
pub mod session;
pub mod trolley;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use advisor::{advise, StockAdvice, StockTier, LOW_STOCK_THRESHOLD};
pub use checkout::{CheckoutOutcome, CheckoutReconciler, RemovedLine};
pub use contract::{InsufficientLine, OrderLedger, PurchaseLine, StockStore};
pub use error::{EngineError, EngineResult, LedgerError, StoreError};
pub use money::Money;
pub use search::{route, LookupPlan};
pub use session::{Intent, Session, ViewState};
pub use trolley::Trolley;
pub use types::{LineItem, Order, Product, SortMode};
