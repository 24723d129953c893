//! # Error Types
//!
//! Domain error taxonomy for the engine.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  StoreError    - stock store I/O failure                            │
//! │  LedgerError   - order ledger I/O failure                           │
//! │  EngineError   - either of the above, surfaced from checkout/search │
//! │                                                                     │
//! │  NOT errors:                                                        │
//! │  • blank query / no product selected  → status message              │
//! │  • insufficient stock                 → PartiallyRejected outcome   │
//! │  • empty trolley at checkout          → Empty outcome               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Whenever an `EngineError` is returned, the trolley is guaranteed to be
//! exactly as it was before the failed attempt.

use thiserror::Error;

// =============================================================================
// Collaborator Errors
// =============================================================================

/// Stock store I/O failure.
///
/// ## When This Occurs
/// - The backing store cannot be reached
/// - A store lock was poisoned by a crashed writer
///
/// The store contract guarantees no state was modified for the failed call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stock store unavailable: {0}")]
    Unavailable(String),
}

/// Order ledger I/O failure.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("order ledger unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Engine Error
// =============================================================================

/// Failure of an engine operation that needed a collaborator.
///
/// The presentation layer shows a generic failure notice for these; the
/// session state (trolley included) is unchanged.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("stock store error: {0}")]
    Store(#[from] StoreError),

    #[error("order ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Convenience type alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================
