//! # shopfront-store: Stock Store & Order Ledger
//!
//! Reference implementation of the collaborator contracts in
//! `shopfront-core`:
//!
//! - [`MemoryStore`] - catalogue + authoritative stock behind one lock,
//!   shared across sessions by cloning
//! - [`MemoryLedger`] - assigns order ids and timestamps, keeps the archive
//! - [`seed`] - catalogue loading for demos and tests
//!
//! ## Sharing Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │   Session A ──┐                                                     │
//! │   Session B ──┼──► MemoryStore (Arc<Mutex<catalogue>>)              │
//! │   Session C ──┘        │                                            │
//! │                        └── batch_purchase takes the lock once:      │
//! │                            check every line, then commit every      │
//! │                            deduction or none. Serializable with     │
//! │                            respect to the other sessions.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod ledger;
pub mod memory;
pub mod seed;

pub use ledger::MemoryLedger;
pub use memory::MemoryStore;
pub use seed::{demo_catalogue, load_catalogue, SeedError};
