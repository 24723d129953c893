//! # In-Memory Stock Store
//!
//! Catalogue and authoritative stock counts behind a single mutex. Cloning
//! the store shares the same underlying catalogue, which is how multiple
//! customer sessions see one inventory.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use shopfront_core::{InsufficientLine, Product, PurchaseLine, StockStore, StoreError};

/// Shared in-memory catalogue/stock store.
///
/// All reads hand out snapshots; the only mutation path is
/// [`StockStore::batch_purchase`], which holds the lock for the whole
/// check-then-deduct step. That single lock is what makes a batch purchase
/// atomic and serializable against purchases from other sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    catalogue: Arc<Mutex<BTreeMap<String, Product>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store holding the given products.
    pub fn seeded(products: impl IntoIterator<Item = Product>) -> Result<Self, StoreError> {
        let store = MemoryStore::new();
        for product in products {
            store.insert(product)?;
        }
        Ok(store)
    }

    /// Inserts or replaces a catalogue record.
    pub fn insert(&self, product: Product) -> Result<(), StoreError> {
        let mut catalogue = self.guard()?;
        debug!(product_id = %product.product_id, stock = product.stock_quantity, "catalogue record stored");
        catalogue.insert(product.product_id.clone(), product);
        Ok(())
    }

    /// Current authoritative stock count for a product, if it exists.
    pub fn stock_of(&self, product_id: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.guard()?.get(product_id).map(|p| p.stock_quantity))
    }

    /// A writer that panicked while holding the lock makes the store
    /// unavailable rather than poisoning every later caller with a panic.
    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<String, Product>>, StoreError> {
        self.catalogue
            .lock()
            .map_err(|_| StoreError::Unavailable("stock store lock poisoned".to_string()))
    }
}

impl StockStore for MemoryStore {
    fn lookup_by_id(&self, product_id: &str) -> Result<Option<Product>, StoreError> {
        let catalogue = self.guard()?;
        debug!(product_id, found = catalogue.contains_key(product_id), "exact id lookup");
        Ok(catalogue.get(product_id).cloned())
    }

    fn search_by_text(&self, text: &str) -> Result<Vec<Product>, StoreError> {
        let needle = text.trim().to_lowercase();
        let catalogue = self.guard()?;
        let matches: Vec<Product> = catalogue
            .values()
            .filter(|p| p.description.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        debug!(query = %text, count = matches.len(), "text search");
        Ok(matches)
    }

    fn batch_purchase(&self, lines: &[PurchaseLine]) -> Result<Vec<InsufficientLine>, StoreError> {
        let mut catalogue = self.guard()?;

        // Pass 1: find every shortfall. A product missing from the
        // catalogue counts as zero available.
        let insufficient: Vec<InsufficientLine> = lines
            .iter()
            .filter_map(|line| {
                let available = catalogue
                    .get(&line.product_id)
                    .map_or(0, |p| p.stock_quantity);
                (available < line.quantity).then(|| InsufficientLine {
                    product_id: line.product_id.clone(),
                    requested: line.quantity,
                    available,
                })
            })
            .collect();

        if !insufficient.is_empty() {
            info!(
                rejected = insufficient.len(),
                requested = lines.len(),
                "batch purchase rejected, nothing committed"
            );
            return Ok(insufficient);
        }

        // Pass 2: every line is satisfiable; commit all deductions under
        // the same lock acquisition.
        for line in lines {
            if let Some(product) = catalogue.get_mut(&line.product_id) {
                product.stock_quantity -= line.quantity;
            }
        }
        info!(lines = lines.len(), "batch purchase committed");
        Ok(Vec::new())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
