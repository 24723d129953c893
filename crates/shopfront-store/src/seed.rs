//! # Catalogue Seeding
//!
//! Loads catalogue records from JSON for demos and tests. The embedded demo
//! catalogue covers the stock tiers the advisor distinguishes (out of
//! stock, low, ample).

use thiserror::Error;
use tracing::info;

use shopfront_core::Product;

/// Embedded demo catalogue.
const DEMO_CATALOGUE_JSON: &str = include_str!("demo_catalogue.json");

/// Catalogue seed data could not be read.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid catalogue JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Parses a JSON array of catalogue records.
pub fn load_catalogue(json: &str) -> Result<Vec<Product>, SeedError> {
    let products: Vec<Product> = serde_json::from_str(json)?;
    info!(count = products.len(), "catalogue loaded");
    Ok(products)
}

/// The built-in demo catalogue.
pub fn demo_catalogue() -> Vec<Product> {
    load_catalogue(DEMO_CATALOGUE_JSON).expect("embedded demo catalogue is valid JSON")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalogue_parses_and_has_unique_ids() {
        let products = demo_catalogue();
        assert!(!products.is_empty());

        let mut ids: Vec<&str> = products.iter().map(|p| p.product_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(matches!(
            load_catalogue("not json"),
            Err(SeedError::InvalidJson(_))
        ));
    }
}
