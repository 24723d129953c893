//! # Search Router
//!
//! Routes a raw query string to the right catalogue lookup.
//!
//! All-digit queries are product identifiers and go to the exact-id lookup
//! (0 or 1 result; a miss is a normal "not found", never an error).
//! Anything else is matched fuzzily against description text.

use serde::{Deserialize, Serialize};

/// How a query should be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LookupPlan {
    /// Blank query; prompt for a search term instead of hitting the store.
    Invalid,
    ExactId(String),
    FuzzyText(String),
}

/// Classifies a raw query. Leading/trailing whitespace is ignored.
pub fn route(query: &str) -> LookupPlan {
    let query = query.trim();

    if query.is_empty() {
        return LookupPlan::Invalid;
    }

    if query.chars().all(|c| c.is_ascii_digit()) {
        LookupPlan::ExactId(query.to_string())
    } else {
        LookupPlan::FuzzyText(query.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
