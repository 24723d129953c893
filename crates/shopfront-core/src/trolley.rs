//! # Trolley
//!
//! The in-memory cart: merge-on-add line items, decrement-on-remove,
//! multi-key sort cycling, rendering to a display string.
//!
//! ## Internal Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  BTreeMap<product_id, LineItem>                                     │
//! │                                                                     │
//! │  • uniqueness per product id holds by construction                  │
//! │  • removal by key is O(log n), never a linear scan                  │
//! │  • map iteration order (product id) is the canonical base order;    │
//! │    the active SortMode is applied as a stable sort over that base   │
//! │    only when rendering or checking out                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because the base order is deterministic and the sort is stable, entries
//! with equal sort keys always render in product-id order, and re-sorting
//! under an unchanged mode never reorders anything.

use std::collections::BTreeMap;

use tracing::debug;

use crate::money::Money;
use crate::types::{LineItem, Product, SortMode};

/// Ordered collection of trolley lines.
///
/// ## Invariants
/// - At most one line per product id
/// - `quantity >= 1` for every line present (0 deletes the line)
/// - Rendered order is fully determined by the active sort mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trolley {
    lines: BTreeMap<String, LineItem>,
    sort_mode: SortMode,
}

impl Trolley {
    /// Creates an empty trolley with the default sort mode.
    pub fn new() -> Self {
        Trolley::default()
    }

    /// Checks if the trolley has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.values().map(|l| l.quantity).sum()
    }

    /// Quantity of a given product, 0 if absent.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.lines.get(product_id).map_or(0, |l| l.quantity)
    }

    /// The active sort mode.
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Adds one unit of a product.
    ///
    /// If the product is already in the trolley its quantity is incremented;
    /// otherwise a fresh line with quantity 1 is inserted. The product record
    /// is snapshotted into the line, so later catalogue changes never reach
    /// the trolley.
    pub fn add(&mut self, product: &Product) {
        match self.lines.get_mut(&product.product_id) {
            Some(line) => line.quantity += 1,
            None => {
                self.lines
                    .insert(product.product_id.clone(), LineItem::new(product.clone()));
            }
        }
        debug!(
            product_id = %product.product_id,
            quantity = self.quantity_of(&product.product_id),
            "added to trolley"
        );
    }

    /// Removes one unit of a product.
    ///
    /// The quantity is decremented, floored at 0; reaching 0 deletes the
    /// line. Unknown product ids are a no-op.
    pub fn remove(&mut self, product_id: &str) {
        let Some(line) = self.lines.get_mut(product_id) else {
            return;
        };
        line.quantity -= 1;
        let emptied = line.quantity == 0;
        if emptied {
            self.lines.remove(product_id);
        }
        debug!(product_id, quantity = self.quantity_of(product_id), "removed from trolley");
    }

    /// Removes a whole line by product id, returning it if present.
    ///
    /// Used by checkout reconciliation to drop rejected lines.
    pub(crate) fn remove_line(&mut self, product_id: &str) -> Option<LineItem> {
        self.lines.remove(product_id)
    }

    /// Empties the trolley. All lines disappear in one step; no intermediate
    /// state is observable.
    pub fn cancel(&mut self) {
        self.lines.clear();
        debug!("trolley cleared");
    }

    /// Advances the sort mode, wrapping after the last, and returns the new
    /// mode.
    pub fn cycle_sort_mode(&mut self) -> SortMode {
        self.sort_mode = self.sort_mode.next();
        debug!(mode = self.sort_mode.label(), "sort mode changed");
        self.sort_mode
    }

    /// Lines in the active sort order.
    ///
    /// Stable sort over the product-id base order: ties keep their relative
    /// base order, so equal-key entries never swap between renders.
    pub fn sorted_lines(&self) -> Vec<&LineItem> {
        let mut lines: Vec<&LineItem> = self.lines.values().collect();
        match self.sort_mode {
            // Base order already is product-id order.
            SortMode::ById => {}
            SortMode::ByDescription => {
                lines.sort_by(|a, b| a.product.description.cmp(&b.product.description));
            }
            SortMode::ByTotalAsc => lines.sort_by_key(|l| l.line_total()),
            SortMode::ByTotalDesc => lines.sort_by(|a, b| b.line_total().cmp(&a.line_total())),
        }
        lines
    }

    /// Lines in canonical product-id order, independent of the display sort.
    ///
    /// This is the order sent to the stock store's batch purchase.
    pub fn checkout_lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.values()
    }

    /// Trolley total across all lines.
    pub fn total(&self) -> Money {
        self.lines.values().map(LineItem::line_total).sum()
    }

    /// Renders the trolley for display: one line per entry in the active
    /// sort order, then the total. Empty trolley renders as an empty string.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        for line in self.sorted_lines() {
            out.push_str(&format_line(line));
            out.push('\n');
        }
        out.push_str(&format!("{:>43} {:>10}\n", "Total:", self.total().to_string()));
        out
    }
}

/// Formats one line item the way the trolley and the receipt show it.
pub(crate) fn format_line(line: &LineItem) -> String {
    format!(
        "{:<6} {:<24} {:>8} x{:<3} {:>10}",
        line.product.product_id,
        line.product.description,
        line.product.price().to_string(),
        line.quantity,
        line.line_total().to_string(),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, description: &str, price_pence: i64) -> Product {
        Product {
            product_id: id.to_string(),
            description: description.to_string(),
            image_ref: format!("{id}.jpg"),
            unit_price_pence: price_pence,
            stock_quantity: 100,
        }
    }

    #[test]
    fn test_add_merges_duplicate_products() {
        let mut trolley = Trolley::new();
        let tv = product("0001", "40 inch TV", 26900);

        trolley.add(&tv);
        trolley.add(&tv);
        trolley.add(&tv);

        assert_eq!(trolley.line_count(), 1);
        assert_eq!(trolley.quantity_of("0001"), 3);
    }

    #[test]
    fn test_add_remove_same_count_clears_the_line() {
        let mut trolley = Trolley::new();
        let radio = product("0002", "DAB radio", 2999);

        trolley.add(&radio);
        trolley.add(&radio);
        trolley.remove("0002");
        trolley.remove("0002");

        assert!(trolley.is_empty());
        assert_eq!(trolley.quantity_of("0002"), 0);
    }

    #[test]
    fn test_remove_unknown_product_is_a_noop() {
        let mut trolley = Trolley::new();
        trolley.add(&product("0001", "40 inch TV", 26900));

        trolley.remove("9999");

        assert_eq!(trolley.line_count(), 1);
    }

    #[test]
    fn test_invariants_hold_for_mixed_add_remove_sequences() {
        let mut trolley = Trolley::new();
        let a = product("0001", "40 inch TV", 26900);
        let b = product("0002", "DAB radio", 2999);

        for _ in 0..5 {
            trolley.add(&a);
            trolley.add(&b);
        }
        trolley.remove("0001");
        trolley.remove("0001");
        trolley.remove("0002");

        // Never two lines per id, never a zero-quantity line.
        assert_eq!(trolley.line_count(), 2);
        for line in trolley.sorted_lines() {
            assert!(line.quantity >= 1);
        }
        assert_eq!(trolley.quantity_of("0001"), 3);
        assert_eq!(trolley.quantity_of("0002"), 4);
    }

    #[test]
    fn test_cancel_empties_the_trolley() {
        let mut trolley = Trolley::new();
        trolley.add(&product("0001", "40 inch TV", 26900));
        trolley.add(&product("0002", "DAB radio", 2999));

        trolley.cancel();

        assert!(trolley.is_empty());
        assert_eq!(trolley.render(), "");
    }

    #[test]
    fn test_cycle_sort_mode_wraps_after_four() {
        let mut trolley = Trolley::new();
        let start = trolley.sort_mode();

        for _ in 0..4 {
            trolley.cycle_sort_mode();
        }

        assert_eq!(trolley.sort_mode(), start);
    }

    #[test]
    fn test_sort_by_description() {
        let mut trolley = Trolley::new();
        trolley.add(&product("0003", "Zoom lens", 18000));
        trolley.add(&product("0001", "Air fryer", 7500));

        trolley.cycle_sort_mode(); // ById -> ByDescription

        let ids: Vec<&str> = trolley
            .sorted_lines()
            .iter()
            .map(|l| l.product.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["0001", "0003"]);

        let descriptions: Vec<&str> = trolley
            .sorted_lines()
            .iter()
            .map(|l| l.product.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["Air fryer", "Zoom lens"]);
    }

    #[test]
    fn test_total_price_sort_uses_line_totals() {
        let mut trolley = Trolley::new();
        // 2 × £10.00 = £20.00 beats 1 × £15.00.
        let cheap = product("0001", "Kettle", 1500);
        let dear = product("0002", "Toaster", 1000);
        trolley.add(&cheap);
        trolley.add(&dear);
        trolley.add(&dear);

        trolley.cycle_sort_mode(); // ByDescription
        trolley.cycle_sort_mode(); // ByTotalAsc

        let ids: Vec<&str> = trolley
            .sorted_lines()
            .iter()
            .map(|l| l.product.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["0001", "0002"]);

        trolley.cycle_sort_mode(); // ByTotalDesc
        let ids: Vec<&str> = trolley
            .sorted_lines()
            .iter()
            .map(|l| l.product.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["0002", "0001"]);
    }

    #[test]
    fn test_tied_totals_keep_base_order() {
        let mut trolley = Trolley::new();
        // Three lines with identical totals, added out of id order.
        trolley.add(&product("0003", "Mug", 500));
        trolley.add(&product("0001", "Bowl", 500));
        trolley.add(&product("0002", "Plate", 500));

        trolley.cycle_sort_mode(); // ByDescription
        trolley.cycle_sort_mode(); // ByTotalAsc

        let ids: Vec<&str> = trolley
            .sorted_lines()
            .iter()
            .map(|l| l.product.product_id.as_str())
            .collect();
        // Ties resolve to the product-id base order, every time.
        assert_eq!(ids, vec!["0001", "0002", "0003"]);

        // Re-sorting under the same mode changes nothing.
        let again: Vec<&str> = trolley
            .sorted_lines()
            .iter()
            .map(|l| l.product.product_id.as_str())
            .collect();
        assert_eq!(again, ids);
    }

    #[test]
    fn test_render_shows_each_line_and_the_total() {
        let mut trolley = Trolley::new();
        let tv = product("0001", "40 inch TV", 26900);
        trolley.add(&tv);
        trolley.add(&tv);

        let rendering = trolley.render();

        assert!(rendering.contains("0001"));
        assert!(rendering.contains("40 inch TV"));
        assert!(rendering.contains("£269.00"));
        assert!(rendering.contains("x2"));
        assert!(rendering.contains("£538.00"));
        assert!(rendering.contains("Total:"));
    }

    #[test]
    fn test_checkout_lines_stay_in_id_order_regardless_of_display_sort() {
        let mut trolley = Trolley::new();
        trolley.add(&product("0002", "Aardvark figurine", 100));
        trolley.add(&product("0001", "Zebra figurine", 200));

        trolley.cycle_sort_mode(); // ByDescription: Aardvark first

        let ids: Vec<&str> = trolley
            .checkout_lines()
            .map(|l| l.product.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["0001", "0002"]);
    }
}
