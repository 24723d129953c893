//! # Customer Session
//!
//! One customer's interaction with the shop: owns the trolley, processes
//! intents from the presentation layer one at a time, and emits the view
//! state the presentation layer renders.
//!
//! ## Intent Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  presentation layer            Session                              │
//! │  ──────────────────            ───────                              │
//! │                                                                     │
//! │  Search("tv") ───────────────► route + store lookup                 │
//! │  AddToTrolley(product) ──────► trolley.add                          │
//! │  RemoveFromTrolley(product) ─► trolley.remove                       │
//! │  CycleSort ──────────────────► trolley.cycle_sort_mode              │
//! │  Checkout ───────────────────► CheckoutReconciler                   │
//! │  Cancel ─────────────────────► trolley.cancel                       │
//! │  CloseReceipt ───────────────► receipt cleared                      │
//! │                                      │                              │
//! │  ◄─────────────────────── ViewState ─┘                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each intent runs to completion before the next is accepted: `handle`
//! takes `&mut self`, so intents for one session can never interleave.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::advisor::advise;
use crate::checkout::{CheckoutOutcome, CheckoutReconciler};
use crate::contract::{OrderLedger, StockStore};
use crate::error::EngineResult;
use crate::search::{route, LookupPlan};
use crate::trolley::{format_line, Trolley};
use crate::types::{Order, Product};

/// Image shown on the search page when no product is selected.
pub const PLACEHOLDER_IMAGE: &str = "placeholder.jpg";

/// A customer intent forwarded by the presentation layer.
///
/// The `Option<Product>` on add/remove is the selection state of the
/// results list: `None` means nothing was searched/selected yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    Search(String),
    AddToTrolley(Option<Product>),
    RemoveFromTrolley(Option<Product>),
    Checkout,
    Cancel,
    CycleSort,
    CloseReceipt,
}

/// Everything the presentation layer needs after an intent.
///
/// An empty `receipt_rendering` means "show the trolley page"; non-empty
/// means "show the receipt page".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub image_ref: String,
    pub status_message: String,
    pub trolley_rendering: String,
    pub receipt_rendering: String,
    pub active_sort_label: String,
}

/// Session state for one customer.
pub struct Session<S, L> {
    store: S,
    ledger: L,
    trolley: Trolley,
    selected: Option<Product>,
    results: Vec<Product>,
    status: String,
    receipt: String,
}

impl<S: StockStore, L: OrderLedger> Session<S, L> {
    pub fn new(store: S, ledger: L) -> Self {
        Session {
            store,
            ledger,
            trolley: Trolley::new(),
            selected: None,
            results: Vec::new(),
            status: "No product searched yet".to_string(),
            receipt: String::new(),
        }
    }

    /// Processes one intent and returns the resulting view state.
    ///
    /// `Err` means a collaborator I/O failure; session state, trolley
    /// included, is unchanged and the presentation layer should show a
    /// generic failure notice.
    pub fn handle(&mut self, intent: Intent) -> EngineResult<ViewState> {
        debug!(?intent, "handling intent");
        match intent {
            Intent::Search(query) => self.search(&query)?,
            Intent::AddToTrolley(product) => self.add_to_trolley(product),
            Intent::RemoveFromTrolley(product) => self.remove_from_trolley(product),
            Intent::Checkout => self.checkout()?,
            Intent::Cancel => self.trolley.cancel(),
            Intent::CycleSort => {
                self.trolley.cycle_sort_mode();
            }
            Intent::CloseReceipt => self.receipt.clear(),
        }
        Ok(self.view_state())
    }

    /// Results of the most recent search, for the results list widget.
    pub fn last_results(&self) -> &[Product] {
        &self.results
    }

    /// Read access to the trolley.
    pub fn trolley(&self) -> &Trolley {
        &self.trolley
    }

    fn search(&mut self, query: &str) -> EngineResult<()> {
        match route(query) {
            LookupPlan::Invalid => {
                self.selected = None;
                self.results.clear();
                self.status = "Please provide a search term".to_string();
            }
            LookupPlan::ExactId(id) => match self.store.lookup_by_id(&id)? {
                Some(product) => {
                    let advice = advise(product.stock_quantity);
                    self.status = format!(
                        "{} {} ({}). {}",
                        product.product_id,
                        product.description,
                        product.price(),
                        advice.message
                    );
                    self.selected = Some(product.clone());
                    self.results = vec![product];
                }
                None => {
                    // A miss on an exact id is a normal outcome.
                    self.selected = None;
                    self.results.clear();
                    self.status = format!("No product was found with ID {id}");
                }
            },
            LookupPlan::FuzzyText(text) => {
                let found = self.store.search_by_text(&text)?;
                self.selected = None;
                self.status = if found.is_empty() {
                    format!("No products matched \"{text}\"")
                } else {
                    format!("{} product(s) matched \"{text}\"", found.len())
                };
                self.results = found;
            }
        }
        Ok(())
    }

    fn add_to_trolley(&mut self, product: Option<Product>) {
        let Some(product) = product else {
            self.status =
                "Please search for an available product before adding it to the trolley"
                    .to_string();
            return;
        };
        self.trolley.add(&product);
        self.status = format!("Added {} to the trolley", product.description);
        self.selected = Some(product);
        // Any receipt still on screen belongs to a finished order; adding
        // switches back to the trolley page.
        self.receipt.clear();
    }

    fn remove_from_trolley(&mut self, product: Option<Product>) {
        let Some(product) = product else { return };
        self.trolley.remove(&product.product_id);
    }

    fn checkout(&mut self) -> EngineResult<()> {
        let reconciler = CheckoutReconciler::new(&self.store, &self.ledger);
        match reconciler.checkout(&mut self.trolley)? {
            CheckoutOutcome::Empty => {
                self.status = "Your trolley is empty".to_string();
            }
            CheckoutOutcome::Committed(order) => {
                self.selected = None;
                self.status = format!("Order {} placed", order.order_id);
                self.receipt = render_receipt(&order);
            }
            CheckoutOutcome::PartiallyRejected { removed } => {
                self.selected = None;
                let mut notice = String::from(
                    "Removed from your trolley due to insufficient stock:\n",
                );
                for line in &removed {
                    notice.push_str(&format!(
                        "- {}, {} (only {} available, {} requested)\n",
                        line.product_id, line.description, line.available, line.requested
                    ));
                }
                self.status = notice;
            }
        }
        Ok(())
    }

    fn view_state(&self) -> ViewState {
        ViewState {
            image_ref: self
                .selected
                .as_ref()
                .map(|p| p.image_ref.clone())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            status_message: self.status.clone(),
            trolley_rendering: self.trolley.render(),
            receipt_rendering: self.receipt.clone(),
            active_sort_label: self.trolley.sort_mode().label().to_string(),
        }
    }
}

/// Renders a committed order for the receipt page.
fn render_receipt(order: &Order) -> String {
    let mut out = format!(
        "Order ID: {}\nPlaced at: {}\n",
        order.order_id,
        order.ordered_at.format("%Y-%m-%d %H:%M:%S"),
    );
    for item in &order.items {
        out.push_str(&format_line(item));
        out.push('\n');
    }
    out.push_str(&format!("{:>43} {:>10}\n", "Total:", order.total().to_string()));
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
