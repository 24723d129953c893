//! # Shopfront Kiosk
//!
//! Terminal front end for the trolley/checkout engine. Stands in for the
//! GUI: reads commands from stdin, forwards them as intents, prints the
//! view state the session emits.
//!
//! ## Commands
//! ```text
//! search <term>    look up by id (all digits) or description text
//! add <n>          add result n of the last search to the trolley
//! remove <n>       remove one unit of result n from the trolley
//! sort             cycle the trolley sort mode
//! checkout         attempt to purchase the trolley
//! cancel           empty the trolley
//! close            close the receipt page
//! quit             exit
//! ```

mod config;

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use shopfront_core::{Intent, Product, Session, ViewState};
use shopfront_store::{demo_catalogue, MemoryLedger, MemoryStore};

use config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::from_env();
    info!(store_name = %config.store_name, "starting kiosk");

    let store = MemoryStore::seeded(demo_catalogue())?;
    let ledger = MemoryLedger::new();
    let mut session = Session::new(store, ledger);

    println!("=== {} ===", config.store_name);
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }

        let input = input.trim();
        let (command, argument) = match input.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };

        let intent = match command {
            "" => continue,
            "help" => {
                print_help();
                continue;
            }
            "quit" | "exit" => break,
            "search" => Intent::Search(argument.to_string()),
            "add" => Intent::AddToTrolley(pick_result(&session, argument)),
            "remove" => Intent::RemoveFromTrolley(pick_result(&session, argument)),
            "sort" => Intent::CycleSort,
            "checkout" => Intent::Checkout,
            "cancel" => Intent::Cancel,
            "close" => Intent::CloseReceipt,
            other => {
                println!("Unknown command '{other}'. Type 'help' for commands.");
                continue;
            }
        };

        match session.handle(intent) {
            Ok(view) => print_view(&view, session.last_results()),
            Err(err) => {
                // Generic failure notice; the trolley is unchanged.
                tracing::error!(%err, "operation failed");
                println!("Sorry, something went wrong. Please try again.");
            }
        }
    }

    Ok(())
}

/// Picks a product from the last search results by 1-based index.
/// Anything unparsable or out of range maps to `None`, which the session
/// reports as "nothing selected".
fn pick_result(session: &Session<MemoryStore, MemoryLedger>, argument: &str) -> Option<Product> {
    let index: usize = argument.parse().ok()?;
    session.last_results().get(index.checked_sub(1)?).cloned()
}

fn print_view(view: &ViewState, results: &[Product]) {
    println!("[{}]", view.status_message.trim_end());
    if !results.is_empty() {
        for (i, product) in results.iter().enumerate() {
            println!(
                "  {}. {} {} ({})",
                i + 1,
                product.product_id,
                product.description,
                product.price()
            );
        }
    }
    if !view.receipt_rendering.is_empty() {
        println!("--- Receipt ---");
        print!("{}", view.receipt_rendering);
        println!("---------------");
    } else if !view.trolley_rendering.is_empty() {
        println!("--- Trolley ({}) ---", view.active_sort_label);
        print!("{}", view.trolley_rendering);
    }
}

fn print_help() {
    println!("search <term> | add <n> | remove <n> | sort | checkout | cancel | close | quit");
}

/// Default INFO level, overridable with RUST_LOG.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront_core=debug,shopfront_store=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
