//! # SmartCart Storefront
//!
//! Headless storefront runtime: owns the shared cart, keeps the RFID
//! scan channel alive, and drives the checkout flow from a small console
//! prompt. Page rendering is someone else's job - this binary is the
//! wiring.
//!
//! ## Runtime Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Runtime                               │
//! │                                                                         │
//! │  ScanChannel task ──► SharedCart ◄── CheckoutFlow (console commands)   │
//! │       │                   │                                             │
//! │       │                   └──► status logger (every 5s, on change)     │
//! │       │                                                                 │
//! │  CatalogClient ──► browse shelf (search_or_fallback)                   │
//! │                                                                         │
//! │  ctrl-c / quit ──► ScanHandle::shutdown ──► clean exit                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod checkout;
mod session;

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use smartcart_catalog::CatalogClient;
use smartcart_core::{CartTotals, PaymentMode, SharedCart, TagTable};
use smartcart_scan::{ScanChannel, ScanConfig, ScanHandle};

use checkout::CheckoutFlow;

/// ## Log Levels (via RUST_LOG)
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=smartcart=trace` - Trace for smartcart crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,smartcart=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    info!("Starting SmartCart storefront...");

    let mut config = ScanConfig::load_or_default(None);
    if let Err(e) = config.validate() {
        warn!(%e, "Scanner config invalid, using defaults");
        config = ScanConfig::default();
    }
    info!(url = %config.url, "Scanner endpoint configured");

    let tags = TagTable::builtin();
    info!(tags = tags.len(), "Tag resolution table loaded");

    let cart = SharedCart::new();
    let scan = ScanChannel::spawn(config, tags, cart.clone());

    // Warm the browse shelf; failure degrades to the substitute list
    let catalog = CatalogClient::default();
    let shelf = catalog.search_or_fallback("iphone").await;
    info!(products = shelf.len(), "Browse shelf loaded");

    spawn_status_logger(cart.clone(), scan.clone());

    let flow = CheckoutFlow::default();
    info!("Storefront running. Commands: cart, checkout, pay <upi|card|netbanking>, receipt, quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        if handle_command(line.trim(), &cart, &flow) {
                            break;
                        }
                    }
                    // stdin closed (piped input drained)
                    Ok(None) => break,
                    Err(e) => {
                        warn!(%e, "Failed to read command");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    info!("Shutting down...");
    if let Err(e) = scan.shutdown().await {
        warn!(%e, "Scan channel was already stopped");
    }
    // Give the channel task a moment to close its socket
    tokio::time::sleep(Duration::from_millis(200)).await;
    info!("Goodbye.");
}

/// Runs one console command. Returns true when the app should exit.
fn handle_command(command: &str, cart: &SharedCart, flow: &CheckoutFlow) -> bool {
    match command {
        "" => {}

        "cart" => cart.with_cart(|c| {
            for entry in c.entries() {
                println!(
                    "  {} x{}  {}",
                    entry.product.name,
                    entry.quantity,
                    entry.line_total()
                );
            }
            println!("  {} items, total {}", c.total_item_count(), c.total_price());
        }),

        "checkout" => match flow.begin_checkout(cart) {
            Ok(()) => println!("Checkout started. Next: pay <upi|card|netbanking>"),
            Err(e) => println!("{e}"),
        },

        "pay upi" | "pay card" | "pay netbanking" => {
            let mode = match command {
                "pay upi" => PaymentMode::Upi,
                "pay card" => PaymentMode::Card,
                _ => PaymentMode::NetBanking,
            };
            match flow.confirm_payment(mode) {
                Ok(()) => {
                    cart.with_cart_mut(|c| c.clear());
                    println!("Payment confirmed. Next: receipt");
                }
                Err(e) => println!("{e}"),
            }
        }

        "receipt" => match flow.render_receipt() {
            Ok(text) => println!("{text}"),
            Err(e) => println!("{e}"),
        },

        "quit" | "exit" => return true,

        other => println!("Unknown command: {other}"),
    }
    false
}

/// Logs connection state and cart totals whenever the totals change.
fn spawn_status_logger(cart: SharedCart, scan: ScanHandle) {
    tokio::spawn(async move {
        let mut last_count = 0i64;
        let mut last_paise = 0i64;
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            let totals = cart.with_cart(|c| CartTotals::from(c));
            let state = scan.state().await;
            if totals.total_item_count != last_count || totals.total_price_paise != last_paise {
                info!(
                    scanner = %state,
                    items = totals.total_item_count,
                    total_paise = totals.total_price_paise,
                    "Cart updated"
                );
                last_count = totals.total_item_count;
                last_paise = totals.total_price_paise;
            }
        }
    });
}
