//! # Checkout / Invoice Flow
//!
//! Freezes a cart snapshot into an immutable invoice at the moment of
//! payment confirmation.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout → Invoice → Receipt                        │
//! │                                                                         │
//! │   Cart ──snapshot──► finalize(mode) ──► Invoice (immutable)            │
//! │                          │                  │                           │
//! │            empty cart ───┘                  │ handed off, consumed once │
//! │            → EmptyCart error                ▼                           │
//! │            (no state change)        Receipt renderer                    │
//! │                                     re-runs the SAME pricing engine     │
//! │                                     over Invoice.items; totals must     │
//! │                                     agree bit-for-bit                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Item quantity and unit price are captured at confirmation; later cart
//! mutations never retroactively change an issued invoice.
//!
//! ## Metadata Caveat
//! Invoice number, date and time are generated at receipt-RENDER time,
//! not at checkout time. Regenerating the receipt therefore changes its
//! displayed number. Preserved as documented behavior - the intent in the
//! storefront is ambiguous and a stable number would be a silent fix.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{self, LineItem, PricingConfig, PricingSummary};
use crate::product::PaymentMode;

// =============================================================================
// Invoice
// =============================================================================

/// An immutable invoice snapshot, created once at checkout confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    /// Internal id (UUID v4). The human-facing invoice number lives in
    /// [`InvoiceMetadata`] and is generated later, at render time.
    pub id: String,

    /// Items with quantity and unit price frozen at confirmation.
    pub items: Vec<LineItem>,

    pub subtotal: Money,
    pub total_discount: Money,
    pub total_tax: Money,
    pub grand_total: Money,

    /// Selected payment method label.
    pub payment_mode: PaymentMode,

    /// When the invoice was issued.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Finalizes the current cart into an invoice.
///
/// Precondition: the cart must hold at least one item; otherwise
/// [`CoreError::EmptyCart`] with no state change. On success the pricing
/// engine runs over the snapshot and its aggregate figures are frozen in.
pub fn finalize(cart: &Cart, mode: PaymentMode, config: &PricingConfig) -> CoreResult<Invoice> {
    if cart.total_item_count() == 0 {
        return Err(CoreError::EmptyCart);
    }

    let items: Vec<LineItem> = cart.entries().iter().map(LineItem::from).collect();
    let summary = pricing::price(&items, config);

    Ok(Invoice {
        id: Uuid::new_v4().to_string(),
        items,
        subtotal: summary.subtotal,
        total_discount: summary.total_discount,
        total_tax: summary.total_tax,
        grand_total: summary.grand_total,
        payment_mode: mode,
        created_at: Utc::now(),
    })
}

impl Invoice {
    /// Re-derives the full per-item breakdown from the frozen item list.
    ///
    /// The receipt does not trust a single pre-computed total; it reprices
    /// the items through the same engine as checkout. Given the same rate
    /// tables the two must agree exactly - a deliberate consistency check.
    pub fn breakdown(&self, config: &PricingConfig) -> PricingSummary {
        pricing::price(&self.items, config)
    }
}

// =============================================================================
// Render-Time Metadata
// =============================================================================

/// Invoice number, date and time as printed on the receipt.
///
/// Generated at render time from the clock; see the module caveat.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceMetadata {
    /// "SCINV" + last 8 digits of epoch milliseconds.
    pub number: String,
    /// dd/mm/yyyy.
    pub date: String,
    /// HH:MM (24h).
    pub time: String,
}

impl InvoiceMetadata {
    /// Generates metadata from a render-time clock reading.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let millis = now.timestamp_millis().to_string();
        let tail = if millis.len() > 8 {
            &millis[millis.len() - 8..]
        } else {
            &millis
        };

        InvoiceMetadata {
            number: format!("SCINV{}", tail),
            date: format!("{:02}/{:02}/{}", now.day(), now.month(), now.year()),
            time: format!("{:02}:{:02}", now.hour(), now.minute()),
        }
    }
}

// =============================================================================
// Static Identities
// =============================================================================

/// Static store identity printed on every receipt.
#[derive(Debug, Clone, Copy)]
pub struct StoreIdentity {
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub gstin: &'static str,
}

/// The demo store.
pub const STORE: StoreIdentity = StoreIdentity {
    name: "SmartCart Retail Solutions",
    address: "IoT Tech Park, 4th Cross Rd, Moradabad, UP, India - 244001",
    phone: "+91-9988-776655",
    email: "support@smartcart.in",
    gstin: "09AAACC0000C1Z2",
};

/// Static customer identity (single demo loyalty account).
#[derive(Debug, Clone, Copy)]
pub struct CustomerIdentity {
    pub name: &'static str,
    pub phone: &'static str,
    pub loyalty_id: &'static str,
}

/// The demo customer.
pub const CUSTOMER: CustomerIdentity = CustomerIdentity {
    name: "Dhananjai Sharma",
    phone: "9876543210",
    loyalty_id: "SC10082025",
};

// =============================================================================
// Unit Tests
// =============================================================================
