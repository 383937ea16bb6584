//! # Product Record
//!
//! The immutable description of a purchasable item, plus the payment
//! modes the checkout screen offers.
//!
//! A product comes from one of three loaders and is never mutated after
//! construction:
//!
//! - the tag resolution table (RFID scans),
//! - the catalog search client,
//! - the placeholder constructor for unknown tags.
//!
//! Quantity is **not** part of a product; it lives on the cart entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A purchasable item.
///
/// ## Identity
/// `id` is the stable key: the normalized tag UID for scanned items, the
/// catalog id for search results. `name` doubles as the lookup key for the
/// tax table and recommendations - NOT a stable key, same-named items from
/// different sources can collide and that is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Stable unique identifier.
    pub id: String,

    /// Display name; also the tax-rate lookup key.
    pub name: String,

    /// Unit price in paise.
    pub price_paise: i64,

    /// Descriptive category ("RFID Scan", "Electronics", ...). No invariants.
    pub category: String,

    /// Image URL or an emoji placeholder.
    pub image: String,

    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional seller name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,

    /// Optional pack-size label ("300g", "40 pieces").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_label: Option<String>,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Placeholder for a scanned tag the resolution table does not know.
    ///
    /// A scan must never be silently dropped: the shopper sees an
    /// "Unknown Product" at ₹0.00 appear and can remove or correct it,
    /// instead of wondering why a tap did nothing.
    pub fn unknown(uid: &str) -> Self {
        Product {
            id: uid.to_string(),
            name: "Unknown Product".to_string(),
            price_paise: 0,
            category: "Unknown".to_string(),
            image: "❓".to_string(),
            description: None,
            seller: None,
            qty_label: None,
        }
    }
}

// =============================================================================
// Payment Mode
// =============================================================================

/// The payment method selected on the checkout screen.
///
/// Payment here is a state transition, not a processor integration; the
/// mode is carried onto the invoice as a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMode {
    /// UPI transfer (GPay, PhonePe, ...).
    Upi,
    /// Credit/debit card.
    Card,
    /// Net banking.
    NetBanking,
}

impl PaymentMode {
    /// Uppercase label as printed on the invoice.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::Card => "CARD",
            PaymentMode::NetBanking => "NETBANKING",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_placeholder() {
        let p = Product::unknown("D3D454FB");
        assert_eq!(p.id, "D3D454FB");
        assert_eq!(p.name, "Unknown Product");
        assert!(p.price().is_zero());
        assert_eq!(p.category, "Unknown");
    }

    #[test]
    fn test_payment_mode_labels() {
        assert_eq!(PaymentMode::Upi.to_string(), "UPI");
        assert_eq!(PaymentMode::Card.to_string(), "CARD");
        assert_eq!(PaymentMode::NetBanking.to_string(), "NETBANKING");
    }
}
