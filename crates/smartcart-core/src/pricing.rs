//! # Pricing Engine
//!
//! Pure, deterministic computation of money amounts from a list of line
//! items. No side effects, no I/O. The checkout screen and the receipt
//! both call [`price`] on the same item list, which is the mechanism
//! that keeps the two bit-for-bit identical.
//!
//! ## Per-Item Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  item_total   = quantity × unit_price                                   │
//! │  discount     = item_total × discount_rate        (storewide 5%)        │
//! │  taxable      = item_total − discount                                   │
//! │  tax          = taxable × tax_rate(product name)  (GST table, 18% dflt) │
//! │  line_final   = taxable + tax                                           │
//! │  (cgst, sgst) = tax split in half                 (display only;        │
//! │                                                    halves sum exactly)  │
//! │                                                                         │
//! │  subtotal       = Σ item_total                                          │
//! │  total_discount = Σ discount                                            │
//! │  total_tax      = Σ tax                                                 │
//! │  grand_total    = subtotal − total_discount + total_tax                 │
//! │  payable        = grand_total rounded to the nearest rupee              │
//! │  round_off      = payable − grand_total           (signed)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All intermediate amounts are exact paise; only the payable figure is a
//! whole-rupee rounding, and the signed round-off line makes the printed
//! components reconcile exactly to it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::cart::CartEntry;
use crate::money::{DiscountRate, Money, TaxRate};
use crate::{DEFAULT_DISCOUNT_BPS, DEFAULT_TAX_BPS};

// =============================================================================
// Tax Table
// =============================================================================

/// Immutable product-name → GST-rate mapping with a default branch.
///
/// Keyed by product *name* because that is what the storefront's rate
/// sheet uses; an absent name takes the default rate, never an error.
#[derive(Debug, Clone)]
pub struct TaxTable {
    rates: HashMap<String, TaxRate>,
    default_rate: TaxRate,
}

impl TaxTable {
    /// Builds a table from (name, rate) pairs and a default rate.
    pub fn new<I>(rates: I, default_rate: TaxRate) -> Self
    where
        I: IntoIterator<Item = (&'static str, TaxRate)>,
    {
        TaxTable {
            rates: rates
                .into_iter()
                .map(|(name, rate)| (name.to_string(), rate))
                .collect(),
            default_rate,
        }
    }

    /// The demo store's GST rate sheet.
    pub fn builtin() -> Self {
        TaxTable::new(
            [
                // 18% for electronics
                ("iPhone 12", TaxRate::from_bps(1800)),
                ("Fire-Boltt Brillia Smart Watch", TaxRate::from_bps(1800)),
                // 5% for packaged food
                ("MAGGI 2-Minute Instant Noodles", TaxRate::from_bps(500)),
                ("Multi-Grain Bread", TaxRate::from_bps(500)),
                ("CookieMan Choco Chunk Cookies", TaxRate::from_bps(500)),
                // 12% for confectionery and packaged dairy
                ("Alpenliebe Butter Toffee (40 pieces)", TaxRate::from_bps(1200)),
                ("Amul School Pack Butter Chips (100 pcs)", TaxRate::from_bps(1200)),
                // 18% for chocolate/luxury snacks
                ("Cadbury Dairy Milk Silk 60g", TaxRate::from_bps(1800)),
            ],
            TaxRate::from_bps(DEFAULT_TAX_BPS),
        )
    }

    /// Rate for a product name; unlisted names take the default rate.
    pub fn rate_for(&self, product_name: &str) -> TaxRate {
        self.rates
            .get(product_name)
            .copied()
            .unwrap_or(self.default_rate)
    }

    /// The default rate itself (for display of the rate column).
    pub fn default_rate(&self) -> TaxRate {
        self.default_rate
    }

    /// Iterates over the listed (name, rate) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TaxRate)> {
        self.rates.iter().map(|(n, r)| (n.as_str(), *r))
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        TaxTable::builtin()
    }
}

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Everything the pricing engine needs besides the items themselves.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Storewide flat discount applied to every line.
    pub discount: DiscountRate,

    /// Per-product GST rates.
    pub taxes: TaxTable,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            discount: DiscountRate::from_bps(DEFAULT_DISCOUNT_BPS),
            taxes: TaxTable::builtin(),
        }
    }
}

// =============================================================================
// Line Item (pricing input)
// =============================================================================

/// The unit the pricing engine consumes: one product at one quantity.
///
/// This is also the item shape carried on handoff payloads and frozen
/// into the invoice, so checkout and receipt price the same data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    /// Unit price frozen at snapshot time.
    pub unit_price: Money,
    pub quantity: i64,
}

impl From<&CartEntry> for LineItem {
    fn from(entry: &CartEntry) -> Self {
        LineItem {
            id: entry.product.id.clone(),
            name: entry.product.name.clone(),
            unit_price: entry.product.price(),
            quantity: entry.quantity,
        }
    }
}

// =============================================================================
// Pricing Output
// =============================================================================

/// Full money breakdown for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineBreakdown {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub item_total: Money,
    pub discount: Money,
    pub taxable: Money,
    pub tax: Money,
    /// Central GST half. `cgst + sgst == tax` exactly, always.
    pub cgst: Money,
    /// State GST half.
    pub sgst: Money,
    pub line_final: Money,
    /// Rate used, in basis points (for the "GST %" column).
    pub tax_rate_bps: u32,
}

/// Aggregate pricing result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingSummary {
    pub lines: Vec<LineBreakdown>,
    pub subtotal: Money,
    pub total_discount: Money,
    pub total_tax: Money,
    /// Exact total: subtotal − discount + tax, in paise.
    pub grand_total: Money,
    /// Grand total rounded to the nearest whole rupee.
    pub payable: Money,
    /// Signed gap: `payable − grand_total`.
    pub round_off: Money,
}

// =============================================================================
// The Engine
// =============================================================================

/// Prices a list of line items.
///
/// Deterministic and idempotent: pricing the same list twice yields the
/// same summary. A quantity of 0 contributes 0 to every sum and never
/// errors.
///
/// ## Example
/// ```rust
/// use smartcart_core::money::Money;
/// use smartcart_core::pricing::{price, LineItem, PricingConfig};
///
/// let items = vec![LineItem {
///     id: "D3D454FB".into(),
///     name: "iPhone 12".into(),
///     unit_price: Money::from_rupees(40000),
///     quantity: 1,
/// }];
///
/// let summary = price(&items, &PricingConfig::default());
/// assert_eq!(summary.total_discount, Money::from_rupees(2000)); // 5%
/// assert_eq!(summary.total_tax, Money::from_rupees(6840));      // 18% of 38000
/// assert_eq!(summary.payable, Money::from_rupees(44840));
/// ```
pub fn price(items: &[LineItem], config: &PricingConfig) -> PricingSummary {
    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal = Money::zero();
    let mut total_discount = Money::zero();
    let mut total_tax = Money::zero();

    for item in items {
        let quantity = item.quantity.max(0);
        let rate = config.taxes.rate_for(&item.name);

        let item_total = item.unit_price.multiply_quantity(quantity);
        let discount = item_total.apply_rate(config.discount);
        let taxable = item_total - discount;
        let tax = taxable.apply_rate(rate);
        let (cgst, sgst) = tax.split_half();

        subtotal += item_total;
        total_discount += discount;
        total_tax += tax;

        lines.push(LineBreakdown {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity,
            unit_price: item.unit_price,
            item_total,
            discount,
            taxable,
            tax,
            cgst,
            sgst,
            line_final: taxable + tax,
            tax_rate_bps: rate.bps(),
        });
    }

    let grand_total = subtotal - total_discount + total_tax;
    let payable = grand_total.round_to_rupee();

    PricingSummary {
        lines,
        subtotal,
        total_discount,
        total_tax,
        grand_total,
        payable,
        round_off: payable - grand_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, rupees: i64, qty: i64) -> LineItem {
        LineItem {
            id: format!("id-{}", name),
            name: name.to_string(),
            unit_price: Money::from_rupees(rupees),
            quantity: qty,
        }
    }

    /// Scenario: one iPhone 12 at ₹40000, 5% discount, 18% GST.
    #[test]
    fn test_single_electronics_item() {
        let summary = price(&[item("iPhone 12", 40000, 1)], &PricingConfig::default());

        assert_eq!(summary.subtotal, Money::from_rupees(40000));
        assert_eq!(summary.total_discount, Money::from_rupees(2000));
        let line = &summary.lines[0];
        assert_eq!(line.taxable, Money::from_rupees(38000));
        assert_eq!(line.tax, Money::from_rupees(6840));
        assert_eq!(line.cgst, Money::from_rupees(3420));
        assert_eq!(line.sgst, Money::from_rupees(3420));
        assert_eq!(summary.grand_total, Money::from_paise(4_484_000)); // ₹44840.00
        assert_eq!(summary.payable, Money::from_rupees(44840));
        assert_eq!(summary.round_off, Money::zero());
    }

    /// Scenario: two packs of MAGGI at ₹14, 5% discount, 5% GST.
    /// The odd-paisa tax (₹1.33) and the +₹0.07 round-off both come out here.
    #[test]
    fn test_packaged_food_with_round_off() {
        let summary = price(
            &[item("MAGGI 2-Minute Instant Noodles", 14, 2)],
            &PricingConfig::default(),
        );

        let line = &summary.lines[0];
        assert_eq!(line.item_total, Money::from_paise(2800));
        assert_eq!(line.discount, Money::from_paise(140));
        assert_eq!(line.taxable, Money::from_paise(2660));
        assert_eq!(line.tax, Money::from_paise(133));
        assert_eq!(line.line_final, Money::from_paise(2793));

        assert_eq!(summary.grand_total, Money::from_paise(2793));
        assert_eq!(summary.payable, Money::from_paise(2800));
        assert_eq!(summary.round_off, Money::from_paise(7));
    }

    #[test]
    fn test_idempotence() {
        let items = vec![
            item("iPhone 12", 40000, 1),
            item("MAGGI 2-Minute Instant Noodles", 14, 3),
            item("Something Unlisted", 999, 2),
        ];
        let config = PricingConfig::default();

        let first = price(&items, &config);
        let second = price(&items, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tax_split_exact_for_every_listed_rate() {
        let config = PricingConfig::default();

        // Awkward price chosen so taxes land on odd paise
        let names: Vec<String> = config.taxes.iter().map(|(n, _)| n.to_string()).collect();
        for name in names {
            let summary = price(
                &[LineItem {
                    id: "x".into(),
                    name: name.clone(),
                    unit_price: Money::from_paise(33_333),
                    quantity: 1,
                }],
                &config,
            );
            let line = &summary.lines[0];
            assert_eq!(
                line.cgst + line.sgst,
                line.tax,
                "CGST + SGST must equal tax exactly for {name}"
            );
        }
    }

    #[test]
    fn test_unlisted_name_uses_default_rate() {
        let config = PricingConfig::default();
        let summary = price(&[item("Totally New Gadget", 100, 1)], &config);

        assert_eq!(summary.lines[0].tax_rate_bps, DEFAULT_TAX_BPS);
        // ₹100 − 5% = ₹95 taxable; 18% = ₹17.10
        assert_eq!(summary.lines[0].tax, Money::from_paise(1710));
    }

    #[test]
    fn test_round_off_reconciliation() {
        // Several carts; in each, payable must be the nearest rupee and
        // the round-off must bridge the gap exactly.
        let carts = vec![
            vec![item("MAGGI 2-Minute Instant Noodles", 14, 1)],
            vec![item("Multi-Grain Bread", 50, 3)],
            vec![item("iPhone 12", 40000, 1), item("Multi-Grain Bread", 50, 1)],
            vec![item("Alpenliebe Butter Toffee (40 pieces)", 2, 7)],
        ];

        for items in carts {
            let s = price(&items, &PricingConfig::default());
            assert_eq!(s.payable, s.grand_total.round_to_rupee());
            assert_eq!(s.round_off, s.payable - s.grand_total);
            assert_eq!(s.grand_total, s.subtotal - s.total_discount + s.total_tax);
            // Payable is whole rupees
            assert_eq!(s.payable.paise() % 100, 0);
        }
    }

    #[test]
    fn test_zero_quantity_contributes_nothing() {
        let summary = price(
            &[item("iPhone 12", 40000, 0), item("Multi-Grain Bread", 50, 2)],
            &PricingConfig::default(),
        );

        assert_eq!(summary.subtotal, Money::from_rupees(100));
        assert!(summary.lines[0].item_total.is_zero());
        assert!(summary.lines[0].tax.is_zero());
    }

    #[test]
    fn test_empty_item_list() {
        let summary = price(&[], &PricingConfig::default());
        assert!(summary.lines.is_empty());
        assert!(summary.grand_total.is_zero());
        assert!(summary.round_off.is_zero());
    }
}
