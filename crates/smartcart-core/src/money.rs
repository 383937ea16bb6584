//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A receipt that re-derives its own tax column must agree with the       │
//! │  checkout screen to the last paisa. Floats cannot promise that.         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹27.93 = 2793 paise, GST splits as 66 + 67 = 133                    │
//! │    Every remainder is explicit and lands somewhere we chose            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use smartcart_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(1400); // ₹14.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                        // ₹28.00
//! let total = price + Money::from_paise(5000);    // ₹64.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(14.00); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for the round-off line
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.price_paise ──► LineItem.unit_price ──► item total
///                                                     │
///        subtotal ◄── Σ item totals                   ▼
///        discount / taxable / GST ──► grand total ──► payable + round-off
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use smartcart_core::money::Money;
    ///
    /// let price = Money::from_paise(1400); // Represents ₹14.00
    /// assert_eq!(price.paise(), 1400);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use smartcart_core::money::Money;
    ///
    /// let price = Money::from_rupees(40000); // ₹40000.00
    /// assert_eq!(price.paise(), 4_000_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use smartcart_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(1400); // ₹14.00
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.paise(), 2800); // ₹28.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a basis-point rate (tax or discount) with half-up rounding.
    ///
    /// ## Implementation
    /// Integer math: `(paise * bps + 5000) / 10000`. The +5000 rounds the
    /// half-paisa boundary up, matching how the storefront presents money
    /// to two decimal places. i128 intermediate prevents overflow.
    ///
    /// ## Example
    /// ```rust
    /// use smartcart_core::money::{Money, TaxRate};
    ///
    /// let taxable = Money::from_paise(2660);        // ₹26.60
    /// let gst = taxable.apply_rate(TaxRate::from_bps(500)); // 5%
    /// assert_eq!(gst.paise(), 133);                 // ₹1.33
    /// ```
    pub fn apply_rate(&self, rate: TaxRate) -> Money {
        let paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(paise as i64)
    }

    /// Splits the amount into two halves that always sum back exactly.
    ///
    /// GST is presented as two parallel authorities (CGST/SGST). The split
    /// is a display decomposition, never a second computation: an odd paisa
    /// goes to the second half, so `a + b == self` holds for every input.
    ///
    /// ## Example
    /// ```rust
    /// use smartcart_core::money::Money;
    ///
    /// let (cgst, sgst) = Money::from_paise(133).split_half();
    /// assert_eq!(cgst.paise(), 66);
    /// assert_eq!(sgst.paise(), 67);
    /// assert_eq!(cgst + sgst, Money::from_paise(133));
    /// ```
    #[inline]
    pub const fn split_half(&self) -> (Money, Money) {
        let first = self.0 / 2;
        (Money(first), Money(self.0 - first))
    }

    /// Rounds to the nearest whole rupee (half away from zero).
    ///
    /// The payable figure on the receipt is a whole rupee; the signed gap
    /// to the exact grand total is reported as the round-off line.
    ///
    /// ## Example
    /// ```rust
    /// use smartcart_core::money::Money;
    ///
    /// let grand_total = Money::from_paise(2793); // ₹27.93
    /// let payable = grand_total.round_to_rupee();
    /// assert_eq!(payable.paise(), 2800);         // ₹28.00
    /// assert_eq!((payable - grand_total).paise(), 7); // round-off +₹0.07
    /// ```
    pub const fn round_to_rupee(&self) -> Money {
        let rupees = if self.0 >= 0 {
            (self.0 + 50) / 100
        } else {
            (self.0 - 50) / 100
        };
        Money(rupees * 100)
    }

    /// Parses a stored price string into Money, stripping non-numeric noise.
    ///
    /// Tag records keep prices as strings ("40000", "₹1,299", "2"). All
    /// characters except digits and the first decimal point are dropped;
    /// anything unparseable degrades to zero rather than erroring, so a
    /// bad record still produces a visible (free) cart entry.
    ///
    /// ## Example
    /// ```rust
    /// use smartcart_core::money::Money;
    ///
    /// assert_eq!(Money::parse_price_str("40000").paise(), 4_000_000);
    /// assert_eq!(Money::parse_price_str("₹1,299").paise(), 129_900);
    /// assert_eq!(Money::parse_price_str("12.50").paise(), 1250);
    /// assert_eq!(Money::parse_price_str("n/a").paise(), 0);
    /// ```
    pub fn parse_price_str(raw: &str) -> Money {
        let mut cleaned = String::with_capacity(raw.len());
        let mut seen_point = false;
        for c in raw.chars() {
            if c.is_ascii_digit() {
                cleaned.push(c);
            } else if c == '.' && !seen_point {
                seen_point = true;
                cleaned.push(c);
            }
        }

        let value: f64 = cleaned.parse().unwrap_or(0.0);
        Money::from_paise((value * 100.0).round() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is the receipt format. Two decimal places always; the sign sits
/// in front of the currency mark for the round-off line.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            self.rupees_part().abs(),
            self.paise_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Tax / Discount Rates
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (standard GST), 500 bps = 5% (packaged food)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// The storewide discount rate. Same representation as [`TaxRate`];
/// a separate name keeps call sites honest about which rate they hold.
pub type DiscountRate = TaxRate;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(2793);
        assert_eq!(money.paise(), 2793);
        assert_eq!(money.rupees_part(), 27);
        assert_eq!(money.paise_part(), 93);
    }

    #[test]
    fn test_from_rupees() {
        assert_eq!(Money::from_rupees(40000).paise(), 4_000_000);
        assert_eq!(Money::from_rupees(0).paise(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(2793)), "₹27.93");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-7)), "-₹0.07");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);
    }

    #[test]
    fn test_apply_rate_basic() {
        // ₹10.00 at 10% = ₹1.00
        let amount = Money::from_paise(1000);
        let rate = TaxRate::from_bps(1000);
        assert_eq!(amount.apply_rate(rate).paise(), 100);
    }

    #[test]
    fn test_apply_rate_with_rounding() {
        // ₹26.60 at 5% = ₹1.33 exactly (no rounding needed)
        assert_eq!(
            Money::from_paise(2660).apply_rate(TaxRate::from_bps(500)).paise(),
            133
        );
        // ₹10.00 at 8.25% = ₹0.825 → ₹0.83 (half rounds up)
        assert_eq!(
            Money::from_paise(1000).apply_rate(TaxRate::from_bps(825)).paise(),
            83
        );
    }

    #[test]
    fn test_split_half_sums_exactly() {
        for paise in [0i64, 1, 2, 133, 684_000, 999_999] {
            let (a, b) = Money::from_paise(paise).split_half();
            assert_eq!((a + b).paise(), paise, "split of {paise} must reassemble");
        }

        let (cgst, sgst) = Money::from_paise(133).split_half();
        assert_eq!(cgst.paise(), 66);
        assert_eq!(sgst.paise(), 67);
    }

    #[test]
    fn test_round_to_rupee() {
        // ₹27.93 → ₹28.00, round-off +₹0.07
        let grand = Money::from_paise(2793);
        assert_eq!(grand.round_to_rupee().paise(), 2800);

        // ₹44840.00 stays put, round-off ₹0.00
        let exact = Money::from_paise(4_484_000);
        assert_eq!(exact.round_to_rupee(), exact);

        // ₹10.49 → ₹10.00 (rounds down), round-off -₹0.49
        let down = Money::from_paise(1049);
        assert_eq!(down.round_to_rupee().paise(), 1000);
        assert_eq!((down.round_to_rupee() - down).paise(), -49);

        // Exactly halfway rounds away from zero
        assert_eq!(Money::from_paise(1050).round_to_rupee().paise(), 1100);
    }

    #[test]
    fn test_parse_price_str() {
        assert_eq!(Money::parse_price_str("40000").paise(), 4_000_000);
        assert_eq!(Money::parse_price_str("2").paise(), 200);
        assert_eq!(Money::parse_price_str("₹1,299").paise(), 129_900);
        assert_eq!(Money::parse_price_str("12.50").paise(), 1250);
        // Garbage degrades to zero, never errors
        assert_eq!(Money::parse_price_str("").paise(), 0);
        assert_eq!(Money::parse_price_str("n/a").paise(), 0);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(18.0);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        assert!(Money::from_paise(-49).is_negative());
    }
}
