//! # Checkout Flow
//!
//! The three-stage checkout pipeline, stitched together with one-shot
//! session handoffs:
//!
//! ```text
//! begin_checkout          confirm_payment            render_receipt
//!   cart snapshot ──put──►  take ──finalize──► put ──► take ──► text
//!   (empty cart             (Invoice frozen            (metadata from
//!    rejected, no            here; later cart           the RENDER-time
//!    state change)           edits can't touch it)      clock; breakdown
//!                                                       re-derived)
//! ```
//!
//! The receipt does not trust the invoice's stored aggregates alone: it
//! re-runs the pricing engine over the frozen items and prints that. The
//! two must agree to the paisa, and the tests hold us to it.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use smartcart_core::invoice::{self, InvoiceMetadata, CUSTOMER, STORE};
use smartcart_core::{Cart, CoreError, Invoice, PaymentMode, PricingConfig, SharedCart};

use crate::session::Handoff;

// =============================================================================
// Errors
// =============================================================================

/// Checkout stage failures, all user-facing.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Empty-cart rejection from the core, message shown as-is.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Payment confirmed without a checkout in progress.
    #[error("No checkout in progress. Please review your cart first.")]
    NoActiveCheckout,

    /// Receipt requested with nothing to render (already rendered, or
    /// payment never confirmed).
    #[error("No receipt pending.")]
    NoPendingReceipt,
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Owns the two handoff slots and the pricing configuration used by
/// every stage. One instance lives for the whole app session.
pub struct CheckoutFlow {
    config: PricingConfig,
    cart_handoff: Handoff<Cart>,
    invoice_handoff: Handoff<Invoice>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        CheckoutFlow::new(PricingConfig::default())
    }
}

impl CheckoutFlow {
    pub fn new(config: PricingConfig) -> Self {
        CheckoutFlow {
            config,
            cart_handoff: Handoff::new(),
            invoice_handoff: Handoff::new(),
        }
    }

    /// Stage 1: snapshot the live cart into the handoff slot.
    ///
    /// An empty cart is rejected with no state change - the slot keeps
    /// whatever it held before.
    pub fn begin_checkout(&self, cart: &SharedCart) -> Result<(), CheckoutError> {
        let snapshot = cart.with_cart(|c| c.clone());
        if snapshot.total_item_count() == 0 {
            return Err(CoreError::EmptyCart.into());
        }

        info!(
            items = snapshot.total_item_count(),
            total = %snapshot.total_price(),
            "Checkout started"
        );
        self.cart_handoff.put(snapshot);
        Ok(())
    }

    /// Stage 2: freeze the handed-off cart into an invoice.
    ///
    /// Consumes the cart snapshot; the invoice lands in its own handoff
    /// slot for the receipt stage.
    pub fn confirm_payment(&self, mode: PaymentMode) -> Result<(), CheckoutError> {
        let snapshot = self
            .cart_handoff
            .take()
            .ok_or(CheckoutError::NoActiveCheckout)?;

        let invoice = invoice::finalize(&snapshot, mode, &self.config)?;
        info!(
            invoice_id = %invoice.id,
            mode = mode.label(),
            payable = %invoice.grand_total.round_to_rupee(),
            "Payment confirmed"
        );

        self.invoice_handoff.put(invoice);
        Ok(())
    }

    /// Stage 3: consume the invoice and render the text receipt.
    ///
    /// Invoice number, date and time come from the clock *now* - a
    /// re-render would carry a different number, which is why the slot
    /// only lets this happen once per invoice.
    pub fn render_receipt(&self) -> Result<String, CheckoutError> {
        let invoice = self
            .invoice_handoff
            .take()
            .ok_or(CheckoutError::NoPendingReceipt)?;

        let meta = InvoiceMetadata::generate(Utc::now());
        Ok(render(&invoice, &meta, &self.config))
    }
}

// =============================================================================
// Receipt Rendering
// =============================================================================

const RULE: &str = "------------------------------------------------";

/// Formats the tax-invoice text block.
fn render(invoice: &Invoice, meta: &InvoiceMetadata, config: &PricingConfig) -> String {
    // Same engine, same items, same figures as checkout
    let summary = invoice.breakdown(config);

    let mut out = String::new();
    out.push_str(&format!("{:^48}\n", STORE.name));
    out.push_str(&format!("{:^48}\n", STORE.address));
    out.push_str(&format!("{:^48}\n", format!("GSTIN: {}", STORE.gstin)));
    out.push_str(&format!(
        "{:^48}\n",
        format!("{} | {}", STORE.phone, STORE.email)
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{:^48}\n", "TAX INVOICE"));
    out.push_str(&format!(
        "Invoice: {}    Date: {}  {}\n",
        meta.number, meta.date, meta.time
    ));
    out.push_str(&format!(
        "Customer: {} ({})\n",
        CUSTOMER.name, CUSTOMER.loyalty_id
    ));
    out.push_str(RULE);
    out.push('\n');

    for line in &summary.lines {
        out.push_str(&format!("{}\n", line.name));
        out.push_str(&format!(
            "  {} x {}  =  {}\n",
            line.quantity, line.unit_price, line.item_total
        ));
        out.push_str(&format!(
            "  Disc {}   GST {}% = {}  (CGST {} + SGST {})\n",
            line.discount,
            line.tax_rate_bps / 100,
            line.tax,
            line.cgst,
            line.sgst
        ));
    }

    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{:<32}{:>16}\n", "Subtotal", summary.subtotal.to_string()));
    out.push_str(&format!(
        "{:<32}{:>16}\n",
        "Discount",
        format!("-{}", summary.total_discount)
    ));
    out.push_str(&format!("{:<32}{:>16}\n", "Total GST", summary.total_tax.to_string()));
    out.push_str(&format!(
        "{:<32}{:>16}\n",
        "Round Off",
        summary.round_off.to_string()
    ));
    out.push_str(&format!("{:<32}{:>16}\n", "PAYABLE", summary.payable.to_string()));
    out.push_str(&format!("Paid via: {}\n", invoice.payment_mode.label()));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{:^48}\n", "Thank you for shopping with SmartCart!"));
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use smartcart_core::{Money, Product, TagTable};

    fn loaded_cart() -> SharedCart {
        let cart = SharedCart::new();
        let tags = TagTable::builtin();
        cart.with_cart_mut(|c| {
            c.add_or_increment(tags.resolve("B3:D7:F0:30").unwrap(), 2); // MAGGI x2
        });
        cart
    }

    #[test]
    fn test_empty_cart_rejected_without_state_change() {
        let flow = CheckoutFlow::default();
        let cart = SharedCart::new();

        let err = flow.begin_checkout(&cart).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cart is empty. Please add items before proceeding to checkout."
        );
        assert!(flow.confirm_payment(PaymentMode::Upi).is_err());
    }

    #[test]
    fn test_full_flow_renders_checkout_figures() {
        let flow = CheckoutFlow::default();
        let cart = loaded_cart();

        flow.begin_checkout(&cart).unwrap();
        flow.confirm_payment(PaymentMode::Upi).unwrap();
        let receipt = flow.render_receipt().unwrap();

        // MAGGI 14.00 x2: total 28.00, tax 1.33, payable 28, round off +0.07
        assert!(receipt.contains("MAGGI 2-Minute Instant Noodles"));
        assert!(receipt.contains(&Money::from_paise(2800).to_string()));
        assert!(receipt.contains(&Money::from_paise(133).to_string()));
        assert!(receipt.contains("Paid via: UPI"));
        assert!(receipt.contains("SCINV"));
    }

    #[test]
    fn test_receipt_renders_exactly_once() {
        let flow = CheckoutFlow::default();
        let cart = loaded_cart();

        flow.begin_checkout(&cart).unwrap();
        flow.confirm_payment(PaymentMode::Card).unwrap();

        assert!(flow.render_receipt().is_ok());
        assert!(matches!(
            flow.render_receipt(),
            Err(CheckoutError::NoPendingReceipt)
        ));
    }

    #[test]
    fn test_invoice_isolated_from_later_cart_edits() {
        let flow = CheckoutFlow::default();
        let cart = loaded_cart();

        flow.begin_checkout(&cart).unwrap();
        // Shopper keeps scanning after tapping Pay
        cart.with_cart_mut(|c| c.add_or_increment(Product::unknown("FFFFFFFF"), 1));

        flow.confirm_payment(PaymentMode::NetBanking).unwrap();
        let receipt = flow.render_receipt().unwrap();

        assert!(!receipt.contains("Unknown Product"));
    }

    #[test]
    fn test_confirm_without_begin_fails() {
        let flow = CheckoutFlow::default();
        assert!(matches!(
            flow.confirm_payment(PaymentMode::Upi),
            Err(CheckoutError::NoActiveCheckout)
        ));
    }
}
