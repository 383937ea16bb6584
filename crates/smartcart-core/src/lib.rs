//! # smartcart-core: Pure Business Logic for SmartCart
//!
//! This crate is the **heart** of SmartCart. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SmartCart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront UI (external)                       │   │
//! │  │    Catalog Grid ──► Cart Drawer ──► Payment ──► Receipt         │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────┐   ┌───────────────▼───────────────┐   │
//! │  │      smartcart-scan         │   │      smartcart-catalog        │   │
//! │  │  RFID WebSocket channel     │   │  Product search client        │   │
//! │  └──────────────┬──────────────┘   └───────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────────────────────▼───────────────┐   │
//! │  │               ★ smartcart-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────┐ ┌───────┐ │   │
//! │  │   │  money   │ │   cart   │ │ pricing  │ │  tags   │ │invoice│ │   │
//! │  │   │  Money   │ │   Cart   │ │ GST calc │ │TagTable │ │Invoice│ │   │
//! │  │   │ TaxRate  │ │CartEntry │ │ RoundOff │ │ resolve │ │finalze│ │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └─────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`product`] - Product record and payment modes
//! - [`tags`] - Static tag-uid → product resolution table
//! - [`cart`] - Authoritative cart store with race-free mutation
//! - [`pricing`] - Pure subtotal/discount/GST/round-off computation
//! - [`invoice`] - Checkout finalization into an immutable invoice
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, hardware access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Single Cart Owner**: every mutation goes through [`cart::Cart`] operations;
//!    nothing mutates entries from outside
//!
//! ## Example Usage
//!
//! ```rust
//! use smartcart_core::money::{Money, TaxRate};
//!
//! // Create money from paise (never from floats!)
//! let price = Money::from_paise(4_000_000); // ₹40000.00
//!
//! // 18% GST on the discounted (taxable) amount
//! let taxable = price - price.apply_rate(TaxRate::from_bps(500));
//! let tax = taxable.apply_rate(TaxRate::from_bps(1800));
//! assert_eq!(tax.paise(), 684_000); // ₹6840.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod invoice;
pub mod money;
pub mod pricing;
pub mod product;
pub mod tags;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use smartcart_core::Money` instead of
// `use smartcart_core::money::Money`

pub use cart::{Cart, CartEntry, CartTotals, SharedCart};
pub use error::{CoreError, CoreResult};
pub use invoice::{Invoice, InvoiceMetadata};
pub use money::{DiscountRate, Money, TaxRate};
pub use pricing::{LineBreakdown, LineItem, PricingConfig, PricingSummary, TaxTable};
pub use product::{PaymentMode, Product};
pub use tags::{normalize_uid, TagRecord, TagTable};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat storewide discount applied to every line item: 5%.
///
/// ## Why a constant?
/// The demo storefront runs a single fixed promotion. Per-product or
/// per-tenant discounts would move this into [`pricing::PricingConfig`]
/// construction, which already takes the rate as data.
pub const DEFAULT_DISCOUNT_BPS: u32 = 500;

/// GST rate used when a product name has no entry in the tax table: 18%.
pub const DEFAULT_TAX_BPS: u32 = 1800;
