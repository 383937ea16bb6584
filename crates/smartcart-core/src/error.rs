//! # Error Types
//!
//! Domain errors for smartcart-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each variant maps to a user-facing message
//!
//! Deliberately small: the cart path has a "never crash the cart" policy.
//! Unknown tags degrade to placeholder entries, absent-id mutations are
//! no-ops, transport failures drive the reconnect loop, bad price strings
//! parse to zero. The one hard precondition left is checkout on an empty
//! cart.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was confirmed with nothing in the cart.
    ///
    /// ## When This Occurs
    /// - The pay button raced a remove scan that emptied the cart
    /// - Direct navigation to the payment screen with no items
    ///
    /// Rejected with a user-facing message, no state change, not logged
    /// as an error.
    #[error("Cart is empty. Please add items before proceeding to checkout.")]
    EmptyCart,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
