//! # Scan Event Dispatch
//!
//! The last stage of the pipeline: an accepted (debounced) event becomes
//! a cart mutation. This is the only place the scan crate touches the
//! cart, and every outcome is logged with the uid so a misbehaving shelf
//! unit can be traced from the kiosk logs.
//!
//! Dispatch never fails. An unknown tag on `add` still lands in the cart
//! as a zero-price placeholder the shopper can see and remove; a `remove`
//! for something not in the cart is a logged no-op.

use tracing::{info, warn};

use smartcart_core::{Product, SharedCart, TagTable};

use crate::protocol::{ScanAction, ScanEvent};

// =============================================================================
// Dispatch Outcome
// =============================================================================

/// What a dispatched event did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Item added or its quantity incremented.
    Added { id: String, name: String, quantity: i64 },
    /// Quantity decremented (and the line removed if it hit zero).
    Removed { id: String, remaining: i64 },
    /// Remove event for an id not in the cart. No-op.
    NotInCart { id: String },
}

// =============================================================================
// Dispatch
// =============================================================================

/// Applies one accepted scan event to the shared cart.
pub fn apply(event: &ScanEvent, tags: &TagTable, cart: &SharedCart) -> Applied {
    match event.action {
        ScanAction::Add => {
            let product = match tags.resolve(&event.uid) {
                Some(product) => product,
                None => {
                    warn!(uid = %event.uid, "Unknown tag scanned, adding placeholder");
                    Product::unknown(&event.uid)
                }
            };

            let (id, name) = (product.id.clone(), product.name.clone());
            let quantity = cart.with_cart_mut(|c| {
                c.add_or_increment(product, 1);
                c.quantity_of(&id)
            });

            info!(uid = %event.uid, %name, quantity, "Scan add applied");
            Applied::Added { id, name, quantity }
        }

        ScanAction::Remove => {
            let id = event.uid.clone();
            let outcome = cart.with_cart_mut(|c| {
                if c.quantity_of(&id) == 0 {
                    None
                } else {
                    c.adjust_quantity(&id, -1);
                    Some(c.quantity_of(&id))
                }
            });

            match outcome {
                Some(remaining) => {
                    info!(uid = %event.uid, remaining, "Scan remove applied");
                    Applied::Removed { id, remaining }
                }
                None => {
                    info!(uid = %event.uid, "Remove for item not in cart, ignoring");
                    Applied::NotInCart { id }
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn event(uid: &str, action: ScanAction) -> ScanEvent {
        ScanEvent {
            uid: uid.to_string(),
            action,
            time: String::new(),
        }
    }

    #[test]
    fn test_add_known_tag() {
        let tags = TagTable::builtin();
        let cart = SharedCart::new();

        let applied = apply(&event("D3D454FB", ScanAction::Add), &tags, &cart);

        assert_eq!(
            applied,
            Applied::Added {
                id: "D3D454FB".to_string(),
                name: "iPhone 12".to_string(),
                quantity: 1,
            }
        );
        assert_eq!(cart.with_cart(|c| c.total_item_count()), 1);
    }

    #[test]
    fn test_add_twice_increments() {
        let tags = TagTable::builtin();
        let cart = SharedCart::new();

        apply(&event("B3D7F030", ScanAction::Add), &tags, &cart);
        let applied = apply(&event("B3D7F030", ScanAction::Add), &tags, &cart);

        match applied {
            Applied::Added { quantity, .. } => assert_eq!(quantity, 2),
            other => panic!("expected Added, got {other:?}"),
        }
        // One line, quantity 2
        assert_eq!(cart.with_cart(|c| c.entries().len()), 1);
    }

    #[test]
    fn test_add_unknown_tag_inserts_placeholder() {
        let tags = TagTable::builtin();
        let cart = SharedCart::new();

        let applied = apply(&event("FFFFFFFF", ScanAction::Add), &tags, &cart);

        match applied {
            Applied::Added { name, .. } => assert_eq!(name, "Unknown Product"),
            other => panic!("expected Added, got {other:?}"),
        }
        assert!(cart.with_cart(|c| c.total_price().is_zero()));
    }

    #[test]
    fn test_remove_decrements_and_drops_at_zero() {
        let tags = TagTable::builtin();
        let cart = SharedCart::new();

        apply(&event("53163DFB", ScanAction::Add), &tags, &cart);
        apply(&event("53163DFB", ScanAction::Add), &tags, &cart);

        let applied = apply(&event("53163DFB", ScanAction::Remove), &tags, &cart);
        assert_eq!(
            applied,
            Applied::Removed { id: "53163DFB".to_string(), remaining: 1 }
        );

        let applied = apply(&event("53163DFB", ScanAction::Remove), &tags, &cart);
        assert_eq!(
            applied,
            Applied::Removed { id: "53163DFB".to_string(), remaining: 0 }
        );
        assert!(cart.with_cart(|c| c.is_empty()));
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let tags = TagTable::builtin();
        let cart = SharedCart::new();

        let applied = apply(&event("53163DFB", ScanAction::Remove), &tags, &cart);
        assert_eq!(applied, Applied::NotInCart { id: "53163DFB".to_string() });
        assert!(cart.with_cart(|c| c.is_empty()));
    }
}
