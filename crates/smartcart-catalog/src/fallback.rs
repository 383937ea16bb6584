//! # Local Substitute Shelf
//!
//! The fixed product list shown when the catalog endpoint is
//! unreachable. Deliberately small and boring: four staples that make
//! the shelf look alive without pretending to be search results.

use smartcart_core::Product;

/// Returns the fixed substitute list used when catalog lookup fails.
pub fn fallback_products() -> Vec<Product> {
    [
        ("web-1", "Organic Milk", 499, "Dairy"),
        ("web-2", "Fresh Apples", 349, "Fruits"),
        ("web-3", "Coffee Beans", 1299, "Beverages"),
        ("web-4", "Cookies Pack", 599, "Snacks"),
    ]
    .into_iter()
    .map(|(id, name, price_paise, category)| Product {
        id: id.to_string(),
        name: name.to_string(),
        price_paise,
        category: category.to_string(),
        image: "📦".to_string(),
        description: None,
        seller: None,
        qty_label: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_are_priced_and_unique() {
        let products = fallback_products();
        assert_eq!(products.len(), 4);

        let mut ids: Vec<_> = products.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);

        assert!(products.iter().all(|p| p.price_paise > 0));
    }
}
