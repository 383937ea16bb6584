//! # Tag Resolution Table
//!
//! Static mapping from a physical RFID tag identifier to product
//! metadata. Populated once at startup, read-only afterwards.
//!
//! ## UID Normalization
//! Hardware reports UIDs with mixed case and colon separators
//! ("d3:d4:54:fb"). Every lookup and comparison uses the normalized
//! form: uppercase, separators stripped ("D3D454FB"). Normalization is
//! the *first* thing done to any inbound uid; nothing downstream ever
//! sees a raw one.

use std::collections::HashMap;

use crate::money::Money;
use crate::product::Product;

// =============================================================================
// UID Normalization
// =============================================================================

/// Normalizes a raw tag identifier: uppercase, separators stripped.
///
/// Keeps ASCII alphanumerics only, so colons, dashes and whitespace all
/// disappear regardless of which firmware formatted the uid.
///
/// ## Example
/// ```rust
/// use smartcart_core::tags::normalize_uid;
///
/// assert_eq!(normalize_uid("d3:d4:54:fb"), "D3D454FB");
/// assert_eq!(normalize_uid("D3-D4-54-FB"), "D3D454FB");
/// assert_eq!(normalize_uid("D3D454FB"), "D3D454FB");
/// ```
pub fn normalize_uid(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// =============================================================================
// Tag Record
// =============================================================================

/// Static metadata stored against a tag uid.
///
/// Prices are kept as strings exactly as entered by whoever programmed
/// the tags; [`TagTable::resolve`] parses them leniently.
#[derive(Debug, Clone)]
pub struct TagRecord {
    pub name: &'static str,
    pub img: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub qty: &'static str,
    pub seller: &'static str,
}

// =============================================================================
// Tag Table
// =============================================================================

/// Immutable uid → metadata table.
///
/// Built once at process start; an absent key is a defined branch
/// (the caller falls back to [`Product::unknown`]), not an error.
#[derive(Debug, Clone)]
pub struct TagTable {
    entries: HashMap<String, TagRecord>,
}

impl TagTable {
    /// Builds a table from (uid, record) pairs. Uids are normalized on
    /// insertion so callers may pass either form.
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, TagRecord)>,
    {
        let entries = records
            .into_iter()
            .map(|(uid, rec)| (normalize_uid(uid), rec))
            .collect();
        TagTable { entries }
    }

    /// The demo store's eight programmed tags.
    pub fn builtin() -> Self {
        TagTable::new([
            (
                "D3:D4:54:FB",
                TagRecord {
                    name: "iPhone 12",
                    img: "https://pub-520691edc5cf45b79c26de5e1a3c9c78.r2.dev/images/iphone-12-green-1-removebg-preview.png",
                    description: "DYNAMIC ISLAND COMES TO IPHONE 12. INNOVATIVE DESIGN. 48MP MAIN CAMERA.",
                    price: "40000",
                    qty: "1",
                    seller: "Dhananjai",
                },
            ),
            (
                "A3:B4:49:FB",
                TagRecord {
                    name: "Fire-Boltt Brillia Smart Watch",
                    img: "https://m.media-amazon.com/images/I/71ubhSeYD0L._AC_UY436_FMwebp_QL65_.jpg",
                    description: "2.02\u{201d} AMOLED DISPLAY, 120+ Sports Modes, Bluetooth Calling.",
                    price: "2000",
                    qty: "1",
                    seller: "Simra",
                },
            ),
            (
                "E3:53:23:31",
                TagRecord {
                    name: "Multi-Grain Bread",
                    img: "🥖",
                    description: "Freshly baked gluten-free bread, vegan, super soft, rich in Magnesium. 300g.",
                    price: "50",
                    qty: "300g",
                    seller: "Rachi Bakers",
                },
            ),
            (
                "B3:D7:F0:30",
                TagRecord {
                    name: "MAGGI 2-Minute Instant Noodles",
                    img: "https://m.media-amazon.com/images/I/812ujEPZcML._AC_UL640_FMwebp_QL65_.jpg",
                    description: "Relish your favorite masala taste with MAGGI 2-Minute Instant Noodles.",
                    price: "14",
                    qty: "1",
                    seller: "Shivi",
                },
            ),
            (
                "07:6B:BA:03",
                TagRecord {
                    name: "CookieMan Choco Chunk Cookies",
                    img: "https://m.media-amazon.com/images/I/71K8GzRUcXL._SX679_.jpg",
                    description: "Rich & chewy Australian chocolate chunk cookies.",
                    price: "700",
                    qty: "1 box",
                    seller: "Rachi Baker",
                },
            ),
            (
                "1A:79:BB:03",
                TagRecord {
                    name: "Alpenliebe Butter Toffee (40 pieces)",
                    img: "https://m.media-amazon.com/images/I/519h1Jro5wL._AC_UL640_FMwebp_QL65_.jpg",
                    description: "Butter flavour, 40 pieces, vegetarian. Price is ₹2 per piece.",
                    price: "2",
                    qty: "40 pieces",
                    seller: "Shivi",
                },
            ),
            (
                "53:16:3D:FB",
                TagRecord {
                    name: "Amul School Pack Butter Chips (100 pcs)",
                    img: "https://encrypted-tbn1.gstatic.com/shopping?q=tbn:ANd9GcR7a5Tz_4SK3I-03kgTqfJlXC0sJV3THtRkRxAvCWdXmLHxu-2HZkyuH5eOJezlYiCncrTMm5a5WG20UBB1GY3rUuDRWu7F0g",
                    description: "Salted butter chiplets. Perfect portion packs. 100 count.",
                    price: "46",
                    qty: "1 pack",
                    seller: "Rachi Baker",
                },
            ),
            (
                "73:F2:50:FB",
                TagRecord {
                    name: "Cadbury Dairy Milk Silk 60g",
                    img: "https://m.media-amazon.com/images/I/71w7ppkACUL._AC_UL640_FMwebp_QL65_.jpg",
                    description: "Smooth, creamy chocolate bar. Made with sustainable cocoa. 60g.",
                    price: "100",
                    qty: "1",
                    seller: "Rachi Baker",
                },
            ),
        ])
    }

    /// Resolves a uid into a full Product, or None if the tag is unknown.
    ///
    /// The stored price string is parsed leniently; an unparseable price
    /// yields a zero-price product rather than a failure.
    pub fn resolve(&self, uid: &str) -> Option<Product> {
        let normalized = normalize_uid(uid);
        self.entries.get(&normalized).map(|rec| Product {
            id: normalized.clone(),
            name: rec.name.to_string(),
            price_paise: Money::parse_price_str(rec.price).paise(),
            category: "RFID Scan".to_string(),
            image: if rec.img.is_empty() {
                "📦".to_string()
            } else {
                rec.img.to_string()
            },
            description: Some(rec.description.to_string()),
            seller: Some(rec.seller.to_string()),
            qty_label: Some(rec.qty.to_string()),
        })
    }

    /// Number of programmed tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no tags are programmed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uid() {
        assert_eq!(normalize_uid("d3:d4:54:fb"), "D3D454FB");
        assert_eq!(normalize_uid("D3D454FB"), "D3D454FB");
        assert_eq!(normalize_uid("b3-d7-f0-30"), "B3D7F030");
        assert_eq!(normalize_uid(" 07 6b ba 03 "), "076BBA03");
        assert_eq!(normalize_uid(""), "");
    }

    #[test]
    fn test_builtin_table_size() {
        let table = TagTable::builtin();
        assert_eq!(table.len(), 8);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_resolve_known_tag_any_uid_form() {
        let table = TagTable::builtin();

        let from_raw = table.resolve("d3:d4:54:fb").unwrap();
        let from_normalized = table.resolve("D3D454FB").unwrap();

        assert_eq!(from_raw, from_normalized);
        assert_eq!(from_raw.name, "iPhone 12");
        assert_eq!(from_raw.id, "D3D454FB");
        assert_eq!(from_raw.price_paise, 4_000_000); // ₹40000.00
        assert_eq!(from_raw.category, "RFID Scan");
    }

    #[test]
    fn test_resolve_parses_price_strings() {
        let table = TagTable::builtin();

        let maggi = table.resolve("B3:D7:F0:30").unwrap();
        assert_eq!(maggi.price_paise, 1400); // ₹14.00

        let toffee = table.resolve("1A:79:BB:03").unwrap();
        assert_eq!(toffee.price_paise, 200); // ₹2.00 per piece
    }

    #[test]
    fn test_resolve_unknown_tag() {
        let table = TagTable::builtin();
        assert!(table.resolve("FF:FF:FF:FF").is_none());
    }
}
