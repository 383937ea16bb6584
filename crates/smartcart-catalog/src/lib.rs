//! # smartcart-catalog: Product Search Client
//!
//! Fills the storefront's browse shelves from a public product-search
//! endpoint, degrading to a fixed local substitute list when the network
//! is down.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Lookup Flow                               │
//! │                                                                         │
//! │  search_or_fallback("iphone")                                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  GET {base}/products/search?q=iphone                                   │
//! │        │                                                                │
//! │   ┌────┴─────┐                                                         │
//! │   ▼          ▼                                                          │
//! │  2xx +     anything else (timeout, 5xx, bad JSON, empty result)        │
//! │  hits        │                                                          │
//! │   │          ▼                                                          │
//! │   │     fallback_products()  ← fixed substitute list, never fails      │
//! │   ▼                                                                     │
//! │  Vec<Product>                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod error;
pub mod fallback;

pub use client::{CatalogClient, SearchHit, DEFAULT_CATALOG_URL};
pub use error::{CatalogError, CatalogResult};
pub use fallback::fallback_products;
