//! # Catalog Search Client
//!
//! Thin reqwest wrapper over the public demo search endpoint. The
//! endpoint prices in whole rupees with a fractional part; conversion to
//! paise happens here so nothing downstream ever sees a float price.

use serde::Deserialize;
use tracing::{debug, warn};

use smartcart_core::{Money, Product};

use crate::error::{CatalogError, CatalogResult};
use crate::fallback::fallback_products;

/// Default search endpoint (the public demo catalog).
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com";

/// How many hits to keep from one search. The shelf shows a single row.
const MAX_HITS: usize = 8;

// =============================================================================
// Wire Types
// =============================================================================

/// Top-level search response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    products: Vec<SearchHit>,
}

/// One product hit as the endpoint returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub title: String,
    /// Rupees with a fractional part, as the endpoint prices things.
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
}

impl From<SearchHit> for Product {
    fn from(hit: SearchHit) -> Self {
        Product {
            id: hit.id.to_string(),
            name: hit.title,
            // Round once at the boundary; everything after is integer paise
            price_paise: Money::from_paise((hit.price * 100.0).round() as i64).paise(),
            category: hit.category,
            image: hit.thumbnail,
            description: hit.description,
            seller: None,
            qty_label: None,
        }
    }
}

// =============================================================================
// Catalog Client
// =============================================================================

/// HTTP client for the product-search endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        CatalogClient::new(DEFAULT_CATALOG_URL)
    }
}

impl CatalogClient {
    /// Creates a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Searches the catalog. Errors on any transport/decode problem or
    /// an empty result set.
    pub async fn search(&self, query: &str) -> CatalogResult<Vec<Product>> {
        let url = format!("{}/products/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        debug!(query, hits = body.products.len(), "Catalog search complete");

        if body.products.is_empty() {
            return Err(CatalogError::Empty(query.to_string()));
        }

        Ok(body
            .products
            .into_iter()
            .take(MAX_HITS)
            .map(Product::from)
            .collect())
    }

    /// Searches the catalog, substituting the fixed local list on any
    /// failure. The shelf always has something on it.
    pub async fn search_or_fallback(&self, query: &str) -> Vec<Product> {
        match self.search(query).await {
            Ok(products) => products,
            Err(e) => {
                warn!(query, %e, "Catalog lookup failed, using local substitutes");
                fallback_products()
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
