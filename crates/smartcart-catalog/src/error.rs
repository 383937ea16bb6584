//! # Catalog Errors
//!
//! Only [`CatalogClient::search`](crate::CatalogClient::search) surfaces
//! these; the `search_or_fallback` path swallows them after logging.

use thiserror::Error;

/// Errors from the catalog search client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failure (DNS, timeout, TLS, non-2xx status).
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("Catalog response malformed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The endpoint answered but returned no products for the query.
    #[error("Catalog returned no products for query {0:?}")]
    Empty(String),
}

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;
