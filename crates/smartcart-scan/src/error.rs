//! # Scan Channel Errors
//!
//! Errors in this crate never surface as fatal failures to the shopper:
//! transport problems drive the reconnect loop and show up only as a
//! connection-status indicator. The types exist so the channel task and
//! its tests can reason about *why* a connection attempt ended.

use thiserror::Error;

// =============================================================================
// Scan Error
// =============================================================================

/// Errors from the scan event channel.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Underlying WebSocket/transport failure.
    #[error("Transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// Connection attempt did not complete within the configured timeout.
    #[error("Connection timed out after {0} seconds")]
    ConnectTimeout(u64),

    /// Internal channel failure (receiver dropped, etc.).
    #[error("Channel error: {0}")]
    Channel(String),

    /// Configuration problem (bad endpoint URL, unreadable file).
    #[error("Configuration error: {0}")]
    Config(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ScanError.
pub type ScanResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScanError::ConnectTimeout(10).to_string(),
            "Connection timed out after 10 seconds"
        );
        assert_eq!(
            ScanError::Config("invalid url".into()).to_string(),
            "Configuration error: invalid url"
        );
    }
}
