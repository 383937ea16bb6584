//! # Scan Channel Configuration
//!
//! Configuration for the scanner connection.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variable (highest priority)                            │
//! │     SMARTCART_SCANNER_URL=ws://10.113.135.161:81/                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/smartcart/scanner.toml (Linux)                           │
//! │     ~/Library/Application Support/in.smartcart/scanner.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Built-in demo bridge address, 3s reconnect, 500ms debounce         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # scanner.toml
//! [scanner]
//! url = "ws://10.113.135.161:81/"
//! connect_timeout_secs = 10
//! reconnect_interval_secs = 3
//! debounce_window_ms = 500
//! debounce_capacity = 256
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ScanError, ScanResult};

/// Environment variable overriding the bridge endpoint.
pub const ENV_SCANNER_URL: &str = "SMARTCART_SCANNER_URL";

/// Default bridge endpoint (the demo ESP32 on the store LAN).
pub const DEFAULT_SCANNER_URL: &str = "ws://10.113.135.161:81/";

// =============================================================================
// Scan Configuration
// =============================================================================

/// Runtime configuration for the scan channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// WebSocket endpoint of the RFID bridge.
    pub url: String,

    /// Give up an individual connect attempt after this long.
    pub connect_timeout: Duration,

    /// Fixed wait between reconnection attempts. The bridge drops
    /// connections routinely (power-cycled shelf units), so the channel
    /// retries forever on this cadence.
    pub reconnect_interval: Duration,

    /// Suppress repeat (uid, action) events arriving within this window.
    /// One physical tap often produces several reads.
    pub debounce_window: Duration,

    /// Upper bound on tracked (uid, action) pairs before expired entries
    /// are pruned from the debounce table.
    pub debounce_capacity: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            url: DEFAULT_SCANNER_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            reconnect_interval: Duration::from_secs(3),
            debounce_window: Duration::from_millis(500),
            debounce_capacity: 256,
        }
    }
}

/// On-disk shape of scanner.toml.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    scanner: ScannerSection,
}

#[derive(Debug, Default, Deserialize)]
struct ScannerSection {
    url: Option<String>,
    connect_timeout_secs: Option<u64>,
    reconnect_interval_secs: Option<u64>,
    debounce_window_ms: Option<u64>,
    debounce_capacity: Option<usize>,
}

impl ScanConfig {
    /// Loads configuration: defaults, then the TOML file if present,
    /// then the environment override. Never fails - a broken file is
    /// logged and skipped so the app still starts with defaults.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        let mut config = ScanConfig::default();

        let path = path.or_else(default_config_path);
        if let Some(path) = path {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<ConfigFile>(&text) {
                    Ok(file) => {
                        debug!(path = %path.display(), "Loaded scanner config file");
                        config.apply_file(file);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), %e, "Ignoring malformed scanner config");
                    }
                },
                Err(_) => {
                    debug!(path = %path.display(), "No scanner config file, using defaults");
                }
            }
        }

        if let Ok(url) = std::env::var(ENV_SCANNER_URL) {
            if !url.trim().is_empty() {
                config.url = url;
            }
        }

        config
    }

    fn apply_file(&mut self, file: ConfigFile) {
        let s = file.scanner;
        if let Some(url) = s.url {
            self.url = url;
        }
        if let Some(secs) = s.connect_timeout_secs {
            self.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = s.reconnect_interval_secs {
            self.reconnect_interval = Duration::from_secs(secs);
        }
        if let Some(ms) = s.debounce_window_ms {
            self.debounce_window = Duration::from_millis(ms);
        }
        if let Some(cap) = s.debounce_capacity {
            self.debounce_capacity = cap.max(1);
        }
    }

    /// Validates the endpoint URL (scheme must be ws/wss).
    pub fn validate(&self) -> ScanResult<()> {
        let parsed = Url::parse(&self.url)
            .map_err(|e| ScanError::Config(format!("invalid scanner url {:?}: {}", self.url, e)))?;

        match parsed.scheme() {
            "ws" | "wss" => Ok(()),
            other => Err(ScanError::Config(format!(
                "scanner url must be ws:// or wss://, got {other}://"
            ))),
        }
    }
}

/// Platform config path: `<config dir>/smartcart/scanner.toml`.
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("in", "smartcart", "smartcart")
        .map(|dirs| dirs.config_dir().join("scanner.toml"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.url, DEFAULT_SCANNER_URL);
        assert_eq!(config.reconnect_interval, Duration::from_secs(3));
        assert_eq!(config.debounce_window, Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides() {
        let file: ConfigFile = toml::from_str(
            r#"
            [scanner]
            url = "ws://192.168.1.50:81/"
            reconnect_interval_secs = 5
            debounce_window_ms = 250
            "#,
        )
        .unwrap();

        let mut config = ScanConfig::default();
        config.apply_file(file);

        assert_eq!(config.url, "ws://192.168.1.50:81/");
        assert_eq!(config.reconnect_interval, Duration::from_secs(5));
        assert_eq!(config.debounce_window, Duration::from_millis(250));
        // Untouched keys keep their defaults
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_validate_rejects_non_ws_scheme() {
        let config = ScanConfig {
            url: "http://example.com/".to_string(),
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ScanConfig {
            url: "not a url".to_string(),
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
