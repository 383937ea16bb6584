//! # Scan Wire Protocol
//!
//! Message types for the RFID bridge feed.
//!
//! ## Wire Format (JSON)
//! ```json
//! { "uid": "d3:d4:54:fb", "action": "add", "time": "14:05:22" }
//! ```
//!
//! `uid` arrives with mixed case and colon separators; it is normalized
//! (uppercase, separators stripped) before any lookup or comparison.
//! `time` is a display label from the bridge clock, carried through
//! untouched and never parsed.
//!
//! The bridge firmware also sends a plain-text greeting on connect
//! ("Hello from SmartCart scanner"). That frame is not JSON and is
//! dropped without even a warning; any *other* unparseable frame is
//! dropped with one.

use serde::{Deserialize, Serialize};
use std::fmt;

use smartcart_core::tags::normalize_uid;

// =============================================================================
// Scan Action
// =============================================================================

/// What the shopper did with the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanAction {
    /// Tag placed in the basket.
    Add,
    /// Tag taken out of the basket.
    Remove,
}

impl fmt::Display for ScanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanAction::Add => write!(f, "add"),
            ScanAction::Remove => write!(f, "remove"),
        }
    }
}

// =============================================================================
// Scan Event
// =============================================================================

/// One inbound scan event, uid already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawScanEvent")]
pub struct ScanEvent {
    /// Normalized tag identifier (uppercase, no separators).
    pub uid: String,

    /// Add or remove.
    pub action: ScanAction,

    /// Bridge-side timestamp label. Display only.
    pub time: String,
}

/// The uid as it appears on the wire, before normalization.
#[derive(Debug, Deserialize)]
struct RawScanEvent {
    uid: String,
    action: ScanAction,
    #[serde(default)]
    time: String,
}

impl From<RawScanEvent> for ScanEvent {
    fn from(raw: RawScanEvent) -> Self {
        ScanEvent {
            uid: normalize_uid(&raw.uid),
            action: raw.action,
            time: raw.time,
        }
    }
}

impl ScanEvent {
    /// Parses a text frame into an event. Normalization happens inside
    /// deserialization, so no caller can observe a raw uid.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// True for the bridge's plain-text greeting frame, which is expected
/// noise and dropped silently.
pub fn is_handshake(text: &str) -> bool {
    text.starts_with("Hello")
}

// =============================================================================
// Unit Tests
// =============================================================================
