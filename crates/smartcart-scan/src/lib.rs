//! # smartcart-scan: RFID Scan Event Channel
//!
//! Consumes the asynchronous event stream from the shelf-edge RFID bridge
//! and translates it into cart operations, tolerating an unreliable
//! transport.
//!
//! ## Event Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scan Event Pipeline                              │
//! │                                                                         │
//! │  RFID bridge (hardware)                                                │
//! │        │  ws frame: {"uid":"d3:d4:54:fb","action":"add","time":"..."}  │
//! │        ▼                                                                │
//! │  ScanChannel ── parse ──► normalize uid ──► Debouncer ──► Dispatcher   │
//! │   │    │                                     (500ms per                │
//! │   │    └─ "Hello..." greeting: dropped       uid+action)    │          │
//! │   │       silently; other junk: warned                      ▼          │
//! │   │                                                    SharedCart      │
//! │   └─ transport error/close ──► Disconnected ──► retry every 3s         │
//! │                                                  (cancelled on          │
//! │                                                   shutdown)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`channel`] - WebSocket client task with fixed-interval reconnect
//! - [`config`] - Endpoint and tuning configuration (TOML + env)
//! - [`debounce`] - Duplicate-read suppression, bounded side table
//! - [`dispatch`] - Applies accepted events to the shared cart
//! - [`protocol`] - Wire message types
//! - [`error`] - Channel error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use smartcart_core::{SharedCart, TagTable};
//! use smartcart_scan::{ScanChannel, ScanConfig};
//!
//! let config = ScanConfig::load_or_default(None);
//! let cart = SharedCart::new();
//! let handle = ScanChannel::spawn(config, TagTable::builtin(), cart.clone());
//!
//! // ... later, on shutdown:
//! handle.shutdown().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod channel;
pub mod config;
pub mod debounce;
pub mod dispatch;
pub mod error;
pub mod protocol;

// =============================================================================
// Re-exports
// =============================================================================

pub use channel::{ConnectionState, ScanChannel, ScanHandle};
pub use config::ScanConfig;
pub use debounce::Debouncer;
pub use dispatch::Applied;
pub use error::{ScanError, ScanResult};
pub use protocol::{ScanAction, ScanEvent};
