//! # Scan Channel
//!
//! WebSocket client task for the RFID bridge, with automatic reconnection.
//!
//! ## Connection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scan Channel Connection States                       │
//! │                                                                         │
//! │  ┌────────────┐    connect()    ┌────────────┐                         │
//! │  │Disconnected│ ──────────────► │ Connecting │                         │
//! │  └────────────┘                 └─────┬──────┘                         │
//! │        ▲                              │                                 │
//! │        │                    success   │   failure                       │
//! │        │                        ┌─────┴─────┐                          │
//! │        │                        ▼           ▼                           │
//! │        │              ┌────────────┐        │                           │
//! │        │              │ Connected  │        │                           │
//! │        │              └─────┬──────┘        │                           │
//! │        │                    │               │                           │
//! │        │              disconnect/error      │                           │
//! │        │                    │               │                           │
//! │        │                    ▼               ▼                           │
//! │        └────────────── fixed wait (reconnect_interval, default 3s)     │
//! │                         cancelled immediately by shutdown               │
//! │                                                                         │
//! │  The bridge is flaky by nature (battery shelf units, store Wi-Fi), so  │
//! │  the channel retries forever on a fixed cadence. No backoff growth:    │
//! │  a shopper standing at the shelf should never wait a minute for the    │
//! │  reader to come back.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The channel is receive-only. The bridge never expects frames from us
//! beyond pong replies.

use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, RwLock};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use smartcart_core::{SharedCart, TagTable};

use crate::config::ScanConfig;
use crate::debounce::Debouncer;
use crate::dispatch;
use crate::error::{ScanError, ScanResult};
use crate::protocol::{is_handshake, ScanEvent};

// =============================================================================
// Connection State
// =============================================================================

/// Connection state of the scan channel, surfaced as a status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected (includes waiting between retries).
    Disconnected,
    /// Connection attempt in flight.
    Connecting,
    /// Connected; scan events are live.
    Connected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
        }
    }
}

// =============================================================================
// Channel Handle
// =============================================================================

/// Handle for observing and stopping the scan channel task.
#[derive(Clone)]
pub struct ScanHandle {
    /// Current connection state.
    state: Arc<RwLock<ConnectionState>>,

    /// Shutdown signal.
    shutdown_tx: mpsc::Sender<()>,
}

impl ScanHandle {
    /// Returns the current connection state.
    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Returns true if the bridge is currently connected.
    pub async fn is_connected(&self) -> bool {
        *self.state.read().await == ConnectionState::Connected
    }

    /// Triggers graceful shutdown of the channel task.
    pub async fn shutdown(&self) -> ScanResult<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| ScanError::Channel("Failed to send shutdown signal".into()))
    }
}

// =============================================================================
// Scan Channel
// =============================================================================

/// WebSocket client for the RFID bridge.
///
/// ## Usage
/// ```rust,ignore
/// let config = ScanConfig::load_or_default(None);
/// let cart = SharedCart::new();
/// let handle = ScanChannel::spawn(config, TagTable::builtin(), cart.clone());
///
/// // ... later:
/// handle.shutdown().await?;
/// ```
pub struct ScanChannel {
    config: ScanConfig,
    tags: TagTable,
    cart: SharedCart,
    debouncer: Debouncer,
    state: Arc<RwLock<ConnectionState>>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl ScanChannel {
    /// Creates the channel and spawns its background task.
    pub fn spawn(config: ScanConfig, tags: TagTable, cart: SharedCart) -> ScanHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let state = Arc::new(RwLock::new(ConnectionState::Disconnected));

        let channel = ScanChannel {
            debouncer: Debouncer::new(config.debounce_window, config.debounce_capacity),
            config,
            tags,
            cart,
            state: state.clone(),
            shutdown_rx,
        };

        tokio::spawn(channel.run());

        ScanHandle { state, shutdown_tx }
    }

    /// Main channel loop: connect, drain, wait, repeat.
    async fn run(mut self) {
        info!(url = %self.config.url, "Scan channel starting");

        loop {
            if self.shutdown_rx.try_recv().is_ok() {
                info!("Scan channel received shutdown signal");
                break;
            }

            *self.state.write().await = ConnectionState::Connecting;

            match self.connect_with_timeout().await {
                Ok(ws_stream) => {
                    info!("Scanner bridge connected");
                    *self.state.write().await = ConnectionState::Connected;

                    match self.connection_loop(ws_stream).await {
                        Ok(()) => {
                            info!("Scan channel stopping");
                            break;
                        }
                        Err(e) => {
                            warn!(?e, "Scanner connection lost");
                        }
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to connect to scanner bridge");
                }
            }

            *self.state.write().await = ConnectionState::Disconnected;

            // Fixed wait before the next attempt, cancellable by shutdown
            debug!(interval = ?self.config.reconnect_interval, "Waiting before reconnect");
            tokio::select! {
                _ = tokio::time::sleep(self.config.reconnect_interval) => {}
                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown during reconnect wait");
                    break;
                }
            }
        }

        *self.state.write().await = ConnectionState::Disconnected;
        info!("Scan channel stopped");
    }

    /// Connects with timeout.
    async fn connect_with_timeout(
        &self,
    ) -> ScanResult<WebSocketStream<MaybeTlsStream<TcpStream>>> {
        let connect_future = connect_async(&self.config.url);

        match timeout(self.config.connect_timeout, connect_future).await {
            Ok(Ok((ws_stream, response))) => {
                debug!(status = ?response.status(), "WebSocket handshake complete");
                Ok(ws_stream)
            }
            Ok(Err(e)) => Err(ScanError::from(e)),
            Err(_) => Err(ScanError::ConnectTimeout(
                self.config.connect_timeout.as_secs(),
            )),
        }
    }

    /// Drains one live connection. Returns Ok(()) only on shutdown or a
    /// server close frame followed by shutdown; any transport error
    /// returns Err and re-enters the reconnect loop.
    async fn connection_loop(
        &mut self,
        ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    ) -> ScanResult<()> {
        let (mut write, mut read) = ws_stream.split();

        loop {
            tokio::select! {
                Some(result) = read.next() => {
                    match result {
                        Ok(WsMessage::Text(text)) => {
                            self.handle_frame(&text);
                        }
                        Ok(WsMessage::Ping(data)) => {
                            write.send(WsMessage::Pong(data)).await?;
                        }
                        Ok(WsMessage::Pong(_)) => {
                            debug!("Received pong");
                        }
                        Ok(WsMessage::Close(frame)) => {
                            info!(?frame, "Scanner sent close frame");
                            return Err(ScanError::Channel("Connection closed by bridge".into()));
                        }
                        Ok(WsMessage::Binary(_)) => {
                            warn!("Unexpected binary frame from scanner");
                        }
                        Ok(WsMessage::Frame(_)) => {
                            // Raw frame, ignore
                        }
                        Err(e) => {
                            error!(?e, "WebSocket error");
                            return Err(ScanError::from(e));
                        }
                    }
                }

                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown signal received, closing connection");
                    let _ = write.send(WsMessage::Close(None)).await;
                    return Ok(());
                }

                else => {
                    return Err(ScanError::Channel("Scanner stream ended".into()));
                }
            }
        }
    }

    /// Parses, debounces, and dispatches one text frame.
    fn handle_frame(&mut self, text: &str) {
        if is_handshake(text) {
            debug!("Scanner greeting received");
            return;
        }

        let event = match ScanEvent::from_json(text) {
            Ok(event) => event,
            Err(e) => {
                warn!(%e, frame = %text, "Dropping malformed scan frame");
                return;
            }
        };

        if !self.debouncer.accept(&event.uid, event.action) {
            debug!(uid = %event.uid, action = %event.action, "Duplicate read suppressed");
            return;
        }

        dispatch::apply(&event, &self.tags, &self.cart);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
