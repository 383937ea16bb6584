//! Integration test: scan channel against a local WebSocket bridge.
//!
//! Spins up an in-process WebSocket server standing in for the RFID
//! bridge, replays a realistic frame sequence (greeting, double-reads,
//! distinct tags), and asserts the cart state the shopper would see.

use std::time::Duration;

use futures_util::SinkExt;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use smartcart_core::{SharedCart, TagTable};
use smartcart_scan::{ConnectionState, ScanChannel, ScanConfig};

/// Binds a throwaway bridge that replays the given frames, then keeps
/// the connection open. Returns its ws:// url.
async fn spawn_bridge(frames: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        ws.send(Message::Text("Hello from SmartCart scanner".into()))
            .await
            .unwrap();

        for frame in frames {
            ws.send(Message::Text(frame.into())).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        // Hold the connection open until the client closes it
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    format!("ws://{addr}/")
}

fn test_config(url: String) -> ScanConfig {
    ScanConfig {
        url,
        connect_timeout: Duration::from_secs(5),
        reconnect_interval: Duration::from_millis(200),
        debounce_window: Duration::from_millis(500),
        debounce_capacity: 64,
    }
}

#[tokio::test]
async fn test_double_read_becomes_one_item() {
    let url = spawn_bridge(vec![
        // One physical tap, two reads 100ms apart
        r#"{"uid":"b3:d7:f0:30","action":"add","time":"10:00:00"}"#.to_string(),
        r#"{"uid":"B3:D7:F0:30","action":"add","time":"10:00:00"}"#.to_string(),
        // A different tag is not suppressed
        r#"{"uid":"53:16:3d:fb","action":"add","time":"10:00:01"}"#.to_string(),
    ])
    .await;

    let cart = SharedCart::new();
    let handle = ScanChannel::spawn(test_config(url), TagTable::builtin(), cart.clone());

    // Let the channel connect and drain the frames
    tokio::time::sleep(Duration::from_millis(800)).await;

    assert!(handle.is_connected().await);
    cart.with_cart(|c| {
        assert_eq!(c.quantity_of("B3D7F030"), 1, "duplicate read must collapse");
        assert_eq!(c.quantity_of("53163DFB"), 1);
        assert_eq!(c.entries().len(), 2);
    });

    handle.shutdown().await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(handle.state().await, ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_remove_and_unknown_tag() {
    let url = spawn_bridge(vec![
        r#"{"uid":"1a:79:bb:03","action":"add","time":""}"#.to_string(),
        r#"{"uid":"1a:79:bb:03","action":"remove","time":""}"#.to_string(),
        // Unknown tag still lands as a visible placeholder
        r#"{"uid":"de:ad:be:ef","action":"add","time":""}"#.to_string(),
        // Junk frame is dropped without killing the connection
        "garbage that is not json".to_string(),
        r#"{"uid":"07:6b:ba:03","action":"add","time":""}"#.to_string(),
    ])
    .await;

    let cart = SharedCart::new();
    let handle = ScanChannel::spawn(test_config(url), TagTable::builtin(), cart.clone());

    tokio::time::sleep(Duration::from_millis(1000)).await;

    cart.with_cart(|c| {
        // Add then remove cancels out
        assert_eq!(c.quantity_of("1A79BB03"), 0);
        assert_eq!(c.quantity_of("DEADBEEF"), 1);
        assert_eq!(c.quantity_of("076BBA03"), 1);
    });

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reconnects_after_bridge_restart() {
    // A bridge that drops the first connection immediately, then serves
    // a frame on the second
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        // First connection: accept and slam the door
        let (stream, _) = listener.accept().await.unwrap();
        drop(accept_async(stream).await.unwrap());

        // Second connection: behave
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::Text(
            r#"{"uid":"e3:53:23:31","action":"add","time":""}"#.into(),
        ))
        .await
        .unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let cart = SharedCart::new();
    let mut config = test_config(format!("ws://{addr}/"));
    config.reconnect_interval = Duration::from_millis(100);
    let handle = ScanChannel::spawn(config, TagTable::builtin(), cart.clone());

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(handle.is_connected().await);
    assert_eq!(cart.with_cart(|c| c.quantity_of("E3532331")), 1);

    handle.shutdown().await.unwrap();
}
