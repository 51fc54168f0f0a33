//! Live tests against the public Binance stream.
//!
//! These tests require network access.
//! Run with: `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

use std::sync::Arc;
use std::time::Duration;

use tickerdash::config::FeedConfig;
use tickerdash::models::{ConnectionStatus, Symbol};
use tickerdash::store::Store;
use tickerdash::tls::build_tls_config;
use tickerdash::tui::Message;
use tickerdash::websocket::codec::decode_frame;
use tickerdash::websocket::{
    ConnectionManager, Connector, FeedConnection, FeedEvent, WsConnector, stream_url,
};

fn connector() -> WsConnector {
    WsConnector::new(Arc::new(
        build_tls_config().expect("failed to build TLS config"),
    ))
}

#[tokio::test]
async fn test_live_ticker_frame_decodes() {
    let url = stream_url(&FeedConfig::default().stream_url, Symbol::BtcUsdt);
    let mut conn = connector().connect(&url).await.expect("Failed to connect");

    let event = tokio::time::timeout(Duration::from_secs(10), conn.next_event())
        .await
        .expect("No frame within 10s")
        .expect("Stream ended");

    let FeedEvent::Text(text) = event else {
        panic!("unexpected event: {event:?}");
    };
    let record = decode_frame(&text, Symbol::BtcUsdt).expect("Failed to decode frame");
    assert!(record.price > 0.0);

    conn.close(1000).await.expect("Failed to close");
}

#[tokio::test]
async fn test_manager_reports_live_price() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = tokio::sync::mpsc::unbounded_channel();
    let handle = ConnectionManager::new(
        connector(),
        &FeedConfig::default(),
        Symbol::EthUsdt,
        tx,
        cmd_rx,
    )
    .spawn();

    let mut store = Store::new(Symbol::EthUsdt);
    tokio::time::timeout(Duration::from_secs(15), async {
        while let Some(Message::Transition(transition)) = rx.recv().await {
            store.dispatch(transition);
            if store.state().selected_price().is_some() {
                break;
            }
        }
    })
    .await
    .expect("No price within 15s");

    assert_eq!(store.state().status(), ConnectionStatus::Open);

    drop(cmd_tx);
    handle.await.expect("manager panicked");
    while let Ok(Message::Transition(transition)) = rx.try_recv() {
        store.dispatch(transition);
    }
    assert_eq!(store.state().status(), ConnectionStatus::Closed);
}
