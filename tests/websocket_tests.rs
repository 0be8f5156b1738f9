#![cfg(feature = "integration")]
/// WebSocket tests against an in-process mock server.
///
/// These cover stream routing, private subscription signing, unsubscribe,
/// and reconnect-with-resubscribe without hitting the exchange.
///
/// Run with: cargo test --features integration --test websocket_tests
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message as WsMsg;

use backpack_sdk::websocket::{BackpackWebSocket, WsConfig};
use backpack_sdk::Credential;

fn fast_config() -> WsConfig {
    WsConfig {
        connect_timeout: Duration::from_secs(5),
        reconnect_delay: Duration::from_millis(100),
        shutdown_reconnect_delay: Duration::from_millis(100),
        max_attempts: 0,
    }
}

fn test_credential() -> Credential {
    let seed = BASE64.encode([9u8; 32]);
    Credential::new("ws-test-key", &seed).unwrap()
}

/// Mock server that waits for a SUBSCRIBE message, then emits one data
/// message per subscribed stream.
async fn create_echo_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let Ok(ws_stream) = accept_async(stream).await else {
                    return;
                };
                let (mut sender, mut receiver) = ws_stream.split();

                while let Some(Ok(msg)) = receiver.next().await {
                    match msg {
                        WsMsg::Text(text) => {
                            let parsed: Value = serde_json::from_str(&text).unwrap();
                            if parsed["method"] == "SUBSCRIBE" {
                                for stream_name in parsed["params"].as_array().unwrap() {
                                    let data = json!({
                                        "stream": stream_name,
                                        "data": {"s": stream_name, "seq": 1}
                                    });
                                    let _ = sender
                                        .send(WsMsg::Text(serde_json::to_string(&data).unwrap()))
                                        .await;
                                }
                            }
                        }
                        WsMsg::Ping(data) => {
                            let _ = sender.send(WsMsg::Pong(data)).await;
                        }
                        WsMsg::Close(_) => break,
                        _ => {}
                    }
                }
            });
        }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("ws://{addr}")
}

#[tokio::test]
async fn subscribe_routes_data_by_stream() {
    let url = create_echo_server().await;
    let ws = BackpackWebSocket::connect_to(&url, fast_config(), None)
        .await
        .unwrap();
    assert!(ws.is_connected());

    let mut trades = ws.subscribe(&["trade.SOL_USDC"]).await.unwrap();
    let event = tokio::time::timeout(Duration::from_secs(2), trades.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event["s"], "trade.SOL_USDC");

    ws.disconnect().await.unwrap();
}

#[tokio::test]
async fn separate_subscriptions_do_not_cross() {
    let url = create_echo_server().await;
    let ws = BackpackWebSocket::connect_to(&url, fast_config(), None)
        .await
        .unwrap();

    let mut depth = ws.subscribe(&["depth.SOL_USDC"]).await.unwrap();
    let mut ticker = ws.subscribe(&["ticker.SOL_USDC"]).await.unwrap();

    let depth_event = tokio::time::timeout(Duration::from_secs(2), depth.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(depth_event["s"], "depth.SOL_USDC");

    let ticker_event = tokio::time::timeout(Duration::from_secs(2), ticker.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ticker_event["s"], "ticker.SOL_USDC");

    ws.disconnect().await.unwrap();
}

#[tokio::test]
async fn private_subscribe_requires_credential() {
    let url = create_echo_server().await;
    let ws = BackpackWebSocket::connect_to(&url, fast_config(), None)
        .await
        .unwrap();

    let err = ws.subscribe_private(&["account.orderUpdate"]).await;
    assert!(err.is_err());

    ws.disconnect().await.unwrap();
}

/// Mock server that records the first SUBSCRIBE message it receives.
async fn create_recording_server(recorded: Arc<Mutex<Option<Value>>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            if let Ok(ws_stream) = accept_async(stream).await {
                let (mut sender, mut receiver) = ws_stream.split();
                while let Some(Ok(msg)) = receiver.next().await {
                    match msg {
                        WsMsg::Text(text) => {
                            let parsed: Value = serde_json::from_str(&text).unwrap();
                            *recorded.lock().await = Some(parsed.clone());
                            let data = json!({
                                "stream": parsed["params"][0],
                                "data": {"ok": true}
                            });
                            let _ = sender
                                .send(WsMsg::Text(serde_json::to_string(&data).unwrap()))
                                .await;
                        }
                        WsMsg::Close(_) => break,
                        _ => {}
                    }
                }
            }
        }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("ws://{addr}")
}

#[tokio::test]
async fn private_subscribe_sends_signature_array() {
    let recorded = Arc::new(Mutex::new(None));
    let url = create_recording_server(recorded.clone()).await;

    let ws = BackpackWebSocket::connect_to(&url, fast_config(), Some(test_credential()))
        .await
        .unwrap();

    let mut orders = ws.subscribe_private(&["account.orderUpdate"]).await.unwrap();
    let event = tokio::time::timeout(Duration::from_secs(2), orders.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event["ok"], true);

    let msg = recorded.lock().await.clone().unwrap();
    assert_eq!(msg["method"], "SUBSCRIBE");
    let signature = msg["signature"].as_array().unwrap();
    assert_eq!(signature.len(), 4);
    assert_eq!(signature[0], "ws-test-key");
    assert!(!signature[1].as_str().unwrap().is_empty());

    ws.disconnect().await.unwrap();
}

/// Mock server that closes the first connection after one data message and
/// serves normally from the second connection onward.
async fn create_reconnect_server(subscribe_counts: Arc<Mutex<Vec<Value>>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut connection = 0usize;
        while let Ok((stream, _)) = listener.accept().await {
            connection += 1;
            let first = connection == 1;
            let counts = subscribe_counts.clone();

            let Ok(ws_stream) = accept_async(stream).await else {
                continue;
            };
            let (mut sender, mut receiver) = ws_stream.split();

            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    WsMsg::Text(text) => {
                        let parsed: Value = serde_json::from_str(&text).unwrap();
                        counts.lock().await.push(parsed.clone());
                        let data = json!({
                            "stream": parsed["params"][0],
                            "data": {"connection": connection}
                        });
                        let _ = sender
                            .send(WsMsg::Text(serde_json::to_string(&data).unwrap()))
                            .await;
                        if first {
                            let _ = sender.send(WsMsg::Close(None)).await;
                            break;
                        }
                    }
                    WsMsg::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("ws://{addr}")
}

#[tokio::test]
async fn reconnect_replays_subscriptions() {
    let subscribes = Arc::new(Mutex::new(Vec::new()));
    let url = create_reconnect_server(subscribes.clone()).await;

    let ws = BackpackWebSocket::connect_to(&url, fast_config(), None)
        .await
        .unwrap();
    let mut trades = ws.subscribe(&["trade.SOL_USDC"]).await.unwrap();

    let first = tokio::time::timeout(Duration::from_secs(2), trades.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first["connection"], 1);

    // The server closes after the first data message; the client reconnects
    // and replays the subscription.
    let second = tokio::time::timeout(Duration::from_secs(5), trades.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second["connection"], 2);

    let recorded = subscribes.lock().await;
    assert!(recorded.len() >= 2);
    assert_eq!(recorded[0]["params"][0], "trade.SOL_USDC");
    assert_eq!(recorded[1]["params"][0], "trade.SOL_USDC");

    ws.disconnect().await.unwrap();
}

/// Mock server that pings the client after the first subscription and
/// records the pong payload it gets back.
async fn create_ping_server(pong: Arc<Mutex<Option<Vec<u8>>>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            if let Ok(ws_stream) = accept_async(stream).await {
                let (mut sender, mut receiver) = ws_stream.split();
                while let Some(Ok(msg)) = receiver.next().await {
                    match msg {
                        WsMsg::Text(text) => {
                            let parsed: Value = serde_json::from_str(&text).unwrap();
                            let data = json!({
                                "stream": parsed["params"][0],
                                "data": {"ok": true}
                            });
                            let _ = sender
                                .send(WsMsg::Text(serde_json::to_string(&data).unwrap()))
                                .await;
                            let _ = sender.send(WsMsg::Ping(b"hb".to_vec())).await;
                        }
                        WsMsg::Pong(data) => {
                            *pong.lock().await = Some(data);
                        }
                        WsMsg::Close(_) => break,
                        _ => {}
                    }
                }
            }
        }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("ws://{addr}")
}

#[tokio::test]
async fn server_ping_is_answered_with_pong() {
    let pong = Arc::new(Mutex::new(None));
    let url = create_ping_server(pong.clone()).await;

    let ws = BackpackWebSocket::connect_to(&url, fast_config(), None)
        .await
        .unwrap();
    let mut trades = ws.subscribe(&["trade.SOL_USDC"]).await.unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(2), trades.next())
        .await
        .unwrap()
        .unwrap();

    let mut answered = None;
    for _ in 0..40 {
        answered = pong.lock().await.clone();
        if answered.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(answered.as_deref(), Some(&b"hb"[..]));

    ws.disconnect().await.unwrap();
}

#[tokio::test]
async fn malformed_url_is_rejected() {
    let result = BackpackWebSocket::connect_to("not a url", fast_config(), None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn failed_subscribe_is_not_tracked() {
    let url = create_echo_server().await;
    let ws = BackpackWebSocket::connect_to(&url, fast_config(), None)
        .await
        .unwrap();

    let mut trades = ws.subscribe(&["trade.SOL_USDC"]).await.unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(2), trades.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ws.subscription_count().await, 1);

    // With the connection torn down the subscribe send fails; the entry must
    // not linger for a later reconnect to replay.
    ws.disconnect().await.unwrap();
    let result = ws.subscribe(&["depth.SOL_USDC"]).await;
    assert!(result.is_err());
    assert_eq!(ws.subscription_count().await, 1);
}

#[tokio::test]
async fn unsubscribe_terminates_stream() {
    let url = create_echo_server().await;
    let ws = BackpackWebSocket::connect_to(&url, fast_config(), None)
        .await
        .unwrap();

    let mut trades = ws.subscribe(&["trade.SOL_USDC"]).await.unwrap();
    let _ = tokio::time::timeout(Duration::from_secs(2), trades.next())
        .await
        .unwrap()
        .unwrap();

    ws.unsubscribe(&["trade.SOL_USDC"]).await.unwrap();

    // With the sender dropped the stream ends.
    let end = tokio::time::timeout(Duration::from_secs(2), trades.next())
        .await
        .unwrap();
    assert!(end.is_none());

    ws.disconnect().await.unwrap();
}
