/// WebSocket client for Backpack Exchange real-time streams.
///
/// Features:
/// - Auto-reconnect, with a longer grace delay when the server announces
///   shutdown (close code 1001)
/// - Subscription tracking and automatic re-subscribe on reconnect; private
///   subscriptions are re-signed with a fresh timestamp
/// - Per-subscription channels (no race condition on concurrent stream calls)
/// - Inline pong replies; the server drives the heartbeat
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use log::{debug, warn};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio_stream::Stream;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message as WsMsg;
use url::Url;

use crate::client::{Clock, SystemClock};
use crate::config::DEFAULT_WS_URL;
use crate::crypto::Credential;
use crate::errors::BackpackError;
use crate::signing::{ws_auth_headers, AuthHeaders, DEFAULT_WINDOW};

type WsSink = futures_util::stream::SplitSink<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
    WsMsg,
>;

type WsStream = futures_util::stream::SplitStream<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
>;

/// Configuration for WebSocket connection behavior.
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Timeout for establishing a connection (default: 10s).
    pub connect_timeout: Duration,
    /// Delay before reconnecting after an unexpected close (default: 5s).
    pub reconnect_delay: Duration,
    /// Delay before reconnecting after the server announces shutdown with
    /// close code 1001 (default: 30s).
    pub shutdown_reconnect_delay: Duration,
    /// Maximum number of consecutive reconnect attempts (default: 0 = retry
    /// until disconnected).
    pub max_attempts: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            reconnect_delay: Duration::from_secs(5),
            shutdown_reconnect_delay: Duration::from_secs(30),
            max_attempts: 0,
        }
    }
}

/// Build the `SUBSCRIBE` message for a set of streams. Private streams carry
/// the signature array `[apiKey, signature, timestamp, window]`.
pub fn subscribe_message(streams: &[String], auth: Option<&AuthHeaders>) -> Value {
    let mut msg = json!({
        "method": "SUBSCRIBE",
        "params": streams,
    });
    if let Some(auth) = auth {
        msg["signature"] = json!([
            auth.api_key,
            auth.signature,
            auth.timestamp,
            auth.window,
        ]);
    }
    msg
}

/// Build the `UNSUBSCRIBE` message for a set of streams.
pub fn unsubscribe_message(streams: &[String]) -> Value {
    json!({
        "method": "UNSUBSCRIBE",
        "params": streams,
    })
}

/// A stream of `data` payloads delivered for one subscription.
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<Value>,
}

impl Stream for EventStream {
    type Item = Value;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// One tracked subscription, replayed on reconnect.
#[derive(Debug, Clone)]
struct SubscriptionEntry {
    streams: Vec<String>,
    private: bool,
}

/// Shared inner state for the WebSocket connection.
struct WsInner {
    sink: Option<WsSink>,
    subscriptions: Vec<SubscriptionEntry>,
    senders: HashMap<String, Vec<mpsc::UnboundedSender<Value>>>,
}

impl WsInner {
    fn new() -> Self {
        Self {
            sink: None,
            subscriptions: Vec::new(),
            senders: HashMap::new(),
        }
    }

    /// Remove closed senders, and stream entries with no senders left.
    fn prune_closed_senders(&mut self) {
        for senders in self.senders.values_mut() {
            senders.retain(|s| !s.is_closed());
        }
        self.senders.retain(|_, senders| !senders.is_empty());
    }

    /// Drop every sender channel, signalling receivers to terminate.
    fn close_all_senders(&mut self) {
        self.senders.clear();
    }
}

/// Immutable connection context shared with the background tasks.
struct WsContext {
    url: String,
    config: WsConfig,
    credential: Option<Credential>,
    window: u64,
    clock: Arc<dyn Clock>,
}

impl WsContext {
    /// The wire message re-arming one tracked subscription. Private entries
    /// get a signature built from the current clock reading.
    fn subscription_message(&self, entry: &SubscriptionEntry) -> Value {
        let auth = if entry.private {
            self.credential
                .as_ref()
                .map(|c| ws_auth_headers(c, self.clock.now_millis(), self.window))
        } else {
            None
        };
        subscribe_message(&entry.streams, auth.as_ref())
    }
}

/// WebSocket client for Backpack Exchange.
///
/// Delivers each message's `data` payload to every stream handle subscribed
/// to the message's `stream` name.
pub struct BackpackWebSocket {
    ctx: Arc<WsContext>,
    inner: Arc<Mutex<WsInner>>,
    connected: Arc<AtomicBool>,
    should_run: Arc<AtomicBool>,
    reader_handle: Option<tokio::task::JoinHandle<()>>,
}

impl BackpackWebSocket {
    /// Connect to the production endpoint without a credential. Only public
    /// streams are available.
    pub async fn connect() -> Result<Self, BackpackError> {
        Self::connect_to(DEFAULT_WS_URL, WsConfig::default(), None).await
    }

    /// Connect with a credential, enabling private streams.
    pub async fn connect_authenticated(
        public_key: &str,
        secret_key: &str,
    ) -> Result<Self, BackpackError> {
        let credential = Credential::new(public_key, secret_key)?;
        Self::connect_to(DEFAULT_WS_URL, WsConfig::default(), Some(credential)).await
    }

    /// Connect to an arbitrary endpoint with explicit configuration.
    pub async fn connect_to(
        url: &str,
        config: WsConfig,
        credential: Option<Credential>,
    ) -> Result<Self, BackpackError> {
        Url::parse(url)?;
        let ctx = Arc::new(WsContext {
            url: url.to_string(),
            config,
            credential,
            window: DEFAULT_WINDOW,
            clock: Arc::new(SystemClock),
        });

        let mut ws = Self {
            ctx,
            inner: Arc::new(Mutex::new(WsInner::new())),
            connected: Arc::new(AtomicBool::new(false)),
            should_run: Arc::new(AtomicBool::new(true)),
            reader_handle: None,
        };

        ws.do_connect().await?;
        Ok(ws)
    }

    async fn do_connect(&mut self) -> Result<(), BackpackError> {
        let stream = Self::open_stream(&self.ctx, &self.inner).await?;
        self.connected.store(true, Ordering::SeqCst);

        let ctx = self.ctx.clone();
        let inner = self.inner.clone();
        let connected = self.connected.clone();
        let should_run = self.should_run.clone();

        let reader_handle = tokio::spawn(async move {
            let close_code = Self::read_loop(stream, inner.clone(), should_run.clone()).await;

            if should_run.load(Ordering::SeqCst) {
                connected.store(false, Ordering::SeqCst);
                Self::reconnect_loop(ctx, inner, connected, should_run, close_code).await;
            }
        });
        self.reader_handle = Some(reader_handle);

        Ok(())
    }

    /// Dial the endpoint, install the sink, and replay tracked
    /// subscriptions. Returns the read half.
    async fn open_stream(
        ctx: &WsContext,
        inner: &Arc<Mutex<WsInner>>,
    ) -> Result<WsStream, BackpackError> {
        let connect = tokio_tungstenite::connect_async(&ctx.url);
        let (ws_stream, _) = tokio::time::timeout(ctx.config.connect_timeout, connect)
            .await
            .map_err(|_| BackpackError::WebSocket("connection timeout".into()))??;
        let (sink, stream) = ws_stream.split();

        let mut guard = inner.lock().await;
        guard.sink = Some(sink);

        let entries = guard.subscriptions.clone();
        if let Some(ref mut sink) = guard.sink {
            for entry in &entries {
                let msg = ctx.subscription_message(entry);
                let text = serde_json::to_string(&msg).unwrap_or_default();
                let _ = sink.send(WsMsg::Text(text)).await;
            }
        }

        Ok(stream)
    }

    /// Pump messages until the connection drops. Returns the close code when
    /// the server sent a close frame.
    async fn read_loop(
        mut stream: WsStream,
        inner: Arc<Mutex<WsInner>>,
        should_run: Arc<AtomicBool>,
    ) -> Option<CloseCode> {
        while should_run.load(Ordering::SeqCst) {
            let msg = match stream.next().await {
                Some(Ok(m)) => m,
                Some(Err(err)) => {
                    warn!("websocket read error: {err}");
                    return None;
                }
                None => return None,
            };

            match msg {
                WsMsg::Text(text) => {
                    let parsed: Value = match serde_json::from_str(&text) {
                        Ok(v) => v,
                        Err(_) => continue,
                    };
                    let Some(stream_name) = parsed.get("stream").and_then(|s| s.as_str()) else {
                        continue;
                    };

                    let mut guard = inner.lock().await;
                    guard.prune_closed_senders();
                    if let Some(senders) = guard.senders.get(stream_name) {
                        let data = parsed.get("data").cloned().unwrap_or(Value::Null);
                        for tx in senders {
                            let _ = tx.send(data.clone());
                        }
                    }
                }
                WsMsg::Ping(data) => {
                    // Server pings every 60s and expects a pong within 120s.
                    let mut guard = inner.lock().await;
                    if let Some(ref mut sink) = guard.sink {
                        let _ = sink.send(WsMsg::Pong(data)).await;
                    }
                }
                WsMsg::Close(frame) => {
                    debug!("websocket closed by server: {frame:?}");
                    return frame.map(|f| f.code);
                }
                _ => {}
            }
        }
        None
    }

    async fn reconnect_loop(
        ctx: Arc<WsContext>,
        inner: Arc<Mutex<WsInner>>,
        connected: Arc<AtomicBool>,
        should_run: Arc<AtomicBool>,
        mut close_code: Option<CloseCode>,
    ) {
        let mut attempts = 0;

        while should_run.load(Ordering::SeqCst) {
            if ctx.config.max_attempts > 0 && attempts >= ctx.config.max_attempts {
                let mut guard = inner.lock().await;
                guard.close_all_senders();
                return;
            }

            // Close code 1001 means the server is shutting down; give it the
            // full grace period before dialing again.
            let delay = if close_code == Some(CloseCode::Away) {
                ctx.config.shutdown_reconnect_delay
            } else {
                ctx.config.reconnect_delay
            };
            tokio::time::sleep(delay).await;
            attempts += 1;

            match Self::open_stream(&ctx, &inner).await {
                Ok(stream) => {
                    connected.store(true, Ordering::SeqCst);
                    attempts = 0;

                    close_code = Self::read_loop(stream, inner.clone(), should_run.clone()).await;

                    if should_run.load(Ordering::SeqCst) {
                        connected.store(false, Ordering::SeqCst);
                        continue;
                    }
                    return;
                }
                Err(err) => {
                    warn!("websocket reconnect failed: {err}");
                    close_code = None;
                }
            }
        }
    }

    async fn send_json(&self, value: Value) -> Result<(), BackpackError> {
        let text = serde_json::to_string(&value)?;
        let mut guard = self.inner.lock().await;
        if let Some(ref mut sink) = guard.sink {
            sink.send(WsMsg::Text(text))
                .await
                .map_err(BackpackError::from)
        } else {
            Err(BackpackError::WebSocket("not connected".into()))
        }
    }

    /// Check if the WebSocket is currently connected.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Number of tracked subscription entries a reconnect would replay.
    pub async fn subscription_count(&self) -> usize {
        self.inner.lock().await.subscriptions.len()
    }

    /// Subscribe to public streams. Returns a stream of their `data`
    /// payloads.
    pub async fn subscribe(&self, streams: &[&str]) -> Result<EventStream, BackpackError> {
        self.subscribe_entry(streams, false).await
    }

    /// Subscribe to private streams. Requires a credential; the subscription
    /// is signed with the fixed `subscribe` instruction.
    pub async fn subscribe_private(&self, streams: &[&str]) -> Result<EventStream, BackpackError> {
        if self.ctx.credential.is_none() {
            return Err(BackpackError::WebSocket(
                "private streams require a credential".into(),
            ));
        }
        self.subscribe_entry(streams, true).await
    }

    async fn subscribe_entry(
        &self,
        streams: &[&str],
        private: bool,
    ) -> Result<EventStream, BackpackError> {
        let names: Vec<String> = streams.iter().map(|s| s.to_string()).collect();
        let entry = SubscriptionEntry {
            streams: names.clone(),
            private,
        };
        let msg = self.ctx.subscription_message(&entry);

        let (tx, rx) = mpsc::unbounded_channel();
        {
            let mut guard = self.inner.lock().await;
            for stream in &names {
                guard
                    .senders
                    .entry(stream.clone())
                    .or_default()
                    .push(tx.clone());
            }
            guard.subscriptions.push(entry);
        }

        // Registration happens before the send so messages racing in on the
        // read loop are not dropped; a failed send rolls it back, otherwise
        // the next reconnect would arm a subscription the caller was told
        // failed.
        if let Err(err) = self.send_json(msg).await {
            let mut guard = self.inner.lock().await;
            for stream in &names {
                if let Some(senders) = guard.senders.get_mut(stream) {
                    senders.retain(|s| !s.same_channel(&tx));
                }
            }
            guard.senders.retain(|_, senders| !senders.is_empty());
            if let Some(pos) = guard
                .subscriptions
                .iter()
                .rposition(|e| e.streams == names && e.private == private)
            {
                guard.subscriptions.remove(pos);
            }
            return Err(err);
        }
        Ok(EventStream { rx })
    }

    /// Unsubscribe from streams. Their stream handles terminate once the
    /// senders are dropped.
    pub async fn unsubscribe(&self, streams: &[&str]) -> Result<(), BackpackError> {
        let names: Vec<String> = streams.iter().map(|s| s.to_string()).collect();
        self.send_json(unsubscribe_message(&names)).await?;

        let mut guard = self.inner.lock().await;
        for name in &names {
            guard.senders.remove(name);
        }
        for entry in &mut guard.subscriptions {
            entry.streams.retain(|s| !names.contains(s));
        }
        guard.subscriptions.retain(|e| !e.streams.is_empty());
        Ok(())
    }

    /// Close the connection and stop the background tasks.
    pub async fn disconnect(&self) -> Result<(), BackpackError> {
        self.should_run.store(false, Ordering::SeqCst);
        self.connected.store(false, Ordering::SeqCst);

        let mut guard = self.inner.lock().await;
        if let Some(mut sink) = guard.sink.take() {
            let _ = sink.send(WsMsg::Close(None)).await;
        }
        guard.close_all_senders();

        Ok(())
    }
}
