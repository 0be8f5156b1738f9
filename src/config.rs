/// Client configuration for Backpack Exchange API endpoints.
use std::time::Duration;

use crate::signing::DEFAULT_WINDOW;

/// Default REST base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.backpack.exchange/";

/// Default WebSocket endpoint.
pub const DEFAULT_WS_URL: &str = "wss://ws.backpack.exchange";

/// REST/WebSocket endpoints, signing window, and transport options.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub ws_url: String,
    /// Signature acceptance window in milliseconds. Requests signed with a
    /// timestamp older than this are rejected server-side, so the local
    /// clock must be reasonably synced.
    pub window: u64,
    /// Per-request timeout enforced by the HTTP transport.
    pub timeout: Duration,
    /// Optional transport-level retry. Off by default; the signing core
    /// never retries on its own.
    pub retry: Option<RetryPolicy>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            ws_url: DEFAULT_WS_URL.into(),
            window: DEFAULT_WINDOW,
            timeout: Duration::from_secs(30),
            retry: None,
        }
    }
}

/// Bounded retry with linear backoff for an allowlist of HTTP statuses.
/// Transport failures are always considered retryable under this policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(500),
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}
