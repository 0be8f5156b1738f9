//! Backpack Exchange SDK for Rust.
//!
//! A client library for the Backpack Exchange REST and WebSocket APIs,
//! with ED25519 request signing for authenticated endpoints.
//!
//! # What This SDK Provides
//!
//! - Public market data access: [`PublicClient`]
//! - Signed account, order, and capital operations: [`AuthenticatedClient`]
//! - Real-time streams with auto-reconnect: [`BackpackWebSocket`]
//! - A closed error taxonomy over the exchange's `{code, message}` envelope:
//!   [`BackpackError`] / [`ApiErrorKind`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use backpack_sdk::{PublicClient, enums::TickerInterval};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), backpack_sdk::BackpackError> {
//!     let client = PublicClient::new()?;
//!
//!     let markets = client.get_markets().await?;
//!     println!("markets: {markets}");
//!
//!     let ticker = client.get_ticker("SOL_USDC", TickerInterval::OneDay).await?;
//!     println!("ticker: {ticker}");
//!     Ok(())
//! }
//! ```
//!
//! # Authenticated Requests
//!
//! Authenticated endpoints need the base64 API key (the "public key" shown
//! in the exchange UI) and the base64 32-byte ED25519 seed. Every request is
//! signed over a canonical string of its instruction, sorted parameters,
//! timestamp, and window:
//!
//! ```rust,no_run
//! use backpack_sdk::{AuthenticatedClient, OrderRequest, enums::Side};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), backpack_sdk::BackpackError> {
//!     let client = AuthenticatedClient::new("<api key>", "<secret seed>")?;
//!
//!     let balances = client.get_balances().await?;
//!     println!("balances: {balances}");
//!
//!     let order = OrderRequest::limit("SOL_USDC", Side::Bid, "132.5", "0.5");
//!     let result = client.execute_order(&order).await?;
//!     println!("order: {result}");
//!     Ok(())
//! }
//! ```
//!
//! # Streaming
//!
//! ```rust,no_run
//! use backpack_sdk::BackpackWebSocket;
//! use tokio_stream::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), backpack_sdk::BackpackError> {
//!     let ws = BackpackWebSocket::connect().await?;
//!     let mut trades = ws.subscribe(&["trade.SOL_USDC"]).await?;
//!     while let Some(event) = trades.next().await {
//!         println!("trade: {event}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! This crate emits debug-level logs through the [`log`](https://docs.rs/log/)
//! facade for request dispatch and WebSocket lifecycle events. Configure any
//! compatible logger in your binary, then set `RUST_LOG=debug` to inspect
//! request flow.
//!
//! # Errors
//!
//! All fallible operations return [`BackpackError`]. Exchange rejections
//! carry the server's error code, its [`ApiErrorKind`] category, and the
//! HTTP status; transport failures that never produced a response are a
//! separate variant, so callers can tell a rejected order from a network
//! drop.
pub mod api;
pub mod client;
pub mod config;
pub mod crypto;
pub mod enums;
pub mod errors;
pub mod signing;
pub mod websocket;

// Re-export primary types for convenience.
pub use api::{HistoryPage, OrderRequest, StrategyRequest, WithdrawalRequest};
pub use client::{ApiPayload, AuthenticatedClient, Clock, PublicClient, SystemClock};
pub use config::{ClientConfig, RetryPolicy, DEFAULT_BASE_URL, DEFAULT_WS_URL};
pub use crypto::Credential;
pub use errors::{ApiErrorKind, BackpackError};
pub use signing::{AuthHeaders, Params, DEFAULT_WINDOW};
pub use websocket::{BackpackWebSocket, EventStream, WsConfig};
