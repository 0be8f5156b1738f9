/// Public market-data endpoints. None of these require a credential.
use serde_json::Value;

use crate::client::PublicClient;
use crate::enums::{KlineInterval, TickerInterval};
use crate::errors::BackpackError;
use crate::signing::Params;

impl PublicClient {
    /// All assets supported by the exchange.
    pub async fn get_assets(&self) -> Result<Value, BackpackError> {
        Ok(self.get("api/v1/assets", None).await?.into_json())
    }

    /// Collateral parameters for assets.
    pub async fn get_collateral(&self) -> Result<Value, BackpackError> {
        Ok(self.get("api/v1/collateral", None).await?.into_json())
    }

    /// All markets supported by the exchange.
    pub async fn get_markets(&self) -> Result<Value, BackpackError> {
        Ok(self.get("api/v1/markets", None).await?.into_json())
    }

    /// A single market by symbol.
    pub async fn get_market(&self, symbol: &str) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        Ok(self.get("api/v1/market", Some(&params)).await?.into_json())
    }

    /// 24h summary statistics for one market.
    pub async fn get_ticker(
        &self,
        symbol: &str,
        interval: TickerInterval,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert("interval", interval.as_str());
        Ok(self.get("api/v1/ticker", Some(&params)).await?.into_json())
    }

    /// 24h summary statistics for every market.
    pub async fn get_tickers(&self, interval: TickerInterval) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("interval", interval.as_str());
        Ok(self.get("api/v1/tickers", Some(&params)).await?.into_json())
    }

    /// Order book depth for a market.
    pub async fn get_depth(&self, symbol: &str) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        Ok(self.get("api/v1/depth", Some(&params)).await?.into_json())
    }

    /// Candlestick data. `start_time`/`end_time` are Unix milliseconds.
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_time: u64,
        end_time: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert("interval", interval.as_str());
        params.insert("startTime", start_time);
        params.insert_some("endTime", end_time);
        Ok(self.get("api/v1/klines", Some(&params)).await?.into_json())
    }

    /// Mark price, index price and funding rate for a futures market.
    pub async fn get_mark_price(&self, symbol: &str) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        Ok(self
            .get("api/v1/markPrices", Some(&params))
            .await?
            .into_json())
    }

    /// Current open interest for a futures market.
    pub async fn get_open_interest(&self, symbol: &str) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        Ok(self
            .get("api/v1/openInterest", Some(&params))
            .await?
            .into_json())
    }

    /// Funding interval rate history for a futures market.
    pub async fn get_funding_interval_rates(
        &self,
        symbol: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert("limit", limit.unwrap_or(100));
        params.insert("offset", offset.unwrap_or(0));
        Ok(self
            .get("api/v1/fundingRates", Some(&params))
            .await?
            .into_json())
    }

    /// System status and status message, if any.
    pub async fn get_status(&self) -> Result<Value, BackpackError> {
        Ok(self.get("api/v1/status", None).await?.into_json())
    }

    /// Liveness check; the server answers with the literal text `pong`.
    pub async fn send_ping(&self) -> Result<String, BackpackError> {
        Ok(self.get("api/v1/ping", None).await?.into_text())
    }

    /// Current server time as plain text.
    pub async fn get_system_time(&self) -> Result<String, BackpackError> {
        Ok(self.get("api/v1/time", None).await?.into_text())
    }

    /// Supported wallets for deposits and withdrawals.
    pub async fn get_wallets(&self) -> Result<Value, BackpackError> {
        Ok(self.get("api/v1/wallets", None).await?.into_json())
    }

    /// Most recent trades for a symbol, capped at 1000 by the server.
    pub async fn get_recent_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert("limit", limit.unwrap_or(100));
        Ok(self.get("api/v1/trades", Some(&params)).await?.into_json())
    }

    /// Historical trades for a symbol, paginated.
    pub async fn get_historical_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert("limit", limit.unwrap_or(100));
        params.insert("offset", offset.unwrap_or(0));
        Ok(self
            .get("api/v1/trades/history", Some(&params))
            .await?
            .into_json())
    }

    /// All borrow/lend markets with rates and utilization.
    pub async fn get_borrow_lend_markets(&self) -> Result<Value, BackpackError> {
        Ok(self
            .get("api/v1/borrowLend/markets", None)
            .await?
            .into_json())
    }

    /// Borrow/lend market history. `interval` is one of `1d`, `1w`,
    /// `1month`, `1year`.
    pub async fn get_borrow_lend_market_history(
        &self,
        interval: &str,
        symbol: Option<&str>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("interval", interval);
        params.insert_some("symbol", symbol);
        Ok(self
            .get("api/v1/borrowLend/markets/history", Some(&params))
            .await?
            .into_json())
    }

    /// Prediction markets, optionally filtered by symbol.
    pub async fn get_prediction_markets(
        &self,
        symbol: Option<&str>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert_some("symbol", symbol);
        Ok(self
            .get("api/v1/prediction", Some(&params))
            .await?
            .into_json())
    }

    /// Available prediction market tags.
    pub async fn get_prediction_tags(&self) -> Result<Value, BackpackError> {
        Ok(self.get("api/v1/prediction/tags", None).await?.into_json())
    }
}
