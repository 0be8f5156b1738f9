/// Strategy (scheduled execution) endpoints.
use reqwest::Method;
use serde_json::Value;

use crate::client::AuthenticatedClient;
use crate::enums::{
    MarketType, SelfTradePrevention, Side, SlippageToleranceType, StrategyType, TimeInForce,
};
use crate::errors::BackpackError;
use crate::signing::Params;

/// A strategy creation request.
///
/// Construct with [`StrategyRequest::new`] and set the optional fields
/// directly; unset options are omitted from the request.
#[derive(Debug, Clone)]
pub struct StrategyRequest {
    pub symbol: String,
    pub side: Side,
    pub strategy_type: StrategyType,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub post_only: Option<bool>,
    pub reduce_only: Option<bool>,
    pub self_trade_prevention: Option<SelfTradePrevention>,
    pub time_in_force: Option<TimeInForce>,
    /// Total duration of the strategy, in milliseconds.
    pub duration: Option<String>,
    /// Interval between child orders, in milliseconds.
    pub interval: Option<String>,
    pub randomized_interval_quantity: Option<String>,
    pub client_strategy_id: Option<u64>,
    pub slippage_tolerance: Option<String>,
    pub slippage_tolerance_type: Option<SlippageToleranceType>,
    pub auto_borrow: Option<bool>,
    pub auto_borrow_repay: Option<bool>,
    pub auto_lend: Option<bool>,
    pub auto_lend_redeem: Option<bool>,
    pub broker_id: Option<u64>,
}

impl StrategyRequest {
    pub fn new(symbol: &str, side: Side, strategy_type: StrategyType) -> Self {
        Self {
            symbol: symbol.to_string(),
            side,
            strategy_type,
            quantity: None,
            price: None,
            post_only: None,
            reduce_only: None,
            self_trade_prevention: None,
            time_in_force: None,
            duration: None,
            interval: None,
            randomized_interval_quantity: None,
            client_strategy_id: None,
            slippage_tolerance: None,
            slippage_tolerance_type: None,
            auto_borrow: None,
            auto_borrow_repay: None,
            auto_lend: None,
            auto_lend_redeem: None,
            broker_id: None,
        }
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("symbol", self.symbol.as_str());
        params.insert("side", self.side.as_str());
        params.insert("strategyType", self.strategy_type.as_str());
        params.insert_some("quantity", self.quantity.as_deref());
        params.insert_some("price", self.price.as_deref());
        params.insert_some("postOnly", self.post_only);
        params.insert_some("reduceOnly", self.reduce_only);
        params.insert_some(
            "selfTradePrevention",
            self.self_trade_prevention.map(SelfTradePrevention::as_str),
        );
        params.insert_some("timeInForce", self.time_in_force.map(TimeInForce::as_str));
        params.insert_some("duration", self.duration.as_deref());
        params.insert_some("interval", self.interval.as_deref());
        params.insert_some(
            "randomizedIntervalQuantity",
            self.randomized_interval_quantity.as_deref(),
        );
        params.insert_some("clientStrategyId", self.client_strategy_id);
        params.insert_some("slippageTolerance", self.slippage_tolerance.as_deref());
        params.insert_some(
            "slippageToleranceType",
            self.slippage_tolerance_type
                .map(SlippageToleranceType::as_str),
        );
        params.insert_some("autoBorrow", self.auto_borrow);
        params.insert_some("autoBorrowRepay", self.auto_borrow_repay);
        params.insert_some("autoLend", self.auto_lend);
        params.insert_some("autoLendRedeem", self.auto_lend_redeem);
        params.insert_some("brokerId", self.broker_id);
        params
    }
}

impl AuthenticatedClient {
    /// Create a strategy.
    pub async fn create_strategy(
        &self,
        strategy: &StrategyRequest,
    ) -> Result<Value, BackpackError> {
        Ok(self
            .request_inner(
                Method::POST,
                "api/v1/strategy",
                "strategyCreate",
                Some(strategy.to_params()),
                strategy.broker_id,
            )
            .await?
            .into_json())
    }

    /// An open strategy. One of `strategy_id` or `client_strategy_id` must
    /// be given.
    pub async fn get_strategy(
        &self,
        symbol: &str,
        strategy_id: Option<&str>,
        client_strategy_id: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert_some("strategyId", strategy_id);
        params.insert_some("clientStrategyId", client_strategy_id);
        Ok(self
            .request(Method::GET, "api/v1/strategy", "strategyQuery", Some(params))
            .await?
            .into_json())
    }

    /// Cancel an open strategy. One of `strategy_id` or `client_strategy_id`
    /// must be given.
    pub async fn cancel_strategy(
        &self,
        symbol: &str,
        strategy_id: Option<&str>,
        client_strategy_id: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert_some("strategyId", strategy_id);
        params.insert_some("clientStrategyId", client_strategy_id);
        Ok(self
            .request(
                Method::DELETE,
                "api/v1/strategy",
                "strategyCancel",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// All open strategies, optionally filtered.
    pub async fn get_open_strategies(
        &self,
        symbol: Option<&str>,
        market_type: Option<MarketType>,
        strategy_type: Option<StrategyType>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert_some("symbol", symbol);
        params.insert_some("marketType", market_type.map(MarketType::as_str));
        params.insert_some("strategyType", strategy_type.map(StrategyType::as_str));
        Ok(self
            .request(
                Method::GET,
                "api/v1/strategies",
                "strategyQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Cancel every open strategy on a market.
    pub async fn cancel_all_strategies(
        &self,
        symbol: &str,
        strategy_type: Option<StrategyType>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert_some("strategyType", strategy_type.map(StrategyType::as_str));
        Ok(self
            .request(
                Method::DELETE,
                "api/v1/strategies",
                "strategyCancelAll",
                Some(params),
            )
            .await?
            .into_json())
    }
}
