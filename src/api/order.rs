/// Order placement, query, and cancellation endpoints.
use reqwest::Method;
use serde_json::Value;

use crate::client::AuthenticatedClient;
use crate::enums::{
    CancelOrderType, MarketType, OrderType, SelfTradePrevention, Side, SlippageToleranceType,
    TimeInForce,
};
use crate::errors::BackpackError;
use crate::signing::Params;

/// One order submission, for both single and batch execution.
///
/// Construct with [`OrderRequest::new`] and set the optional fields
/// directly. Fields left `None` are omitted from the request entirely, so
/// the signed parameter set matches what the server receives.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    /// Limit price. Required for limit orders.
    pub price: Option<String>,
    /// Base asset quantity.
    pub quantity: Option<String>,
    /// Quote asset quantity, for market orders placed by notional value.
    pub quote_quantity: Option<String>,
    /// Time in force for limit orders. When unset, `postOnly` is sent
    /// instead.
    pub time_in_force: Option<TimeInForce>,
    pub post_only: bool,
    pub client_id: Option<u64>,
    /// Also sent as the `X-Broker-Id` header on dispatch.
    pub broker_id: Option<u64>,
    pub self_trade_prevention: Option<SelfTradePrevention>,
    pub trigger_price: Option<String>,
    pub trigger_by: Option<String>,
    pub trigger_quantity: Option<String>,
    pub reduce_only: Option<bool>,
    pub auto_borrow: Option<bool>,
    pub auto_borrow_repay: Option<bool>,
    pub auto_lend: Option<bool>,
    pub auto_lend_redeem: Option<bool>,
    pub stop_loss_trigger_price: Option<String>,
    pub stop_loss_trigger_by: Option<String>,
    pub stop_loss_limit_price: Option<String>,
    pub take_profit_trigger_price: Option<String>,
    pub take_profit_trigger_by: Option<String>,
    pub take_profit_limit_price: Option<String>,
    pub slippage_tolerance: Option<String>,
    pub slippage_tolerance_type: Option<SlippageToleranceType>,
}

impl OrderRequest {
    pub fn new(symbol: &str, side: Side, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.to_string(),
            side,
            order_type,
            price: None,
            quantity: None,
            quote_quantity: None,
            time_in_force: None,
            post_only: false,
            client_id: None,
            broker_id: None,
            self_trade_prevention: None,
            trigger_price: None,
            trigger_by: None,
            trigger_quantity: None,
            reduce_only: None,
            auto_borrow: None,
            auto_borrow_repay: None,
            auto_lend: None,
            auto_lend_redeem: None,
            stop_loss_trigger_price: None,
            stop_loss_trigger_by: None,
            stop_loss_limit_price: None,
            take_profit_trigger_price: None,
            take_profit_trigger_by: None,
            take_profit_limit_price: None,
            slippage_tolerance: None,
            slippage_tolerance_type: None,
        }
    }

    /// Shorthand for a limit order with price and quantity set.
    pub fn limit(symbol: &str, side: Side, price: &str, quantity: &str) -> Self {
        let mut order = Self::new(symbol, side, OrderType::Limit);
        order.price = Some(price.to_string());
        order.quantity = Some(quantity.to_string());
        order
    }

    /// Shorthand for a market order by base quantity.
    pub fn market(symbol: &str, side: Side, quantity: &str) -> Self {
        let mut order = Self::new(symbol, side, OrderType::Market);
        order.quantity = Some(quantity.to_string());
        order
    }

    /// The wire parameter set for this order.
    ///
    /// Limit orders carry price, quantity, and either `timeInForce` or
    /// `postOnly`; market orders carry one of `quantity`/`quoteQuantity`.
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("symbol", self.symbol.as_str());
        params.insert("side", self.side.as_str());
        params.insert("orderType", self.order_type.as_str());

        match self.order_type {
            OrderType::Limit => {
                params.insert_some("price", self.price.as_deref());
                params.insert_some("quantity", self.quantity.as_deref());
                match self.time_in_force {
                    Some(tif) => params.insert("timeInForce", tif.as_str()),
                    None => params.insert("postOnly", self.post_only),
                }
            }
            OrderType::Market => {
                if let Some(quantity) = self.quantity.as_deref() {
                    params.insert("quantity", quantity);
                } else if let Some(quote_quantity) = self.quote_quantity.as_deref() {
                    params.insert("quoteQuantity", quote_quantity);
                }
            }
        }

        params.insert_some("clientId", self.client_id);
        params.insert_some("brokerId", self.broker_id);
        params.insert_some(
            "selfTradePrevention",
            self.self_trade_prevention.map(SelfTradePrevention::as_str),
        );
        params.insert_some("triggerPrice", self.trigger_price.as_deref());
        params.insert_some("triggerBy", self.trigger_by.as_deref());
        params.insert_some("triggerQuantity", self.trigger_quantity.as_deref());
        params.insert_some("reduceOnly", self.reduce_only);
        params.insert_some("autoBorrow", self.auto_borrow);
        params.insert_some("autoBorrowRepay", self.auto_borrow_repay);
        params.insert_some("autoLend", self.auto_lend);
        params.insert_some("autoLendRedeem", self.auto_lend_redeem);
        params.insert_some(
            "stopLossTriggerPrice",
            self.stop_loss_trigger_price.as_deref(),
        );
        params.insert_some("stopLossTriggerBy", self.stop_loss_trigger_by.as_deref());
        params.insert_some("stopLossLimitPrice", self.stop_loss_limit_price.as_deref());
        params.insert_some(
            "takeProfitTriggerPrice",
            self.take_profit_trigger_price.as_deref(),
        );
        params.insert_some(
            "takeProfitTriggerBy",
            self.take_profit_trigger_by.as_deref(),
        );
        params.insert_some(
            "takeProfitLimitPrice",
            self.take_profit_limit_price.as_deref(),
        );
        params.insert_some("slippageTolerance", self.slippage_tolerance.as_deref());
        params.insert_some(
            "slippageToleranceType",
            self.slippage_tolerance_type
                .map(SlippageToleranceType::as_str),
        );
        params
    }
}

impl AuthenticatedClient {
    /// An open order resting on the book. One of `order_id` or `client_id`
    /// must be given.
    pub async fn get_open_order(
        &self,
        symbol: &str,
        order_id: Option<&str>,
        client_id: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert_some("orderId", order_id);
        params.insert_some("clientId", client_id);
        Ok(self
            .request(Method::GET, "api/v1/order", "orderQuery", Some(params))
            .await?
            .into_json())
    }

    /// Submit one order for execution.
    pub async fn execute_order(&self, order: &OrderRequest) -> Result<Value, BackpackError> {
        Ok(self
            .request_inner(
                Method::POST,
                "api/v1/order",
                "orderExecute",
                Some(order.to_params()),
                order.broker_id,
            )
            .await?
            .into_json())
    }

    /// Submit a batch of orders in one signed request. A `broker_id` set on
    /// any order applies only through the explicit argument here.
    pub async fn execute_batch_orders(
        &self,
        orders: &[OrderRequest],
        broker_id: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let order_params: Vec<Params> = orders.iter().map(OrderRequest::to_params).collect();
        Ok(self
            .request_batch("api/v1/orders", &order_params, broker_id)
            .await?
            .into_json())
    }

    /// Cancel an open order. One of `order_id` or `client_id` must be given.
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<&str>,
        client_id: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert_some("orderId", order_id);
        params.insert_some("clientId", client_id);
        Ok(self
            .request(Method::DELETE, "api/v1/order", "orderCancel", Some(params))
            .await?
            .into_json())
    }

    /// All open orders, optionally filtered by symbol or market type.
    pub async fn get_open_orders(
        &self,
        symbol: Option<&str>,
        market_type: Option<MarketType>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert_some("symbol", symbol);
        params.insert_some("marketType", market_type.map(MarketType::as_str));
        Ok(self
            .request(Method::GET, "api/v1/orders", "orderQueryAll", Some(params))
            .await?
            .into_json())
    }

    /// Cancel every open order on a market, optionally restricted to one
    /// order class.
    pub async fn cancel_open_orders(
        &self,
        symbol: &str,
        order_type: Option<CancelOrderType>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert_some("orderType", order_type.map(CancelOrderType::as_str));
        Ok(self
            .request(
                Method::DELETE,
                "api/v1/orders",
                "orderCancelAll",
                Some(params),
            )
            .await?
            .into_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn limit_order_without_tif_sends_post_only() {
        let order = OrderRequest::limit("SOL_USDC", Side::Bid, "132.5", "0.5");
        let value = order.to_params().to_value();
        assert_eq!(
            value,
            json!({
                "symbol": "SOL_USDC",
                "side": "Bid",
                "orderType": "Limit",
                "price": "132.5",
                "quantity": "0.5",
                "postOnly": false,
            })
        );
    }

    #[test]
    fn limit_order_with_tif_omits_post_only() {
        let mut order = OrderRequest::limit("SOL_USDC", Side::Ask, "140", "1");
        order.time_in_force = Some(TimeInForce::Ioc);
        let value = order.to_params().to_value();
        assert_eq!(value["timeInForce"], "IOC");
        assert!(value.get("postOnly").is_none());
    }

    #[test]
    fn market_order_prefers_base_quantity() {
        let mut order = OrderRequest::market("SOL_USDC", Side::Bid, "2");
        order.quote_quantity = Some("300".into());
        let value = order.to_params().to_value();
        assert_eq!(value["quantity"], "2");
        assert!(value.get("quoteQuantity").is_none());
        assert!(value.get("price").is_none());
    }

    #[test]
    fn market_order_falls_back_to_quote_quantity() {
        let mut order = OrderRequest::new("SOL_USDC", Side::Bid, OrderType::Market);
        order.quote_quantity = Some("300".into());
        let value = order.to_params().to_value();
        assert_eq!(value["quoteQuantity"], "300");
        assert!(value.get("quantity").is_none());
    }

    #[test]
    fn unset_options_stay_out_of_params() {
        let order = OrderRequest::market("SOL_USDC", Side::Ask, "1");
        let params = order.to_params();
        // symbol, side, orderType, quantity
        assert_eq!(params.len(), 4);
    }
}
