/// Historical query endpoints under `wapi/v1/history`.
use reqwest::Method;
use serde_json::Value;

use crate::client::AuthenticatedClient;
use crate::enums::{BorrowLendSide, FillType, MarketType, Side, SortDirection};
use crate::errors::BackpackError;
use crate::signing::Params;

/// Pagination and ordering shared by every history query.
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub limit: u32,
    pub offset: u32,
    pub sort_direction: Option<SortDirection>,
}

impl Default for HistoryPage {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
            sort_direction: None,
        }
    }
}

impl HistoryPage {
    fn apply(&self, params: &mut Params) {
        params.insert("limit", self.limit);
        params.insert("offset", self.offset);
        params.insert_some(
            "sortDirection",
            self.sort_direction.map(SortDirection::as_str),
        );
    }
}

impl AuthenticatedClient {
    /// Borrow and lend event history.
    pub async fn get_borrow_history(
        &self,
        event_type: Option<&str>,
        sources: Option<&str>,
        position_id: Option<&str>,
        symbol: Option<&str>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("type", event_type);
        params.insert_some("sources", sources);
        params.insert_some("positionId", position_id);
        params.insert_some("symbol", symbol);
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/borrowLend",
                "borrowHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Interest payment history for borrows and lends.
    pub async fn get_interest_history(
        &self,
        asset: Option<&str>,
        symbol: Option<&str>,
        position_id: Option<&str>,
        source: Option<&str>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("asset", asset);
        params.insert_some("symbol", symbol);
        params.insert_some("positionId", position_id);
        params.insert_some("source", source);
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/interest",
                "interestHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Borrow/lend position history. `state` is `Open` or `Closed`.
    pub async fn get_borrow_position_history(
        &self,
        symbol: Option<&str>,
        side: Option<BorrowLendSide>,
        state: Option<&str>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("symbol", symbol);
        params.insert_some("side", side.map(BorrowLendSide::as_str));
        params.insert_some("state", state);
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/borrowLend/positions",
                "borrowPositionHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Historical fills. Timestamps filter on Unix milliseconds.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_fill_history(
        &self,
        order_id: Option<&str>,
        strategy_id: Option<&str>,
        from: Option<u64>,
        to: Option<u64>,
        symbol: Option<&str>,
        fill_type: Option<FillType>,
        market_type: Option<MarketType>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("orderId", order_id);
        params.insert_some("strategyId", strategy_id);
        params.insert_some("from", from);
        params.insert_some("to", to);
        params.insert_some("symbol", symbol);
        params.insert_some("fillType", fill_type.map(FillType::as_str));
        params.insert_some("marketType", market_type.map(MarketType::as_str));
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/fills",
                "fillHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Funding payment history for futures positions.
    pub async fn get_funding_payments(
        &self,
        subaccount_id: Option<u64>,
        symbol: Option<&str>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("subaccountId", subaccount_id);
        params.insert_some("symbol", symbol);
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/funding",
                "fundingHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Order history for the account.
    pub async fn get_order_history(
        &self,
        order_id: Option<&str>,
        strategy_id: Option<&str>,
        symbol: Option<&str>,
        market_type: Option<MarketType>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("orderId", order_id);
        params.insert_some("strategyId", strategy_id);
        params.insert_some("symbol", symbol);
        params.insert_some("marketType", market_type.map(MarketType::as_str));
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/orders",
                "orderHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Settlement operation history.
    pub async fn get_settlement_history(
        &self,
        source: Option<&str>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("source", source);
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/settlement",
                "settlementHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Dust conversion history.
    pub async fn get_dust_history(
        &self,
        id: Option<&str>,
        symbol: Option<&str>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("id", id);
        params.insert_some("symbol", symbol);
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/dust",
                "dustHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// RFQ history.
    pub async fn get_rfq_history(
        &self,
        rfq_id: Option<&str>,
        symbol: Option<&str>,
        status: Option<&str>,
        side: Option<Side>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("rfqId", rfq_id);
        params.insert_some("symbol", symbol);
        params.insert_some("status", status);
        params.insert_some("side", side.map(Side::as_str));
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/rfq",
                "rfqHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Quote history.
    pub async fn get_quote_history(
        &self,
        quote_id: Option<&str>,
        symbol: Option<&str>,
        status: Option<&str>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("quoteId", quote_id);
        params.insert_some("symbol", symbol);
        params.insert_some("status", status);
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/quote",
                "quoteHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// RFQ fill history.
    pub async fn get_rfq_fill_history(
        &self,
        quote_id: Option<&str>,
        symbol: Option<&str>,
        side: Option<Side>,
        fill_type: Option<FillType>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("quoteId", quote_id);
        params.insert_some("symbol", symbol);
        params.insert_some("side", side.map(Side::as_str));
        params.insert_some("fillType", fill_type.map(FillType::as_str));
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/rfq/fill",
                "rfqFillHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Quote fill history.
    pub async fn get_quote_fill_history(
        &self,
        quote_id: Option<&str>,
        symbol: Option<&str>,
        side: Option<Side>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("quoteId", quote_id);
        params.insert_some("symbol", symbol);
        params.insert_some("side", side.map(Side::as_str));
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/quote/fill",
                "quoteFillHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Strategy history.
    pub async fn get_strategy_history(
        &self,
        strategy_id: Option<&str>,
        symbol: Option<&str>,
        market_type: Option<MarketType>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("strategyId", strategy_id);
        params.insert_some("symbol", symbol);
        params.insert_some("marketType", market_type.map(MarketType::as_str));
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/strategies",
                "strategyHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Position history.
    pub async fn get_position_history(
        &self,
        symbol: Option<&str>,
        state: Option<&str>,
        market_type: Option<MarketType>,
        page: &HistoryPage,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        page.apply(&mut params);
        params.insert_some("symbol", symbol);
        params.insert_some("state", state);
        params.insert_some("marketType", market_type.map(MarketType::as_str));
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/history/position",
                "positionHistoryQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }
}
