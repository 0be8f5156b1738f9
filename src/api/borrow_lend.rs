/// Borrow/lend and position endpoints.
use reqwest::Method;
use serde_json::Value;

use crate::client::AuthenticatedClient;
use crate::enums::{BorrowLendSide, MarketType};
use crate::errors::BackpackError;
use crate::signing::Params;

impl AuthenticatedClient {
    /// All open borrow/lend positions for the account.
    pub async fn get_borrow_lend_positions(&self) -> Result<Value, BackpackError> {
        Ok(self
            .request(
                Method::GET,
                "api/v1/borrowLend/positions",
                "borrowLendPositionQuery",
                None,
            )
            .await?
            .into_json())
    }

    /// Execute a borrow or lend. The server acknowledges with no body.
    pub async fn execute_borrow_lend(
        &self,
        quantity: &str,
        side: BorrowLendSide,
        symbol: &str,
    ) -> Result<(), BackpackError> {
        let mut params = Params::new();
        params.insert("quantity", quantity);
        params.insert("side", side.as_str());
        params.insert("symbol", symbol);
        self.request(
            Method::POST,
            "api/v1/borrowLend",
            "borrowLendExecute",
            Some(params),
        )
        .await?;
        Ok(())
    }

    /// Estimated liquidation price for a prospective borrow/lend position.
    /// `borrow` is the base64-encoded JSON execute payload.
    pub async fn get_estimated_liquidation_price(
        &self,
        borrow: &str,
        subaccount_id: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("borrow", borrow);
        params.insert_some("subaccountId", subaccount_id);
        Ok(self
            .request(
                Method::GET,
                "api/v1/borrowLend/position/liquidationPrice",
                "borrowLendPositionLiquidationPrice",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Open futures positions, optionally filtered.
    pub async fn get_open_positions(
        &self,
        symbol: Option<&str>,
        market_type: Option<MarketType>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert_some("symbol", symbol);
        params.insert_some("marketType", market_type.map(MarketType::as_str));
        Ok(self
            .request(Method::GET, "api/v1/position", "positionQuery", Some(params))
            .await?
            .into_json())
    }
}
