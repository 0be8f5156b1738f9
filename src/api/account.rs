/// Account settings and trading-limit endpoints.
use reqwest::Method;
use serde_json::Value;

use crate::client::AuthenticatedClient;
use crate::enums::Side;
use crate::errors::BackpackError;
use crate::signing::Params;

impl AuthenticatedClient {
    /// Account settings.
    pub async fn get_account(&self) -> Result<Value, BackpackError> {
        Ok(self
            .request(Method::GET, "api/v1/account", "accountQuery", None)
            .await?
            .into_json())
    }

    /// Update account settings. Only the provided fields change.
    pub async fn update_account(
        &self,
        auto_borrow_settlements: Option<bool>,
        auto_lend: Option<bool>,
        auto_repay_borrows: Option<bool>,
        leverage_limit: Option<&str>,
    ) -> Result<(), BackpackError> {
        let mut params = Params::new();
        params.insert_some("autoBorrowSettlements", auto_borrow_settlements);
        params.insert_some("autoLend", auto_lend);
        params.insert_some("autoRepayBorrows", auto_repay_borrows);
        params.insert_some("leverageLimit", leverage_limit);
        self.request(
            Method::PATCH,
            "api/v1/account",
            "accountUpdate",
            Some(params),
        )
        .await?;
        Ok(())
    }

    /// Maximum quantity the account can borrow for an asset.
    pub async fn get_max_borrow_quantity(&self, symbol: &str) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        Ok(self
            .request(
                Method::GET,
                "api/v1/account/limits/borrow",
                "maxBorrowQuantity",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Maximum quantity the account can trade on a market.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_max_order_quantity(
        &self,
        symbol: &str,
        side: Side,
        price: Option<&str>,
        reduce_only: Option<bool>,
        auto_borrow: Option<bool>,
        auto_borrow_repay: Option<bool>,
        auto_lend_redeem: Option<bool>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert("side", side.as_str());
        params.insert_some("price", price);
        params.insert_some("reduceOnly", reduce_only);
        params.insert_some("autoBorrow", auto_borrow);
        params.insert_some("autoBorrowRepay", auto_borrow_repay);
        params.insert_some("autoLendRedeem", auto_lend_redeem);
        Ok(self
            .request(
                Method::GET,
                "api/v1/account/limits/order",
                "maxOrderQuantity",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Maximum quantity the account can withdraw for an asset.
    pub async fn get_max_withdrawal_quantity(
        &self,
        symbol: &str,
        auto_borrow: Option<bool>,
        auto_lend_redeem: Option<bool>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert_some("autoBorrow", auto_borrow);
        params.insert_some("autoLendRedeem", auto_lend_redeem);
        Ok(self
            .request(
                Method::GET,
                "api/v1/account/limits/withdrawal",
                "maxWithdrawalQuantity",
                Some(params),
            )
            .await?
            .into_json())
    }
}
