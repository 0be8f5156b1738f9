/// Balance, deposit, and withdrawal endpoints.
use reqwest::Method;
use serde_json::Value;

use crate::client::AuthenticatedClient;
use crate::enums::Blockchain;
use crate::errors::BackpackError;
use crate::signing::Params;

/// A withdrawal submission.
///
/// Construct with [`WithdrawalRequest::new`] and set the optional fields
/// directly; unset options stay out of both the JSON body and the signing
/// string.
#[derive(Debug, Clone)]
pub struct WithdrawalRequest {
    pub address: String,
    pub blockchain: Blockchain,
    pub quantity: String,
    pub symbol: String,
    pub client_id: Option<String>,
    /// Required when the destination address is not whitelisted.
    pub two_factor_token: Option<String>,
    pub auto_borrow: Option<bool>,
    pub auto_lend_redeem: Option<bool>,
}

impl WithdrawalRequest {
    pub fn new(address: &str, blockchain: Blockchain, quantity: &str, symbol: &str) -> Self {
        Self {
            address: address.to_string(),
            blockchain,
            quantity: quantity.to_string(),
            symbol: symbol.to_string(),
            client_id: None,
            two_factor_token: None,
            auto_borrow: None,
            auto_lend_redeem: None,
        }
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("address", self.address.as_str());
        params.insert("blockchain", self.blockchain.as_str());
        params.insert("quantity", self.quantity.as_str());
        params.insert("symbol", self.symbol.as_str());
        params.insert_some("clientId", self.client_id.as_deref());
        params.insert_some("twoFactorToken", self.two_factor_token.as_deref());
        params.insert_some("autoBorrow", self.auto_borrow);
        params.insert_some("autoLendRedeem", self.auto_lend_redeem);
        params
    }
}

impl AuthenticatedClient {
    /// Balances per asset, split into locked and available.
    pub async fn get_balances(&self) -> Result<Value, BackpackError> {
        Ok(self
            .request(Method::GET, "api/v1/capital", "balanceQuery", None)
            .await?
            .into_json())
    }

    /// Collateral information for the account.
    pub async fn get_account_collateral(
        &self,
        subaccount_id: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert_some("subaccountId", subaccount_id);
        Ok(self
            .request(
                Method::GET,
                "api/v1/capital/collateral",
                "collateralQuery",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Deposit history, paginated.
    pub async fn get_deposits(
        &self,
        from: Option<u64>,
        to: Option<u64>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("limit", limit.unwrap_or(100));
        params.insert("offset", offset.unwrap_or(0));
        params.insert_some("from", from);
        params.insert_some("to", to);
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/capital/deposits",
                "depositQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// The account's deposit address on a blockchain.
    pub async fn get_deposit_address(
        &self,
        blockchain: Blockchain,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("blockchain", blockchain.as_str());
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/capital/deposit/address",
                "depositAddressQuery",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Withdrawal history, paginated.
    pub async fn get_withdrawals(
        &self,
        from: Option<u64>,
        to: Option<u64>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("limit", limit.unwrap_or(100));
        params.insert("offset", offset.unwrap_or(0));
        params.insert_some("from", from);
        params.insert_some("to", to);
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/capital/withdrawals",
                "withdrawalQueryAll",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Request a withdrawal.
    pub async fn request_withdrawal(
        &self,
        withdrawal: &WithdrawalRequest,
    ) -> Result<Value, BackpackError> {
        Ok(self
            .request(
                Method::POST,
                "wapi/v1/capital/withdrawals",
                "withdraw",
                Some(withdrawal.to_params()),
            )
            .await?
            .into_json())
    }

    /// Convert a dust balance to USDC. The balance must be below the
    /// minimum tradable quantity on the spot order book.
    pub async fn convert_dust(&self, symbol: &str) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        Ok(self
            .request(
                Method::POST,
                "api/v1/account/convertDust",
                "convertDust",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Current withdrawal delay configuration.
    pub async fn get_withdrawal_delay(&self) -> Result<Value, BackpackError> {
        Ok(self
            .request(
                Method::GET,
                "wapi/v1/capital/withdrawals/delay",
                "withdrawalDelayQuery",
                None,
            )
            .await?
            .into_json())
    }

    /// Enable a withdrawal delay for non-whitelisted addresses.
    pub async fn create_withdrawal_delay(
        &self,
        withdrawal_delay_hours: u32,
        two_factor_token: &str,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("withdrawalDelayHours", withdrawal_delay_hours);
        params.insert("twoFactorToken", two_factor_token);
        Ok(self
            .request(
                Method::POST,
                "wapi/v1/capital/withdrawals/delay",
                "withdrawalDelayCreate",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Change the withdrawal delay. Takes effect after the current delay
    /// period ends.
    pub async fn update_withdrawal_delay(
        &self,
        withdrawal_delay_hours: u32,
        two_factor_token: &str,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("withdrawalDelayHours", withdrawal_delay_hours);
        params.insert("twoFactorToken", two_factor_token);
        Ok(self
            .request(
                Method::PATCH,
                "wapi/v1/capital/withdrawals/delay",
                "withdrawalDelayUpdate",
                Some(params),
            )
            .await?
            .into_json())
    }
}
