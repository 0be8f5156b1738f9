/// Request-for-quote endpoints.
use reqwest::Method;
use serde_json::Value;

use crate::client::AuthenticatedClient;
use crate::enums::Side;
use crate::errors::BackpackError;
use crate::signing::Params;

impl AuthenticatedClient {
    /// Submit an RFQ. Exactly one of `quantity` or `quote_quantity` should
    /// be given.
    pub async fn submit_rfq(
        &self,
        symbol: &str,
        side: Side,
        quantity: Option<&str>,
        quote_quantity: Option<&str>,
        client_rfq_id: Option<&str>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("symbol", symbol);
        params.insert("side", side.as_str());
        params.insert_some("quantity", quantity);
        params.insert_some("quoteQuantity", quote_quantity);
        params.insert_some("clientRfqId", client_rfq_id);
        Ok(self
            .request(Method::POST, "api/v1/rfq", "rfqSubmit", Some(params))
            .await?
            .into_json())
    }

    /// Submit a quote in response to an RFQ. Used by market makers.
    pub async fn submit_quote(
        &self,
        rfq_id: &str,
        price: &str,
        client_quote_id: Option<&str>,
    ) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("rfqId", rfq_id);
        params.insert("price", price);
        params.insert_some("clientQuoteId", client_quote_id);
        Ok(self
            .request(Method::POST, "api/v1/rfq/quote", "quoteSubmit", Some(params))
            .await?
            .into_json())
    }

    /// Accept a quote from a market maker.
    pub async fn accept_quote(&self, rfq_id: &str, quote_id: &str) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("rfqId", rfq_id);
        params.insert("quoteId", quote_id);
        Ok(self
            .request(
                Method::POST,
                "api/v1/rfq/accept",
                "quoteAccept",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Refresh an RFQ, extending its time window.
    pub async fn refresh_rfq(&self, rfq_id: &str) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("rfqId", rfq_id);
        Ok(self
            .request(
                Method::POST,
                "api/v1/rfq/refresh",
                "rfqRefresh",
                Some(params),
            )
            .await?
            .into_json())
    }

    /// Cancel an open RFQ.
    pub async fn cancel_rfq(&self, rfq_id: &str) -> Result<Value, BackpackError> {
        let mut params = Params::new();
        params.insert("rfqId", rfq_id);
        Ok(self
            .request(Method::POST, "api/v1/rfq/cancel", "rfqCancel", Some(params))
            .await?
            .into_json())
    }
}
