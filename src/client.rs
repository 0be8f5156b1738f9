/// REST dispatch for Backpack Exchange.
///
/// [`PublicClient`] covers the unauthenticated market-data endpoints.
/// [`AuthenticatedClient`] signs every request with the ED25519 credential:
/// it captures a timestamp, builds the instruction's canonical string,
/// attaches the auth headers, and classifies the response. Both are
/// stateless per call and safe to share across tasks; the only shared pieces
/// are the immutable credential and the reqwest connection pool.
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, RetryPolicy};
use crate::crypto::Credential;
use crate::errors::BackpackError;
use crate::signing::{auth_headers, batch_auth_headers, AuthHeaders, Params};

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Timestamp source injected into the dispatcher so request signing is
/// reproducible in tests.
pub trait Clock: Send + Sync {
    /// Current Unix time in integer milliseconds.
    fn now_millis(&self) -> u64;
}

/// The system wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Body of a successful API response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    /// 204 No Content. Distinct from a 200 carrying an empty JSON object.
    None,
    /// 2xx with a JSON body.
    Json(Value),
    /// 2xx with a non-JSON body; ping/time respond with plain text.
    Text(String),
}

impl ApiPayload {
    /// The payload as JSON. `None` maps to `Value::Null` and plain text to a
    /// JSON string.
    pub fn into_json(self) -> Value {
        match self {
            ApiPayload::None => Value::Null,
            ApiPayload::Json(v) => v,
            ApiPayload::Text(t) => Value::String(t),
        }
    }

    /// The payload as text.
    pub fn into_text(self) -> String {
        match self {
            ApiPayload::None => String::new(),
            ApiPayload::Json(v) => v.to_string(),
            ApiPayload::Text(t) => t,
        }
    }
}

/// Classify one HTTP response under the dispatch contract.
///
/// Kept pure so status/body handling is testable without a server:
/// 204 is a valueless success, other 2xx bodies parse as JSON or fall back
/// to raw text, and non-2xx responses are mapped through the `{code,
/// message}` envelope when one is present.
pub fn classify_response(status: StatusCode, body: &str) -> Result<ApiPayload, BackpackError> {
    if status.is_success() {
        if status == StatusCode::NO_CONTENT {
            return Ok(ApiPayload::None);
        }
        return match serde_json::from_str::<Value>(body) {
            Ok(v) => Ok(ApiPayload::Json(v)),
            Err(_) => Ok(ApiPayload::Text(body.to_string())),
        };
    }
    if let Ok(envelope) = serde_json::from_str::<Value>(body) {
        let code = envelope
            .get("code")
            .and_then(|c| c.as_str())
            .map(String::from);
        let message = envelope
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from);
        if code.is_some() || message.is_some() {
            return Err(BackpackError::api(status.as_u16(), code, message));
        }
    }
    Err(BackpackError::api(
        status.as_u16(),
        None,
        Some(body.to_string()),
    ))
}

/// True when the configured policy wants another attempt for this error.
fn policy_retries(policy: &RetryPolicy, err: &BackpackError) -> bool {
    match err {
        BackpackError::Transport(_) => true,
        BackpackError::Api { status, .. } => policy.retry_statuses.contains(status),
        _ => false,
    }
}

/// Client for public (unauthenticated) endpoints.
#[derive(Debug, Clone)]
pub struct PublicClient {
    http: Client,
    config: ClientConfig,
}

impl PublicClient {
    pub fn new() -> Result<PublicClient, BackpackError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<PublicClient, BackpackError> {
        Url::parse(&config.base_url)?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(PublicClient { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) async fn get(
        &self,
        endpoint: &str,
        params: Option<&Params>,
    ) -> Result<ApiPayload, BackpackError> {
        debug!("public.get endpoint={endpoint}");
        let url = format!("{}{}", self.config.base_url, endpoint);
        let retry = self.config.retry.clone();
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let mut request = self.http.get(&url);
            if let Some(params) = params {
                request = request.query(&params.query_pairs());
            }
            let result = send_and_classify(request).await;
            match result {
                Ok(payload) => return Ok(payload),
                Err(err) => {
                    if let Some(policy) = &retry {
                        if attempt < policy.max_attempts && policy_retries(policy, &err) {
                            debug!("public.get retry attempt={attempt} error={err}");
                            tokio::time::sleep(policy.backoff * attempt).await;
                            continue;
                        }
                    }
                    return Err(err);
                }
            }
        }
    }
}

async fn send_and_classify(request: reqwest::RequestBuilder) -> Result<ApiPayload, BackpackError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    classify_response(status, &body)
}

/// Client for authenticated endpoints.
///
/// Each call owns its timestamp and signing computation, so concurrent use
/// needs no locking.
#[derive(Clone)]
pub struct AuthenticatedClient {
    http: Client,
    config: ClientConfig,
    credential: Credential,
    clock: Arc<dyn Clock>,
}

impl AuthenticatedClient {
    /// Build a client from a base64 API key and base64 secret key seed.
    pub fn new(public_key: &str, secret_key: &str) -> Result<AuthenticatedClient, BackpackError> {
        Self::with_config(public_key, secret_key, ClientConfig::default())
    }

    pub fn with_config(
        public_key: &str,
        secret_key: &str,
        config: ClientConfig,
    ) -> Result<AuthenticatedClient, BackpackError> {
        Url::parse(&config.base_url)?;
        let credential = Credential::new(public_key, secret_key)?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(AuthenticatedClient {
            http,
            config,
            credential,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the timestamp source. Intended for tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Sign and dispatch one request.
    ///
    /// GET sends the parameters as a query string; every other method sends
    /// them as a JSON body. Either way the signature covers the identical
    /// parameter set.
    pub(crate) async fn request(
        &self,
        method: Method,
        endpoint: &str,
        instruction: &str,
        params: Option<Params>,
    ) -> Result<ApiPayload, BackpackError> {
        self.request_inner(method, endpoint, instruction, params, None)
            .await
    }

    pub(crate) async fn request_inner(
        &self,
        method: Method,
        endpoint: &str,
        instruction: &str,
        params: Option<Params>,
        broker_id: Option<u64>,
    ) -> Result<ApiPayload, BackpackError> {
        let timestamp = self.clock.now_millis();
        let headers = auth_headers(
            &self.credential,
            instruction,
            params.as_ref(),
            timestamp,
            self.config.window,
        );
        debug!(
            "client.request method={method} endpoint={endpoint} instruction={instruction} params={}",
            params.as_ref().map_or(0, Params::len)
        );
        let url = format!("{}{}", self.config.base_url, endpoint);
        let body = params
            .as_ref()
            .filter(|p| !p.is_empty())
            .map(Params::to_value);

        self.execute(|| {
            let mut request = self
                .apply_headers(self.http.request(method.clone(), &url), &headers)
                .header("Content-Type", CONTENT_TYPE_JSON);
            if method == Method::GET {
                if let Some(params) = &params {
                    request = request.query(&params.query_pairs());
                }
            } else if let Some(body) = &body {
                request = request.json(body);
            }
            if let Some(broker_id) = broker_id {
                request = request.header("X-Broker-Id", broker_id.to_string());
            }
            request
        })
        .await
    }

    /// Sign and POST a batch order submission.
    ///
    /// The batch signing string concatenates one fragment per order; the
    /// body is the JSON array of the same order parameter sets.
    pub(crate) async fn request_batch(
        &self,
        endpoint: &str,
        orders: &[Params],
        broker_id: Option<u64>,
    ) -> Result<ApiPayload, BackpackError> {
        let timestamp = self.clock.now_millis();
        let headers = batch_auth_headers(&self.credential, orders, timestamp, self.config.window);
        debug!(
            "client.request_batch endpoint={endpoint} orders={}",
            orders.len()
        );
        let url = format!("{}{}", self.config.base_url, endpoint);
        let body = Value::Array(orders.iter().map(Params::to_value).collect());

        self.execute(|| {
            let mut request = self
                .apply_headers(self.http.post(&url), &headers)
                .header("Content-Type", CONTENT_TYPE_JSON)
                .json(&body);
            if let Some(broker_id) = broker_id {
                request = request.header("X-Broker-Id", broker_id.to_string());
            }
            request
        })
        .await
    }

    fn apply_headers(
        &self,
        request: reqwest::RequestBuilder,
        headers: &AuthHeaders,
    ) -> reqwest::RequestBuilder {
        request
            .header("X-API-Key", &headers.api_key)
            .header("X-Signature", &headers.signature)
            .header("X-Timestamp", &headers.timestamp)
            .header("X-Window", &headers.window)
    }

    /// Dispatch with the optional transport retry policy. Each attempt
    /// rebuilds the request; the signature is not recomputed, which keeps
    /// retries inside the original acceptance window.
    async fn execute<F>(&self, build: F) -> Result<ApiPayload, BackpackError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let retry = self.config.retry.clone();
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match send_and_classify(build()).await {
                Ok(payload) => return Ok(payload),
                Err(err) => {
                    if let Some(policy) = &retry {
                        if attempt < policy.max_attempts && policy_retries(policy, &err) {
                            debug!("client.retry attempt={attempt} error={err}");
                            tokio::time::sleep(policy.backoff * attempt).await;
                            continue;
                        }
                    }
                    return Err(err);
                }
            }
        }
    }
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("config", &self.config)
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}
