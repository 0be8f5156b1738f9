/// Error types for the Backpack Exchange SDK.
///
/// Three failure families matter to callers: credential problems caught at
/// construction, transport failures where no HTTP response was produced, and
/// structured API rejections carrying a server error code. The code string is
/// mapped to a closed [`ApiErrorKind`] through a static table.
use thiserror::Error;

/// Category of a structured API error, derived from the server `code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthorized,
    Forbidden,
    RateLimited,
    NotFound,
    InvalidRequest,
    InsufficientFunds,
    Maintenance,
    TradingPaused,
    /// A code not present in the mapping table. The original code string is
    /// preserved on the error itself.
    Unrecognized,
}

impl ApiErrorKind {
    /// Map a server error code to its category.
    pub fn from_code(code: &str) -> ApiErrorKind {
        match code {
            "UNAUTHORIZED" | "INVALID_API_KEY" | "INVALID_SIGNATURE" | "EXPIRED_SIGNATURE" => {
                ApiErrorKind::Unauthorized
            }
            "FORBIDDEN" => ApiErrorKind::Forbidden,
            "TOO_MANY_REQUESTS" | "RATE_LIMIT_EXCEEDED" => ApiErrorKind::RateLimited,
            "RESOURCE_NOT_FOUND" | "ORDER_NOT_FOUND" | "SYMBOL_NOT_FOUND" => ApiErrorKind::NotFound,
            "INVALID_REQUEST" | "INVALID_ORDER" | "INVALID_SYMBOL" | "INVALID_QUANTITY"
            | "INVALID_PRICE" => ApiErrorKind::InvalidRequest,
            "INSUFFICIENT_FUNDS" | "INSUFFICIENT_MARGIN" => ApiErrorKind::InsufficientFunds,
            "MAINTENANCE" | "SYSTEM_UNAVAILABLE" => ApiErrorKind::Maintenance,
            "TRADING_PAUSED" | "MARKET_PAUSED" | "ORDER_BOOK_CLOSED" => ApiErrorKind::TradingPaused,
            _ => ApiErrorKind::Unrecognized,
        }
    }
}

/// The primary error type for the Backpack SDK.
#[derive(Error, Debug)]
pub enum BackpackError {
    /// Malformed credential material. Surfaced at construction time and
    /// never retried.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The request never produced an HTTP response (DNS failure, connection
    /// refused, timeout). Distinct from an exchange rejection.
    #[error("transport error: {0}")]
    Transport(String),

    /// The exchange rejected the request with a non-2xx response.
    #[error("API error ({status}): {code:?} {message:?}")]
    Api {
        kind: ApiErrorKind,
        code: Option<String>,
        message: Option<String>,
        status: u16,
    },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("URL parse error: {0}")]
    Url(String),
}

impl BackpackError {
    /// Build an API error, categorizing the server code when present.
    pub(crate) fn api(status: u16, code: Option<String>, message: Option<String>) -> Self {
        let kind = code
            .as_deref()
            .map(ApiErrorKind::from_code)
            .unwrap_or(ApiErrorKind::Unrecognized);
        BackpackError::Api {
            kind,
            code,
            message,
            status,
        }
    }

    /// The error category when this is a structured API rejection.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            BackpackError::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// True for errors an outer retry policy may reasonably retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackpackError::Transport(_) => true,
            BackpackError::Api { kind, status, .. } => {
                *kind == ApiErrorKind::RateLimited || *status >= 500
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for BackpackError {
    fn from(err: reqwest::Error) -> Self {
        BackpackError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for BackpackError {
    fn from(err: serde_json::Error) -> Self {
        BackpackError::Json(err.to_string())
    }
}

impl From<url::ParseError> for BackpackError {
    fn from(err: url::ParseError) -> Self {
        BackpackError::Url(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for BackpackError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        BackpackError::WebSocket(err.to_string())
    }
}
