/// Unit tests for response classification and the error taxonomy.
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::StatusCode;
use serde_json::json;

use backpack_sdk::client::classify_response;
use backpack_sdk::{
    ApiErrorKind, ApiPayload, AuthenticatedClient, BackpackError, ClientConfig, Clock,
    PublicClient, RetryPolicy, DEFAULT_BASE_URL, DEFAULT_WINDOW,
};

#[test]
fn no_content_is_valueless_success() {
    let payload = classify_response(StatusCode::NO_CONTENT, "").unwrap();
    assert_eq!(payload, ApiPayload::None);
    assert_eq!(payload.into_json(), serde_json::Value::Null);
}

#[test]
fn empty_object_is_distinct_from_no_content() {
    let payload = classify_response(StatusCode::OK, "{}").unwrap();
    assert_eq!(payload, ApiPayload::Json(json!({})));
    assert_ne!(payload, ApiPayload::None);
}

#[test]
fn json_body_parses() {
    let payload = classify_response(StatusCode::OK, r#"{"symbol":"SOL_USDC"}"#).unwrap();
    assert_eq!(payload, ApiPayload::Json(json!({"symbol": "SOL_USDC"})));
}

#[test]
fn non_json_body_falls_back_to_text() {
    // The ping and time endpoints answer with bare text.
    let payload = classify_response(StatusCode::OK, "pong").unwrap();
    assert_eq!(payload, ApiPayload::Text("pong".to_string()));
    assert_eq!(payload.into_text(), "pong");
}

#[test]
fn error_envelope_maps_to_api_error() {
    let body = r#"{"code":"TOO_MANY_REQUESTS","message":"slow down"}"#;
    let err = classify_response(StatusCode::TOO_MANY_REQUESTS, body).unwrap_err();
    match err {
        BackpackError::Api {
            kind,
            code,
            message,
            status,
        } => {
            assert_eq!(kind, ApiErrorKind::RateLimited);
            assert_eq!(code.as_deref(), Some("TOO_MANY_REQUESTS"));
            assert_eq!(message.as_deref(), Some("slow down"));
            assert_eq!(status, 429);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn unknown_code_is_unrecognized_but_preserved() {
    let body = r#"{"code":"SOMETHING_NEW","message":"?"}"#;
    let err = classify_response(StatusCode::BAD_REQUEST, body).unwrap_err();
    match err {
        BackpackError::Api { kind, code, .. } => {
            assert_eq!(kind, ApiErrorKind::Unrecognized);
            assert_eq!(code.as_deref(), Some("SOMETHING_NEW"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn non_envelope_error_body_keeps_raw_text() {
    let err = classify_response(StatusCode::BAD_GATEWAY, "upstream unavailable").unwrap_err();
    match err {
        BackpackError::Api {
            kind,
            code,
            message,
            status,
        } => {
            assert_eq!(kind, ApiErrorKind::Unrecognized);
            assert_eq!(code, None);
            assert_eq!(message.as_deref(), Some("upstream unavailable"));
            assert_eq!(status, 502);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn error_kind_table() {
    assert_eq!(
        ApiErrorKind::from_code("INVALID_SIGNATURE"),
        ApiErrorKind::Unauthorized
    );
    assert_eq!(ApiErrorKind::from_code("FORBIDDEN"), ApiErrorKind::Forbidden);
    assert_eq!(
        ApiErrorKind::from_code("RATE_LIMIT_EXCEEDED"),
        ApiErrorKind::RateLimited
    );
    assert_eq!(
        ApiErrorKind::from_code("ORDER_NOT_FOUND"),
        ApiErrorKind::NotFound
    );
    assert_eq!(
        ApiErrorKind::from_code("INVALID_QUANTITY"),
        ApiErrorKind::InvalidRequest
    );
    assert_eq!(
        ApiErrorKind::from_code("INSUFFICIENT_MARGIN"),
        ApiErrorKind::InsufficientFunds
    );
    assert_eq!(
        ApiErrorKind::from_code("MAINTENANCE"),
        ApiErrorKind::Maintenance
    );
    assert_eq!(
        ApiErrorKind::from_code("MARKET_PAUSED"),
        ApiErrorKind::TradingPaused
    );
    assert_eq!(ApiErrorKind::from_code(""), ApiErrorKind::Unrecognized);
}

#[test]
fn retryability() {
    let rate_limited =
        classify_response(StatusCode::TOO_MANY_REQUESTS, r#"{"code":"TOO_MANY_REQUESTS"}"#)
            .unwrap_err();
    assert!(rate_limited.is_retryable());

    let server_error = classify_response(StatusCode::SERVICE_UNAVAILABLE, "down").unwrap_err();
    assert!(server_error.is_retryable());

    let bad_request =
        classify_response(StatusCode::BAD_REQUEST, r#"{"code":"INVALID_ORDER"}"#).unwrap_err();
    assert!(!bad_request.is_retryable());
}

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

#[test]
fn authenticated_client_accepts_injected_clock() {
    let seed = BASE64.encode([7u8; 32]);
    let client = AuthenticatedClient::new("api-key", &seed)
        .unwrap()
        .with_clock(Arc::new(FixedClock(1_700_000_000_000)));
    assert_eq!(client.credential().api_key(), "api-key");
    assert_eq!(client.config().window, DEFAULT_WINDOW);
}

#[test]
fn malformed_base_url_is_rejected_at_construction() {
    let config = ClientConfig {
        base_url: "not a url".to_string(),
        ..ClientConfig::default()
    };

    let err = PublicClient::with_config(config.clone()).unwrap_err();
    assert!(matches!(err, BackpackError::Url(_)));

    let seed = BASE64.encode([7u8; 32]);
    let err = AuthenticatedClient::with_config("api-key", &seed, config).unwrap_err();
    assert!(matches!(err, BackpackError::Url(_)));
}

#[test]
fn config_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.window, DEFAULT_WINDOW);
    assert!(config.retry.is_none());

    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert!(policy.retry_statuses.contains(&429));
    assert!(policy.retry_statuses.contains(&503));
}
