/// Unit tests for credential handling and canonical signing-string
/// construction.
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signature, Verifier};

use backpack_sdk::signing::{
    auth_headers, batch_auth_headers, build_batch_signing_string, build_signing_string,
    ws_auth_headers, Params, DEFAULT_WINDOW,
};
use backpack_sdk::{BackpackError, Credential};

fn test_credential() -> Credential {
    let seed = BASE64.encode([0x42u8; 32]);
    Credential::new("test-api-key", &seed).unwrap()
}

#[test]
fn credential_rejects_empty_api_key() {
    let seed = BASE64.encode([0u8; 32]);
    let err = Credential::new("", &seed).unwrap_err();
    assert!(matches!(err, BackpackError::InvalidCredential(_)));
}

#[test]
fn credential_rejects_invalid_base64_seed() {
    let err = Credential::new("key", "not base64 !!!").unwrap_err();
    assert!(matches!(err, BackpackError::InvalidCredential(_)));
}

#[test]
fn credential_rejects_wrong_seed_length() {
    let short = BASE64.encode([0u8; 16]);
    let err = Credential::new("key", &short).unwrap_err();
    assert!(matches!(err, BackpackError::InvalidCredential(_)));
}

#[test]
fn credential_debug_hides_key_material() {
    let credential = test_credential();
    let debug = format!("{credential:?}");
    assert!(debug.contains("test-api-key"));
    assert!(!debug.contains("signing_key"));
}

#[test]
fn signing_string_without_params() {
    let s = build_signing_string("balanceQuery", None, 1_700_000_000_000, 5_000);
    assert_eq!(
        s,
        "instruction=balanceQuery&timestamp=1700000000000&window=5000"
    );
}

#[test]
fn empty_params_same_as_absent() {
    let params = Params::new();
    let with_empty = build_signing_string("balanceQuery", Some(&params), 1, 5_000);
    let without = build_signing_string("balanceQuery", None, 1, 5_000);
    assert_eq!(with_empty, without);
}

#[test]
fn params_sorted_bytewise() {
    let mut params = Params::new();
    params.insert("symbol", "SOL_USDC");
    params.insert("limit", 100);
    params.insert("offset", 0);
    let s = build_signing_string("orderQueryAll", Some(&params), 1, 5_000);
    assert_eq!(
        s,
        "instruction=orderQueryAll&limit=100&offset=0&symbol=SOL_USDC&timestamp=1&window=5000"
    );
}

#[test]
fn booleans_render_lowercase() {
    let mut params = Params::new();
    params.insert("postOnly", true);
    params.insert("reduceOnly", false);
    let s = build_signing_string("orderExecute", Some(&params), 1, 5_000);
    assert_eq!(
        s,
        "instruction=orderExecute&postOnly=true&reduceOnly=false&timestamp=1&window=5000"
    );
}

#[test]
fn falsy_values_are_kept() {
    // Explicitly set empty strings and zeros must appear in the canonical
    // string; only unset parameters are omitted.
    let mut params = Params::new();
    params.insert("clientId", 0);
    params.insert("note", "");
    params.insert_some::<&str>("memo", None);
    let s = build_signing_string("orderExecute", Some(&params), 1, 5_000);
    assert_eq!(
        s,
        "instruction=orderExecute&clientId=0&note=&timestamp=1&window=5000"
    );
}

#[test]
fn insertion_order_does_not_matter() {
    let mut a = Params::new();
    a.insert("symbol", "SOL_USDC");
    a.insert("side", "Bid");
    let mut b = Params::new();
    b.insert("side", "Bid");
    b.insert("symbol", "SOL_USDC");
    assert_eq!(
        build_signing_string("orderExecute", Some(&a), 1, 5_000),
        build_signing_string("orderExecute", Some(&b), 1, 5_000)
    );
}

#[test]
fn batch_signing_string_concatenates_fragments() {
    let mut first = Params::new();
    first.insert("symbol", "SOL_USDC_PERP");
    first.insert("side", "Bid");
    first.insert("price", "141");
    let mut second = Params::new();
    second.insert("symbol", "SOL_USDC_PERP");
    second.insert("side", "Bid");
    second.insert("price", "140");

    let s = build_batch_signing_string(&[first, second], 1_700_000_000_000, 5_000);
    assert_eq!(
        s,
        "instruction=orderExecute&price=141&side=Bid&symbol=SOL_USDC_PERP\
         &instruction=orderExecute&price=140&side=Bid&symbol=SOL_USDC_PERP\
         &timestamp=1700000000000&window=5000"
    );
}

#[test]
fn batch_preserves_order_sequence() {
    let mut a = Params::new();
    a.insert("price", "1");
    let mut b = Params::new();
    b.insert("price", "2");

    let forward = build_batch_signing_string(&[a.clone(), b.clone()], 1, 5_000);
    let reverse = build_batch_signing_string(&[b, a], 1, 5_000);
    assert_ne!(forward, reverse);
}

#[test]
fn empty_batch_signs_timestamp_block_only() {
    let s = build_batch_signing_string(&[], 1_700_000_000_000, 5_000);
    assert_eq!(s, "timestamp=1700000000000&window=5000");
}

#[test]
fn signature_is_deterministic() {
    let credential = test_credential();
    let message = "instruction=balanceQuery&timestamp=1700000000000&window=5000";
    assert_eq!(credential.sign(message), credential.sign(message));
}

#[test]
fn signature_verifies_against_public_key() {
    let credential = test_credential();
    let message = "instruction=balanceQuery&timestamp=1700000000000&window=5000";
    let encoded = credential.sign(message);

    let raw = BASE64.decode(&encoded).unwrap();
    let signature = Signature::from_slice(&raw).unwrap();
    credential
        .verifying_key()
        .verify(message.as_bytes(), &signature)
        .unwrap();
}

#[test]
fn auth_headers_carry_timestamp_and_window() {
    let credential = test_credential();
    let headers = auth_headers(&credential, "balanceQuery", None, 1_700_000_000_000, 5_000);
    assert_eq!(headers.api_key, "test-api-key");
    assert_eq!(headers.timestamp, "1700000000000");
    assert_eq!(headers.window, "5000");
    assert!(!headers.signature.is_empty());
}

#[test]
fn batch_headers_sign_concatenated_string() {
    let credential = test_credential();
    let mut order = Params::new();
    order.insert("symbol", "SOL_USDC");
    let headers = batch_auth_headers(&credential, std::slice::from_ref(&order), 1, 5_000);

    let expected = credential.sign(&build_batch_signing_string(&[order], 1, 5_000));
    assert_eq!(headers.signature, expected);
}

#[test]
fn ws_auth_uses_fixed_subscribe_instruction() {
    let credential = test_credential();
    let headers = ws_auth_headers(&credential, 1_700_000_000_000, DEFAULT_WINDOW);

    let expected = credential.sign(&build_signing_string(
        "subscribe",
        None,
        1_700_000_000_000,
        DEFAULT_WINDOW,
    ));
    assert_eq!(headers.signature, expected);
}
