/// Canonical signing-string construction for Backpack Exchange requests.
///
/// Every authenticated call signs the string
/// `instruction={instruction}{&sorted params}&timestamp={ts}&window={w}`.
/// Batch order submission concatenates one such fragment per order instead,
/// with a single timestamp/window suffix, and signs the result once.
///
/// The strings here must be byte-exact: a reordered key or an uppercased
/// boolean produces a signature the exchange rejects.
use serde_json::{Map, Value};

use crate::crypto::Credential;

/// Default server-side signature acceptance window in milliseconds.
pub const DEFAULT_WINDOW: u64 = 5_000;

/// Instruction prefixing every order fragment in a batch signing string,
/// regardless of what the surrounding operation is called.
const BATCH_INSTRUCTION: &str = "orderExecute";

/// Fixed instruction for WebSocket private-stream authentication.
const WS_INSTRUCTION: &str = "subscribe";

/// An ordered string-to-scalar parameter set for one request.
///
/// Holds the exact fields the caller set: optional parameters that were never
/// provided must not be inserted, while explicitly set falsy values (`""`,
/// `0`, `false`) are kept. That distinction is the caller's job; nothing here
/// filters values.
#[derive(Debug, Clone, Default)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Params {
        Params(Map::new())
    }

    /// Set a parameter. Accepts strings, integers, and booleans.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Set a parameter only when the caller provided a value.
    pub fn insert_some<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The JSON body this parameter set signs for.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// `key=value` texts in byte-wise ascending key order, booleans rendered
    /// lowercase. Sorted explicitly so the result does not depend on the map
    /// backing.
    fn sorted_pairs(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &Value)> = self.0.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        entries
            .into_iter()
            .map(|(k, v)| format!("{k}={}", scalar_text(v)))
            .collect()
    }

    /// Key/value pairs for GET query-string dispatch.
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), scalar_text(v)))
            .collect()
    }
}

/// Render a scalar the way it appears in the signing string: strings bare,
/// booleans lowercase, numbers in decimal.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Build the canonical signing string for a single request.
///
/// An empty or absent parameter set contributes nothing: the instruction
/// field is immediately followed by the timestamp block, with no stray `&`.
pub fn build_signing_string(
    instruction: &str,
    params: Option<&Params>,
    timestamp: u64,
    window: u64,
) -> String {
    let mut out = format!("instruction={instruction}");
    if let Some(params) = params {
        for pair in params.sorted_pairs() {
            out.push('&');
            out.push_str(&pair);
        }
    }
    out.push_str(&format!("&timestamp={timestamp}&window={window}"));
    out
}

/// Build the canonical signing string for batch order submission.
///
/// Orders keep their caller-supplied sequence; only keys within each order
/// are sorted. Every fragment carries its own `instruction=orderExecute`
/// prefix, and the timestamp block appears exactly once at the end.
///
/// An empty batch signs `timestamp={ts}&window={w}` with no leading `&`.
pub fn build_batch_signing_string(orders: &[Params], timestamp: u64, window: u64) -> String {
    let mut fragments = Vec::with_capacity(orders.len());
    for order in orders {
        let mut fragment = format!("instruction={BATCH_INSTRUCTION}");
        for pair in order.sorted_pairs() {
            fragment.push('&');
            fragment.push_str(&pair);
        }
        fragments.push(fragment);
    }
    let suffix = format!("timestamp={timestamp}&window={window}");
    if fragments.is_empty() {
        suffix
    } else {
        format!("{}&{}", fragments.join("&"), suffix)
    }
}

/// The header set derived for one authenticated request. Stateless, built
/// fresh per call and discarded after dispatch.
#[derive(Debug, Clone)]
pub struct AuthHeaders {
    pub api_key: String,
    pub signature: String,
    pub timestamp: String,
    pub window: String,
}

/// Sign a single request and assemble its headers.
pub fn auth_headers(
    credential: &Credential,
    instruction: &str,
    params: Option<&Params>,
    timestamp: u64,
    window: u64,
) -> AuthHeaders {
    let signing_string = build_signing_string(instruction, params, timestamp, window);
    AuthHeaders {
        api_key: credential.api_key().to_string(),
        signature: credential.sign(&signing_string),
        timestamp: timestamp.to_string(),
        window: window.to_string(),
    }
}

/// Sign a batch order submission and assemble its headers.
pub fn batch_auth_headers(
    credential: &Credential,
    orders: &[Params],
    timestamp: u64,
    window: u64,
) -> AuthHeaders {
    let signing_string = build_batch_signing_string(orders, timestamp, window);
    AuthHeaders {
        api_key: credential.api_key().to_string(),
        signature: credential.sign(&signing_string),
        timestamp: timestamp.to_string(),
        window: window.to_string(),
    }
}

/// Sign the WebSocket private-stream subscription: the fixed `subscribe`
/// instruction with an empty parameter set.
pub fn ws_auth_headers(credential: &Credential, timestamp: u64, window: u64) -> AuthHeaders {
    auth_headers(credential, WS_INSTRUCTION, None, timestamp, window)
}
