/// Credential handling for Backpack Exchange: ED25519 key material and signing.
///
/// The exchange authenticates requests with an ED25519 signature over a
/// canonical signing string. API keys are issued as a base64 verifying key
/// (the public identifier) plus a base64-encoded 32-byte private key seed.
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

use crate::errors::BackpackError;

/// An API credential: the public key identifier plus the decoded signing key.
///
/// Constructed once and shared by a client instance; never mutated and never
/// serialized back out. Malformed key material is rejected here, not on the
/// first signed request.
#[derive(Clone)]
pub struct Credential {
    api_key: String,
    signing_key: SigningKey,
}

impl Credential {
    /// Build a credential from a base64 API key and base64 private key seed.
    pub fn new(public_key: &str, secret_key: &str) -> Result<Credential, BackpackError> {
        if public_key.is_empty() {
            return Err(BackpackError::InvalidCredential("API key is empty".into()));
        }
        let seed = BASE64.decode(secret_key).map_err(|e| {
            BackpackError::InvalidCredential(format!("secret key is not valid base64: {e}"))
        })?;
        let seed: [u8; 32] = seed.as_slice().try_into().map_err(|_| {
            BackpackError::InvalidCredential(format!(
                "secret key seed must be 32 bytes, got {}",
                seed.len()
            ))
        })?;
        Ok(Credential {
            api_key: public_key.to_string(),
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// The public API key identifier sent in `X-API-Key`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a canonical string and return the base64 signature.
    ///
    /// ED25519 is deterministic: identical input yields identical output.
    pub fn sign(&self, message: &str) -> String {
        let signature = self.signing_key.sign(message.as_bytes());
        BASE64.encode(signature.to_bytes())
    }

    /// The verifying key matching the signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs.
        f.debug_struct("Credential")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}
