//! Authenticated request signing.
//!
//! The v2 scheme: `signature = hex(HMAC-SHA384(secret, "/api/" + path +
//! nonce + rawBody))`, sent alongside the key and nonce as headers. The
//! nonce is epoch milliseconds and must be strictly increasing per key.

use crate::error::{ExchangeError, ExchangeResult};
use hmac::{Hmac, Mac};
use sha2::Sha384;

type HmacSha384 = Hmac<Sha384>;

/// API credentials, loaded from the environment by the caller.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Load from `BFX_API_KEY` / `BFX_API_SECRET`.
    pub fn from_env() -> ExchangeResult<Self> {
        let api_key = std::env::var("BFX_API_KEY")
            .map_err(|_| ExchangeError::MissingCredentials("BFX_API_KEY not set".to_string()))?;
        let api_secret = std::env::var("BFX_API_SECRET")
            .map_err(|_| ExchangeError::MissingCredentials("BFX_API_SECRET not set".to_string()))?;
        Ok(Self::new(api_key, api_secret))
    }

    /// Sign one authenticated request.
    ///
    /// `path` is the endpoint path without a leading slash, e.g.
    /// `v2/auth/w/funding/offer/submit`.
    pub fn sign(&self, path: &str, nonce: &str, body: &str) -> ExchangeResult<String> {
        let payload = format!("/api/{path}{nonce}{body}");
        let mut mac = HmacSha384::new_from_slice(self.api_secret.as_bytes())
            .map_err(|e| ExchangeError::Http(format!("Invalid HMAC key: {e}")))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
