//! Request signing for authenticated endpoints.
//!
//! The exchange authenticates signed endpoints with an HMAC-SHA256 of
//! the exact query string sent, hex-encoded and appended as the last
//! parameter. Re-ordering or re-encoding the query after signing
//! invalidates the signature.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{TransportError, TransportResult};

type HmacSha256 = Hmac<Sha256>;

/// API key/secret pair for signed endpoints.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
}

impl Credentials {
    #[must_use]
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Sign a query string with the account secret.
pub fn sign_query(secret: &str, query: &str) -> TransportResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| TransportError::Signature(format!("HMAC init failed: {e}")))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
