//! Coinbase Exchange request signing.
//!
//! `CB-ACCESS-SIGN` is the base64 HMAC-SHA256 of
//! `timestamp + method + request_path + body`, keyed with the base64-decoded
//! API secret.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{ExchangeError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Coinbase Exchange API credentials.
pub struct CoinbaseSigner {
    api_key: String,
    secret: Vec<u8>,
    passphrase: String,
}

impl CoinbaseSigner {
    /// Fails if `api_secret` is not valid base64.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: &str,
        passphrase: impl Into<String>,
    ) -> Result<Self> {
        let secret = STANDARD
            .decode(api_secret.trim())
            .map_err(|e| ExchangeError::AuthFailed(format!("API secret is not base64: {e}")))?;
        Ok(Self {
            api_key: api_key.into(),
            secret,
            passphrase: passphrase.into(),
        })
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// Request timestamp in whole seconds since the epoch.
    #[must_use]
    pub fn timestamp(now: DateTime<Utc>) -> String {
        now.timestamp().to_string()
    }

    pub fn sign(&self, timestamp: &str, method: &str, path: &str, body: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| ExchangeError::AuthFailed(e.to_string()))?;
        mac.update(timestamp.as_bytes());
        mac.update(method.as_bytes());
        mac.update(path.as_bytes());
        mac.update(body.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl fmt::Debug for CoinbaseSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinbaseSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // base64("coinbase-secret-key")
    const SECRET: &str = "Y29pbmJhc2Utc2VjcmV0LWtleQ==";

    #[test]
    fn signs_get_without_body() {
        let signer = CoinbaseSigner::new("key", SECRET, "pass").unwrap();
        let sig = signer.sign("1700000000", "GET", "/accounts", "").unwrap();
        assert_eq!(sig, "xLcB+YF4Fy9loLfNvBl81XfhLQmJ1RgKU1I2Cb3SFAU=");
    }

    #[test]
    fn signs_post_with_body() {
        let signer = CoinbaseSigner::new("key", SECRET, "pass").unwrap();
        let sig = signer
            .sign("1700000000.5", "POST", "/orders", r#"{"type":"market"}"#)
            .unwrap();
        assert_eq!(sig, "4zKgrwbAGlbmIgVa8WITQg0d0u7pTN4PZZZt6LE4GqE=");
    }

    #[test]
    fn rejects_non_base64_secret() {
        let err = CoinbaseSigner::new("key", "not base64!", "pass").unwrap_err();
        assert!(!err.is_transient());
    }

    #[test]
    fn timestamp_is_whole_seconds() {
        let now = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
        assert_eq!(CoinbaseSigner::timestamp(now), "1700000000");
    }

    #[test]
    fn debug_hides_secret_and_passphrase() {
        let signer = CoinbaseSigner::new("key", SECRET, "hunter2").unwrap();
        let debug = format!("{signer:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains(SECRET));
    }
}
