use std::time::{SystemTime, UNIX_EPOCH};

use hmac_sha256::HMAC;
use secrecy::{ExposeSecret, SecretString};

use crate::rest::FtxRestError;

pub const API_KEY_ENV: &str = "FTX_API_KEY";
pub const API_SECRET_ENV: &str = "FTX_API_SECRET";
pub const SUBACCOUNT_ENV: &str = "FTX_SUBACCOUNT";

#[derive(Debug)]
pub struct FtxAuthSettings {
    api_key: String,
    api_secret: SecretString,
    subaccount: Option<String>,
}

impl FtxAuthSettings {
    /// The subaccount goes out as the raw `FTX-SUBACCOUNT` header value, without
    /// percent-encoding, so names with spaces or non-ASCII characters are
    /// sent verbatim or rejected when the request is built.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        subaccount: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            subaccount,
        }
    }

    /// Reads `FTX_API_KEY`, `FTX_API_SECRET` and the optional `FTX_SUBACCOUNT`,
    /// loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, FtxRestError> {
        dotenv::dotenv().ok();

        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| FtxRestError::MissingEnvVar(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| FtxRestError::MissingEnvVar(API_SECRET_ENV.to_string()))?;
        let subaccount = std::env::var(SUBACCOUNT_ENV)
            .ok()
            .filter(|name| !name.is_empty());

        Ok(Self::new(api_key, api_secret, subaccount))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn subaccount(&self) -> Option<&str> {
        self.subaccount.as_deref()
    }

    /// Lowercase hex HMAC-SHA256 of `timestamp + method + path + body`.
    pub fn generate_sign(
        &self,
        timestamp: u128,
        method: &str,
        path: &str,
        body: &[u8],
    ) -> Result<String, FtxRestError> {
        let secret = self.api_secret.expose_secret();
        if secret.is_empty() {
            return Err(FtxRestError::EmptyApiSecret);
        }

        let mut sign_payload = format!("{}{}{}", timestamp, method, path).into_bytes();
        sign_payload.extend_from_slice(body);

        let sign = HMAC::mac(&sign_payload, secret.as_bytes());
        Ok(hex::encode(sign))
    }

    pub fn generate_timestamp() -> Result<u128, FtxRestError> {
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();

        Ok(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FtxAuthSettings {
        FtxAuthSettings::new("k", "s", None)
    }

    #[test]
    fn sign_matches_plain_hmac_of_concatenated_payload() {
        let sign = settings()
            .generate_sign(1000000000000, "GET", "/api/markets", &[])
            .unwrap();

        let expected = hex::encode(HMAC::mac(b"1000000000000GET/api/markets", b"s"));
        assert_eq!(sign, expected);
        assert_eq!(sign.len(), 64);
        assert!(sign.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn sign_is_deterministic() {
        let auth = settings();
        let first = auth.generate_sign(42, "POST", "/api/orders", b"{}").unwrap();
        let second = auth.generate_sign(42, "POST", "/api/orders", b"{}").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn every_payload_component_changes_sign() {
        let auth = settings();
        let base = auth.generate_sign(42, "POST", "/api/orders", b"{}").unwrap();

        assert_ne!(base, auth.generate_sign(43, "POST", "/api/orders", b"{}").unwrap());
        assert_ne!(base, auth.generate_sign(42, "PUT", "/api/orders", b"{}").unwrap());
        assert_ne!(base, auth.generate_sign(42, "POST", "/api/order", b"{}").unwrap());
        assert_ne!(base, auth.generate_sign(42, "POST", "/api/orders", b"{ }").unwrap());
    }

    #[test]
    fn different_secrets_produce_different_signs() {
        let first = FtxAuthSettings::new("k", "secret1", None);
        let second = FtxAuthSettings::new("k", "secret2", None);

        assert_ne!(
            first.generate_sign(1, "GET", "/api/fills", &[]).unwrap(),
            second.generate_sign(1, "GET", "/api/fills", &[]).unwrap()
        );
    }

    #[test]
    fn empty_secret_is_rejected() {
        let auth = FtxAuthSettings::new("k", "", None);
        let result = auth.generate_sign(1, "GET", "/api/markets", &[]);

        assert!(matches!(result, Err(FtxRestError::EmptyApiSecret)));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let auth = FtxAuthSettings::new("my_key", "super_secret_value", Some("sub".into()));
        let debug = format!("{:?}", auth);

        assert!(debug.contains("my_key"));
        assert!(!debug.contains("super_secret_value"));
    }

    #[test]
    fn timestamp_is_in_milliseconds() {
        let ts = FtxAuthSettings::generate_timestamp().unwrap();

        // 2001-09-09 in ms; anything smaller would be seconds.
        assert!(ts > 1_000_000_000_000);
    }
}
