use http::{header, HeaderValue, Method, Request};
use serde::Serialize;

use crate::ftx_auth_settings::FtxAuthSettings;

use super::{FtxRestError, FtxRestSettings};

pub const FTX_KEY_HEADER: &str = "FTX-KEY";
pub const FTX_SUBACCOUNT_HEADER: &str = "FTX-SUBACCOUNT";
pub const FTX_TS_HEADER: &str = "FTX-TS";
pub const FTX_SIGN_HEADER: &str = "FTX-SIGN";

const ACCEPT: &str = "application/json";
const CONTENT_TYPE: &str = "application/json; utf-8";

pub struct FtxRequestBuilder {
    auth_settings: FtxAuthSettings,
    settings: FtxRestSettings,
}

impl FtxRequestBuilder {
    pub fn new(auth_settings: FtxAuthSettings, settings: FtxRestSettings) -> Self {
        Self {
            auth_settings,
            settings,
        }
    }

    pub fn auth_settings(&self) -> &FtxAuthSettings {
        &self.auth_settings
    }

    pub fn settings(&self) -> &FtxRestSettings {
        &self.settings
    }

    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<Request<Vec<u8>>, FtxRestError> {
        let timestamp = FtxAuthSettings::generate_timestamp()?;
        self.build_request_at(path, method, body, timestamp)
    }

    /// Methods other than POST, PUT and DELETE are signed and sent as GET.
    /// The body is serialized only for POST and PUT; for GET and DELETE it is
    /// neither signed nor sent.
    pub fn build_request_at<B: Serialize + ?Sized>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
        timestamp: u128,
    ) -> Result<Request<Vec<u8>>, FtxRestError> {
        if !path.starts_with('/') {
            return Err(FtxRestError::InvalidPath(path.to_string()));
        }

        let method = normalize_method(method);

        let body = match body {
            Some(body) if carries_body(&method) => serde_json::to_vec(body)?,
            _ => Vec::new(),
        };

        let sign = self
            .auth_settings
            .generate_sign(timestamp, method.as_str(), path, &body)?;

        let mut builder = Request::builder()
            .method(method)
            .uri(format!("{}{}", self.settings.get_host(), path))
            .header(header::ACCEPT, HeaderValue::from_static(ACCEPT))
            .header(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE))
            .header(
                FTX_KEY_HEADER,
                HeaderValue::from_str(self.auth_settings.api_key())?,
            );

        if let Some(subaccount) = self.auth_settings.subaccount() {
            builder = builder.header(FTX_SUBACCOUNT_HEADER, HeaderValue::from_str(subaccount)?);
        }

        let request = builder
            .header(FTX_TS_HEADER, HeaderValue::from_str(&timestamp.to_string())?)
            .header(FTX_SIGN_HEADER, HeaderValue::from_str(&sign)?)
            .body(body)?;

        Ok(request)
    }
}

fn normalize_method(method: Method) -> Method {
    match method {
        Method::POST | Method::PUT | Method::DELETE => method,
        _ => Method::GET,
    }
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT)
}

#[cfg(test)]
mod tests {
    use hmac_sha256::HMAC;
    use serde_json::json;

    use super::*;

    fn builder(subaccount: Option<&str>) -> FtxRequestBuilder {
        FtxRequestBuilder::new(
            FtxAuthSettings::new("k", "s", subaccount.map(str::to_string)),
            FtxRestSettings::new(),
        )
    }

    fn header<'a>(request: &'a Request<Vec<u8>>, name: &str) -> &'a str {
        request.headers()[name].to_str().unwrap()
    }

    #[test]
    fn get_request_matches_reference_signature() {
        let request = builder(None)
            .build_request_at::<()>("/api/markets", Method::GET, None, 1000000000000)
            .unwrap();

        let expected = hex::encode(HMAC::mac(b"1000000000000GET/api/markets", b"s"));

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri(), "https://ftx.com/api/markets");
        assert_eq!(header(&request, "FTX-KEY"), "k");
        assert_eq!(header(&request, "FTX-TS"), "1000000000000");
        assert_eq!(header(&request, "FTX-SIGN"), expected);
        assert_eq!(header(&request, "Accept"), "application/json");
        assert_eq!(header(&request, "Content-Type"), "application/json; utf-8");
        assert!(request.body().is_empty());
    }

    #[test]
    fn ts_header_equals_signed_timestamp() {
        let auth = FtxAuthSettings::new("k", "s", None);
        let request = builder(None)
            .build_request_at::<()>("/api/fills", Method::GET, None, 1650000000123)
            .unwrap();

        let ts: u128 = header(&request, "FTX-TS").parse().unwrap();
        let expected = auth.generate_sign(ts, "GET", "/api/fills", &[]).unwrap();

        assert_eq!(ts, 1650000000123);
        assert_eq!(header(&request, "FTX-SIGN"), expected);
    }

    #[test]
    fn post_signs_exact_body_bytes() {
        let body = json!({ "market": "BTC-PERP", "size": 1 });
        let request = builder(None)
            .build_request_at("/api/orders", Method::POST, Some(&body), 7)
            .unwrap();

        let body_bytes = serde_json::to_vec(&body).unwrap();
        let mut payload = b"7POST/api/orders".to_vec();
        payload.extend_from_slice(&body_bytes);

        assert_eq!(request.body(), &body_bytes);
        assert_eq!(header(&request, "FTX-SIGN"), hex::encode(HMAC::mac(&payload, b"s")));
    }

    #[test]
    fn get_never_signs_or_sends_body() {
        let body = json!({ "ignored": true });
        let with_body = builder(None)
            .build_request_at("/api/orders", Method::GET, Some(&body), 7)
            .unwrap();
        let without_body = builder(None)
            .build_request_at::<()>("/api/orders", Method::GET, None, 7)
            .unwrap();

        assert!(with_body.body().is_empty());
        assert_eq!(
            header(&with_body, "FTX-SIGN"),
            header(&without_body, "FTX-SIGN")
        );
    }

    #[test]
    fn delete_never_sends_body() {
        let body = json!({ "market": "BTC-PERP" });
        let request = builder(None)
            .build_request_at("/api/orders/1", Method::DELETE, Some(&body), 7)
            .unwrap();

        assert_eq!(request.method(), Method::DELETE);
        assert!(request.body().is_empty());
    }

    #[test]
    fn put_carries_body() {
        let body = json!({ "size": 2 });
        let request = builder(None)
            .build_request_at("/api/orders/1", Method::PUT, Some(&body), 7)
            .unwrap();

        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.body(), br#"{"size":2}"#);
    }

    #[test]
    fn path_body_boundary_does_not_collide() {
        let b = builder(None);
        let split = b
            .build_request_at("/a", Method::POST, Some("b"), 7)
            .unwrap();
        let joined = b.build_request_at::<()>("/ab", Method::POST, None, 7).unwrap();

        assert_ne!(header(&split, "FTX-SIGN"), header(&joined, "FTX-SIGN"));
    }

    #[test]
    fn unknown_method_is_signed_and_sent_as_get() {
        let patch = builder(None)
            .build_request_at::<()>("/api/markets", Method::PATCH, None, 7)
            .unwrap();
        let get = builder(None)
            .build_request_at::<()>("/api/markets", Method::GET, None, 7)
            .unwrap();

        assert_eq!(patch.method(), Method::GET);
        assert_eq!(header(&patch, "FTX-SIGN"), header(&get, "FTX-SIGN"));
    }

    #[test]
    fn subaccount_header_only_when_configured() {
        let without = builder(None)
            .build_request_at::<()>("/api/account", Method::GET, None, 7)
            .unwrap();
        let with = builder(Some("test"))
            .build_request_at::<()>("/api/account", Method::GET, None, 7)
            .unwrap();

        assert!(without.headers().get("FTX-SUBACCOUNT").is_none());
        assert_eq!(header(&with, "FTX-SUBACCOUNT"), "test");
    }

    #[test]
    fn query_string_is_part_of_signed_path() {
        let request = builder(None)
            .build_request_at::<()>("/api/orders?market=BTC-PERP", Method::GET, None, 7)
            .unwrap();

        let expected = hex::encode(HMAC::mac(b"7GET/api/orders?market=BTC-PERP", b"s"));
        assert_eq!(request.uri(), "https://ftx.com/api/orders?market=BTC-PERP");
        assert_eq!(header(&request, "FTX-SIGN"), expected);
    }

    #[test]
    fn path_without_leading_slash_is_rejected() {
        let b = builder(None);

        assert!(matches!(
            b.build_request_at::<()>("api/markets", Method::GET, None, 7),
            Err(FtxRestError::InvalidPath(_))
        ));
        assert!(matches!(
            b.build_request_at::<()>("", Method::GET, None, 7),
            Err(FtxRestError::InvalidPath(_))
        ));
    }

    #[test]
    fn empty_secret_fails_instead_of_sending_unsigned() {
        let b = FtxRequestBuilder::new(FtxAuthSettings::new("k", "", None), FtxRestSettings::new());
        let result = b.build_request::<()>("/api/markets", Method::GET, None);

        let err = result.unwrap_err();
        assert!(err.is_signing_error());
    }

    #[test]
    fn subaccount_is_sent_without_percent_encoding() {
        let request = builder(Some("my sub"))
            .build_request_at::<()>("/api/account", Method::GET, None, 7)
            .unwrap();

        assert_eq!(header(&request, "FTX-SUBACCOUNT"), "my sub");
    }

    #[test]
    fn control_chars_in_subaccount_are_an_error() {
        let result = builder(Some("sub\naccount"))
            .build_request_at::<()>("/api/account", Method::GET, None, 7);

        assert!(matches!(result, Err(FtxRestError::InvalidHeaderValue(_))));
    }
}
