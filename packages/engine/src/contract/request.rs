// packages/engine/src/contract/request.rs
//! Adapter-neutral request view handed to responders

use crate::routing::PathParams;
use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri};
use serde_json::{Map, Value};
use std::collections::HashMap;
use url::form_urlencoded;

/// Email assumed when a request carries no usable identity
pub const DEFAULT_EMAIL: &str = "test@example.com";

/// Token prefixes minted by the auth responders
const TOKEN_FLOWS: &[&str] = &["login", "signup", "magic", "google"];

/// Request as seen by a responder. Both adapters build it the same way.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub params: PathParams,
}

/// Body could not be read as a JSON object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedBody;

impl ApiRequest {
    pub fn new(method: Method, uri: &Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            path: uri.path().to_string(),
            query: parse_query(uri.query().unwrap_or_default()),
            headers,
            body,
            params: PathParams::new(),
        }
    }

    pub fn with_params(mut self, params: PathParams) -> Self {
        self.params = params;
        self
    }

    /// Bound path parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Query parameter, ignoring empty values
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// JSON object body. An empty body reads as `{}`.
    pub fn json(&self) -> Result<Map<String, Value>, MalformedBody> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice(&self.body) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(MalformedBody),
        }
    }

    /// Bearer token from the `Authorization` header
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self.headers.get(hyper::header::AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
        (!token.is_empty()).then_some(token)
    }

    /// Email encoded in the bearer token, if any token is present
    pub fn token_email(&self) -> Option<String> {
        self.bearer_token().map(email_from_token)
    }
}

/// Non-empty string field from a JSON body
pub fn str_field<'a>(body: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    body.get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Recover the email from a `mock_<flow>_token_<email>` token. Bare emails
/// are accepted as-is; anything else maps to [`DEFAULT_EMAIL`].
pub fn email_from_token(token: &str) -> String {
    for flow in TOKEN_FLOWS {
        let prefix = format!("mock_{}_token_", flow);
        if let Some(email) = token.strip_prefix(prefix.as_str()) {
            if !email.is_empty() {
                return email.to_string();
            }
        }
    }

    if token.contains('@') {
        token.to_string()
    } else {
        DEFAULT_EMAIL.to_string()
    }
}

/// First occurrence of a repeated key wins
fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::{HeaderValue, AUTHORIZATION};

    fn request(uri: &str, body: &str) -> ApiRequest {
        ApiRequest::new(
            Method::POST,
            &uri.parse().unwrap(),
            HeaderMap::new(),
            Bytes::from(body.to_string()),
        )
    }

    #[test]
    fn test_query_parsing() {
        let req = request("/api/analysis/initiate?brandId=brand%5Fx&empty=&flag", "");
        assert_eq!(req.query_param("brandId"), Some("brand_x"));
        assert_eq!(req.query_param("empty"), None);
        assert_eq!(req.query.get("flag").map(String::as_str), Some(""));
        assert_eq!(req.path, "/api/analysis/initiate");
    }

    #[test]
    fn test_query_decoding() {
        let req = request("/?email=a%40b.com&name=Acme+Corp&pct=100%25&bad=%zz", "");
        assert_eq!(req.query_param("email"), Some("a@b.com"));
        assert_eq!(req.query_param("name"), Some("Acme Corp"));
        assert_eq!(req.query_param("pct"), Some("100%"));
        assert_eq!(req.query_param("bad"), Some("%zz"));
    }

    #[test]
    fn test_repeated_query_key_keeps_first() {
        let req = request("/api/analysis/initiate?brandId=b1&brandId=", "");
        assert_eq!(req.query_param("brandId"), Some("b1"));

        let req = request("/api/analysis/initiate?brandId=&brandId=b1", "");
        assert_eq!(req.query_param("brandId"), None);
    }

    #[test]
    fn test_json_body() {
        assert!(request("/", "").json().unwrap().is_empty());
        assert_eq!(
            str_field(&request("/", r#"{"name":"Acme"}"#).json().unwrap(), "name"),
            Some("Acme")
        );
        assert_eq!(request("/", "{not json").json(), Err(MalformedBody));
        assert_eq!(request("/", "[1,2]").json(), Err(MalformedBody));
    }

    #[test]
    fn test_email_from_token() {
        assert_eq!(email_from_token("mock_login_token_a@b.com"), "a@b.com");
        assert_eq!(email_from_token("mock_google_token_g@x.io"), "g@x.io");
        assert_eq!(email_from_token("plain@b.com"), "plain@b.com");
        assert_eq!(email_from_token("opaque"), DEFAULT_EMAIL);
    }

    #[test]
    fn test_bearer_token() {
        let mut req = request("/", "");
        assert!(req.bearer_token().is_none());

        req.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_static("Bearer mock_signup_token_n@x.io"),
        );
        assert_eq!(req.token_email().as_deref(), Some("n@x.io"));
    }
}
