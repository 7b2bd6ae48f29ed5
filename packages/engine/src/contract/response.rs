// packages/engine/src/contract/response.rs
//! Responder output and its HTTP rendering

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

/// Header naming the layer that produced a synthesized response
pub const SOURCE_HEADER: &str = "x-mock-source";

/// Error tag carried by every real-mode 501 response
pub const NOT_IMPLEMENTED_TAG: &str = "not_implemented";

/// Which adapter answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Interception,
    Fallback,
}

impl ResponseSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseSource::Interception => "interception",
            ResponseSource::Fallback => "fallback",
        }
    }
}

/// Status, JSON body and an optional artificial latency
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
    pub delay: Option<Duration>,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            delay: None,
        }
    }

    /// 400 with a human-readable reason
    pub fn bad_request(reason: &str) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, json!({ "error": reason }))
    }

    /// 400 in the auth envelope (`ok: false`)
    pub fn auth_rejected(status: StatusCode, reason: &str) -> Self {
        Self::with_status(status, json!({ "ok": false, "error": reason }))
    }

    pub fn malformed_body() -> Self {
        Self::bad_request("Invalid request body")
    }

    /// 501 for an operation that has no real backend yet
    pub fn not_implemented(operation: &str) -> Self {
        Self::with_status(
            StatusCode::NOT_IMPLEMENTED,
            json!({
                "error": NOT_IMPLEMENTED_TAG,
                "operation": operation,
                "message": format!("{} is not implemented outside mock mode", operation),
            }),
        )
    }

    pub fn not_found(path: &str) -> Self {
        Self::with_status(
            StatusCode::NOT_FOUND,
            json!({ "error": "not_found", "path": path }),
        )
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Apply the artificial delay, if any
    pub async fn settle(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// Render as an HTTP response tagged with its source
    pub fn into_http(self, source: ResponseSource) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(Bytes::from(self.body.to_string())));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(SOURCE_HEADER),
            HeaderValue::from_static(source.as_str()),
        );

        response
    }
}
