// packages/engine/tests/common/mod.rs
//! Helpers shared by the integration tests

#![allow(dead_code)]

use brandview_mock_engine::contract::{self, MockRequest, MockResponse, SOURCE_HEADER};
use brandview_mock_engine::routing::HandlerRegistry;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn registry() -> Arc<HandlerRegistry> {
    Arc::new(contract::registry().expect("contract registry"))
}

/// One representative call per operation
pub struct Case {
    pub operation: &'static str,
    pub method: Method,
    pub uri: &'static str,
    pub body: Option<Value>,
    pub token: Option<&'static str>,
}

impl Case {
    fn new(operation: &'static str, method: Method, uri: &'static str) -> Self {
        Self {
            operation,
            method,
            uri,
            body: None,
            token: None,
        }
    }

    fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn token(mut self, token: &'static str) -> Self {
        self.token = Some(token);
        self
    }

    /// Build the request against `base` (e.g. `http://127.0.0.1:3000`)
    pub fn request(&self, base: &str) -> MockRequest {
        let body = self
            .body
            .as_ref()
            .map(|b| Bytes::from(b.to_string()))
            .unwrap_or_default();

        let mut request = Request::builder()
            .method(self.method.clone())
            .uri(format!("{}{}", base, self.uri))
            .body(Full::new(body))
            .expect("valid request");

        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).expect("header");
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        request
    }
}

const LOGIN_TOKEN: &str = "mock_login_token_test@example.com";

/// Representative successful calls, one per registered operation
pub fn cases() -> Vec<Case> {
    use Method as M;

    vec![
        Case::new(
            "initiate_analysis",
            M::POST,
            "/api/analysis/initiate?brandId=brand_inventec",
        ),
        Case::new(
            "analysis_status",
            M::GET,
            "/api/analysis/status?jobId=job_1700000000000_01hf3k2m4n5p6q7r",
        ),
        Case::new("signup", M::POST, "/api/auth/signup")
            .body(json!({ "email": "fresh@example.com", "password": "hunter22" })),
        Case::new("login", M::POST, "/api/auth/login")
            .body(json!({ "email": "test@example.com", "password": "hunter22" })),
        Case::new("magic_link", M::POST, "/api/auth/magic-link")
            .body(json!({ "email": "test@example.com" })),
        Case::new(
            "verify_magic_link",
            M::GET,
            "/api/auth/magic-link/verify?token=email:new@example.com",
        ),
        Case::new("google_start", M::POST, "/api/auth/google/start"),
        Case::new("google_callback", M::GET, "/api/auth/google/callback?code=mock"),
        Case::new("session", M::GET, "/api/auth/session").token(LOGIN_TOKEN),
        Case::new("logout", M::POST, "/api/auth/logout"),
        Case::new("change_password", M::POST, "/api/auth/change-password")
            .body(json!({ "currentPassword": "old-pass", "newPassword": "new-pass-1" })),
        Case::new("create_setup_intent", M::POST, "/api/stripe/create-setup-intent"),
        Case::new(
            "create_checkout_session",
            M::POST,
            "/api/stripe/create-checkout-session",
        )
        .body(json!({ "planId": "basic", "priceId": "price_basic", "isUpgrade": true })),
        Case::new(
            "create_portal_session",
            M::POST,
            "/api/stripe/create-portal-session",
        ),
        Case::new("list_invoices", M::GET, "/api/stripe/invoices"),
        Case::new("list_brands", M::GET, "/api/brands"),
        Case::new("create_brand", M::POST, "/api/brands")
            .body(json!({ "name": "Acme", "description": "Widgets" })),
        Case::new("get_brand", M::GET, "/api/brands/brand_inventec"),
        Case::new("update_brand", M::PATCH, "/api/brands/brand_acme")
            .body(json!({ "name": "Acme Corp" })),
        Case::new("delete_brand", M::DELETE, "/api/brands/brand_acme"),
        Case::new("list_personas", M::GET, "/api/brands/brand_inventec/personas"),
        Case::new("create_persona", M::POST, "/api/brands/brand_inventec/personas")
            .body(json!({ "name": "Procurement lead", "description": "Buys racks" })),
        Case::new(
            "update_persona",
            M::PATCH,
            "/api/personas/persona_1700000000000_01hf3k2m4n5p6q7r",
        )
        .body(json!({ "name": "Data center lead" })),
        Case::new(
            "delete_persona",
            M::DELETE,
            "/api/personas/persona_1700000000000_01hf3k2m4n5p6q7r",
        ),
        Case::new(
            "list_competitors",
            M::GET,
            "/api/brands/brand_inventec/competitors",
        ),
        Case::new(
            "create_competitor",
            M::POST,
            "/api/brands/brand_inventec/competitors",
        )
        .body(json!({ "name": "Quanta", "region": "APAC" })),
        Case::new("update_competitor", M::PATCH, "/api/competitors/comp_1")
            .body(json!({ "product": "Rack servers" })),
        Case::new("delete_competitor", M::DELETE, "/api/competitors/comp_1"),
        Case::new("cancel_plan", M::POST, "/api/plan/cancel"),
        Case::new("activate_plan", M::POST, "/api/plan/activate")
            .body(json!({ "payment_method_id": "pm_card_visa" })),
        Case::new("current_plan", M::GET, "/api/plan/current")
            .token("mock_login_token_test1@example.com"),
        Case::new("join_waitlist", M::POST, "/api/onboarding/waitlist")
            .body(json!({ "brandName": "Acme", "productName": "Rack" })),
        Case::new("list_members", M::GET, "/api/team").token(LOGIN_TOKEN),
        Case::new("invite_member", M::POST, "/api/team/invite")
            .token(LOGIN_TOKEN)
            .body(json!({ "email": "dana@example.com", "role": "Viewer" })),
        Case::new("update_member", M::PATCH, "/api/team/member_bob")
            .token(LOGIN_TOKEN)
            .body(json!({ "role": "Admin" })),
        Case::new("remove_member", M::DELETE, "/api/team/member_alice").token(LOGIN_TOKEN),
    ]
}

/// Representative validation failures
pub fn failing_cases() -> Vec<Case> {
    use Method as M;

    vec![
        Case::new("initiate_analysis", M::POST, "/api/analysis/initiate"),
        Case::new("signup", M::POST, "/api/auth/signup").body(json!({ "email": "a@b.com" })),
        Case::new("login", M::POST, "/api/auth/login").body(json!({ "password": "x" })),
        Case::new("change_password", M::POST, "/api/auth/change-password")
            .body(json!({ "currentPassword": "old-pass", "newPassword": "short" })),
        Case::new("session", M::GET, "/api/auth/session"),
        Case::new("google_callback", M::GET, "/api/auth/google/callback"),
        Case::new("activate_plan", M::POST, "/api/plan/activate").body(json!({})),
        Case::new("update_persona", M::PATCH, "/api/personas/p1").body(json!({})),
        Case::new("update_competitor", M::PATCH, "/api/competitors/comp_99").body(json!({})),
        Case::new(
            "create_competitor",
            M::POST,
            "/api/brands/brand_inventec/competitors",
        )
        .body(json!({ "name": "HPE" })),
        Case::new("list_members", M::GET, "/api/team"),
        Case::new("invite_member", M::POST, "/api/team/invite")
            .token(LOGIN_TOKEN)
            .body(json!({ "email": "bob@example.com", "role": "Viewer" })),
        Case::new("remove_member", M::DELETE, "/api/team/member_zed").token(LOGIN_TOKEN),
    ]
}

/// Replace every leaf with its JSON type name
pub fn shape(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), shape(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(shape).collect()),
        Value::String(_) => json!("string"),
        Value::Number(_) => json!("number"),
        Value::Bool(_) => json!("bool"),
        Value::Null => json!("null"),
    }
}

pub struct Observed {
    pub status: StatusCode,
    pub source: Option<String>,
    pub body: Value,
    pub raw: Bytes,
}

pub async fn observe(response: MockResponse) -> Observed {
    let status = response.status();
    let source = response
        .headers()
        .get(SOURCE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let raw = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);

    Observed {
        status,
        source,
        body,
        raw,
    }
}
