// packages/engine/src/contract/auth.rs
//! Authentication endpoints
//!
//! Tokens are `mock_<flow>_token_<email>` so later calls can recover the
//! caller's email. Signup always reports a new account; login and magic
//! link verification report one only for [`NEW_USER_EMAIL`], which drives
//! onboarding routing in the dashboard.

use crate::contract::request::{str_field, ApiRequest, DEFAULT_EMAIL};
use crate::contract::response::ApiResponse;
use crate::routing::{HandlerEntry, RealModePolicy};
use crate::utils::errors::Result;
use crate::utils::ids::new_id;
use hyper::{Method, StatusCode};
use serde_json::json;

/// The one address treated as a first-time user on login
pub const NEW_USER_EMAIL: &str = "new@example.com";

/// Account every Google sign-in resolves to
pub const GOOGLE_EMAIL: &str = "google@example.com";

/// The only authorization code the Google callback accepts
pub const GOOGLE_CODE: &str = "mock";

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn entries() -> Result<Vec<HandlerEntry>> {
    use RealModePolicy::*;

    Ok(vec![
        HandlerEntry::new(Method::POST, "/api/auth/signup", "signup", NotImplemented, signup)?,
        HandlerEntry::new(Method::POST, "/api/auth/login", "login", NotImplemented, login)?,
        HandlerEntry::new(
            Method::POST,
            "/api/auth/magic-link",
            "magic_link",
            NotImplemented,
            magic_link,
        )?,
        HandlerEntry::new(
            Method::GET,
            "/api/auth/magic-link/verify",
            "verify_magic_link",
            NotImplemented,
            verify_magic_link,
        )?,
        HandlerEntry::new(
            Method::POST,
            "/api/auth/google/start",
            "google_start",
            NotImplemented,
            google_start,
        )?,
        HandlerEntry::new(
            Method::GET,
            "/api/auth/google/callback",
            "google_callback",
            NotImplemented,
            google_callback,
        )?,
        HandlerEntry::new(Method::GET, "/api/auth/session", "session", NotImplemented, session)?,
        HandlerEntry::new(Method::POST, "/api/auth/logout", "logout", Bridge, logout)?,
        HandlerEntry::new(
            Method::POST,
            "/api/auth/change-password",
            "change_password",
            Bridge,
            change_password,
        )?,
    ])
}

fn is_new_on_login(email: &str) -> bool {
    email.eq_ignore_ascii_case(NEW_USER_EMAIL)
}

fn token_response(flow: &str, email: &str, is_new: bool) -> ApiResponse {
    ApiResponse::ok(json!({
        "ok": true,
        "token": format!("mock_{}_token_{}", flow, email),
        "isNew": is_new,
    }))
}

/// Shared email/password validation for signup and login
fn credentials(request: &ApiRequest) -> std::result::Result<String, ApiResponse> {
    let body = request.json().map_err(|_| {
        ApiResponse::auth_rejected(StatusCode::BAD_REQUEST, "Invalid request body")
    })?;

    match (str_field(&body, "email"), str_field(&body, "password")) {
        (Some(email), Some(_)) => Ok(email.to_string()),
        _ => Err(ApiResponse::auth_rejected(
            StatusCode::BAD_REQUEST,
            "Email and password are required",
        )),
    }
}

fn signup(request: &ApiRequest) -> ApiResponse {
    match credentials(request) {
        Ok(email) => token_response("signup", &email, true),
        Err(rejected) => rejected,
    }
}

fn login(request: &ApiRequest) -> ApiResponse {
    match credentials(request) {
        Ok(email) => {
            let is_new = is_new_on_login(&email);
            token_response("login", &email, is_new)
        }
        Err(rejected) => rejected,
    }
}

fn magic_link(request: &ApiRequest) -> ApiResponse {
    let Ok(body) = request.json() else {
        return ApiResponse::auth_rejected(StatusCode::BAD_REQUEST, "Invalid request body");
    };

    match str_field(&body, "email") {
        Some(_) => ApiResponse::ok(json!({ "ok": true })),
        None => ApiResponse::auth_rejected(StatusCode::BAD_REQUEST, "Email is required"),
    }
}

/// Tokens look like `email:someone@example.com`; bare emails are accepted.
fn verify_magic_link(request: &ApiRequest) -> ApiResponse {
    let token = match request.query_param("token") {
        Some(token) if token != "invalid" => token,
        _ => return ApiResponse::auth_rejected(StatusCode::BAD_REQUEST, "Invalid token"),
    };

    let email = match token.strip_prefix("email:") {
        Some(email) if !email.is_empty() => email,
        _ if token.contains('@') => token,
        _ => DEFAULT_EMAIL,
    };

    token_response("magic", email, is_new_on_login(email))
}

fn google_start(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({ "ok": true, "redirect": "/auth/google" }))
}

/// Google accounts are never seeded, so a sign-in always creates one.
fn google_callback(request: &ApiRequest) -> ApiResponse {
    if request.query_param("code") != Some(GOOGLE_CODE) {
        return ApiResponse::auth_rejected(StatusCode::BAD_REQUEST, "Invalid code");
    }

    token_response("google", GOOGLE_EMAIL, true)
}

fn session(request: &ApiRequest) -> ApiResponse {
    let Some(email) = request.token_email() else {
        return ApiResponse::auth_rejected(StatusCode::UNAUTHORIZED, "Unauthorized");
    };

    ApiResponse::ok(json!({
        "ok": true,
        "profile": {
            "id": new_id("u"),
            "hasBrand": !is_new_on_login(&email),
            "email": email,
            "role": "Admin",
        },
    }))
}

fn logout(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({ "ok": true }))
}

fn change_password(request: &ApiRequest) -> ApiResponse {
    let Ok(body) = request.json() else {
        return ApiResponse::malformed_body();
    };

    let (Some(_current), Some(new_password)) = (
        str_field(&body, "currentPassword"),
        str_field(&body, "newPassword"),
    ) else {
        return ApiResponse::bad_request("Missing required fields");
    };

    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return ApiResponse::bad_request("Password must be at least 8 characters");
    }

    ApiResponse::ok(json!({ "ok": true, "message": "Password updated" }))
}
