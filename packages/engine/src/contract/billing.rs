// packages/engine/src/contract/billing.rs
//! Payment provider endpoints
//!
//! Checkout and portal sessions come back without a redirect URL, which the
//! dashboard treats as an immediate success. Invoices are a fixed three-month
//! history for the basic plan, dated relative to now.

use crate::contract::request::ApiRequest;
use crate::contract::response::ApiResponse;
use crate::routing::{HandlerEntry, RealModePolicy};
use crate::utils::errors::Result;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use hyper::Method;
use serde::Serialize;
use serde_json::{json, Value};

/// Client secret handed out for every setup intent
pub const SETUP_INTENT_SECRET: &str = "seti_mock_secret_test_123456789";

/// Basic plan monthly price in cents
const BASIC_PLAN_CENTS: u64 = 29_900;

pub(crate) fn entries() -> Result<Vec<HandlerEntry>> {
    use RealModePolicy::NotImplemented;

    // Real sessions need provider credentials this engine never holds.
    Ok(vec![
        HandlerEntry::new(
            Method::POST,
            "/api/stripe/create-setup-intent",
            "create_setup_intent",
            NotImplemented,
            create_setup_intent,
        )?,
        HandlerEntry::new(
            Method::POST,
            "/api/stripe/create-checkout-session",
            "create_checkout_session",
            NotImplemented,
            create_checkout_session,
        )?,
        HandlerEntry::new(
            Method::POST,
            "/api/stripe/create-portal-session",
            "create_portal_session",
            NotImplemented,
            create_portal_session,
        )?,
        HandlerEntry::new(
            Method::GET,
            "/api/stripe/invoices",
            "list_invoices",
            NotImplemented,
            list_invoices,
        )?,
    ])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub id: &'static str,
    pub number: &'static str,
    pub amount_paid: u64,
    pub amount_due: u64,
    pub currency: &'static str,
    pub status: &'static str,
    pub created: i64,
    pub period_start: i64,
    pub period_end: i64,
    pub hosted_invoice_url: Option<String>,
    pub invoice_pdf: Option<String>,
    pub description: &'static str,
}

impl Invoice {
    /// Paid monthly invoices, newest first, as of `now`
    pub fn history(now: DateTime<Utc>) -> Vec<Self> {
        // (id, number, period start in days from now, period end in days from now)
        const PERIODS: [(&str, &str, i64, i64); 3] = [
            ("inv_mock_1", "INV-2025-001", -7, 23),
            ("inv_mock_2", "INV-2024-012", -37, -7),
            ("inv_mock_3", "INV-2024-011", -67, -37),
        ];

        let at = |days: i64| (now + ChronoDuration::days(days)).timestamp();

        PERIODS
            .iter()
            .map(|&(id, number, start, end)| Self {
                id,
                number,
                amount_paid: BASIC_PLAN_CENTS,
                amount_due: 0,
                currency: "usd",
                status: "paid",
                created: at(start),
                period_start: at(start),
                period_end: at(end),
                hosted_invoice_url: None,
                invoice_pdf: None,
                description: "Basic Plan - Monthly Subscription",
            })
            .collect()
    }
}

fn create_setup_intent(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({ "client_secret": SETUP_INTENT_SECRET }))
}

fn create_checkout_session(request: &ApiRequest) -> ApiResponse {
    let is_upgrade = request
        .json()
        .ok()
        .and_then(|body| body.get("isUpgrade").and_then(Value::as_bool))
        .unwrap_or(false);

    ApiResponse::ok(json!({
        "checkoutUrl": null,
        "message": "Mock checkout session created",
        "isUpgrade": is_upgrade,
    }))
}

fn create_portal_session(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({
        "portalUrl": null,
        "message": "Mock portal session created",
    }))
}

fn list_invoices(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({
        "invoices": Invoice::history(Utc::now()),
        "has_more": false,
    }))
}
