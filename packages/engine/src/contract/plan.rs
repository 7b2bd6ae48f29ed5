// packages/engine/src/contract/plan.rs
//! Subscription plan endpoints
//!
//! None of these have a real billing backend, so outside mock mode they all
//! answer 501.

use crate::contract::request::{str_field, ApiRequest};
use crate::contract::response::ApiResponse;
use crate::routing::{HandlerEntry, RealModePolicy};
use crate::utils::errors::Result;
use chrono::{DateTime, Duration as ChronoDuration, SecondsFormat, Utc};
use hyper::Method;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

/// Simulated latency of the cancellation flow
pub const CANCEL_DELAY: Duration = Duration::from_millis(300);

/// Days a canceled plan or a new trial stays usable
pub const GRACE_DAYS: i64 = 7;

/// Account that holds an active paid subscription in mock data
pub const SUBSCRIBED_EMAIL: &str = "test1@example.com";

pub(crate) fn entries() -> Result<Vec<HandlerEntry>> {
    use RealModePolicy::NotImplemented;

    Ok(vec![
        HandlerEntry::new(Method::POST, "/api/plan/cancel", "cancel_plan", NotImplemented, cancel)?,
        HandlerEntry::new(
            Method::POST,
            "/api/plan/activate",
            "activate_plan",
            NotImplemented,
            activate,
        )?,
        HandlerEntry::new(
            Method::GET,
            "/api/plan/current",
            "current_plan",
            NotImplemented,
            current,
        )?,
    ])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub status: &'static str,
    pub start_date: String,
    pub end_date: String,
    pub remaining_days: i64,
    pub is_trial: bool,
}

impl PlanSummary {
    /// Plan held by `email` as of `now`
    pub fn for_email(email: &str, now: DateTime<Utc>) -> Self {
        let (id, name, is_trial, started_days_ago, ends_in_days) = if email == SUBSCRIBED_EMAIL {
            ("basic", "Basic", false, 7, 23)
        } else {
            ("trial", "Free Trial", true, 3, 4)
        };

        Self {
            id,
            name,
            status: "active",
            start_date: timestamp(now - ChronoDuration::days(started_days_ago)),
            end_date: timestamp(now + ChronoDuration::days(ends_in_days)),
            remaining_days: ends_in_days,
            is_trial,
        }
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn cancel(_request: &ApiRequest) -> ApiResponse {
    let effective = Utc::now() + ChronoDuration::days(GRACE_DAYS);

    ApiResponse::ok(json!({
        "ok": true,
        "message": "Subscription canceled successfully",
        "cancelEffectiveDate": timestamp(effective),
    }))
    .delayed(CANCEL_DELAY)
}

fn activate(request: &ApiRequest) -> ApiResponse {
    let Ok(body) = request.json() else {
        return ApiResponse::malformed_body();
    };

    if str_field(&body, "payment_method_id").is_none() {
        return ApiResponse::bad_request("payment_method_id is required");
    }

    let trial_ends = Utc::now() + ChronoDuration::days(GRACE_DAYS);
    ApiResponse::ok(json!({
        "trialEndsAt": timestamp(trial_ends),
        "plan": "trial",
    }))
}

fn current(request: &ApiRequest) -> ApiResponse {
    let email = request.token_email().unwrap_or_default();
    ApiResponse::ok(json!({ "plan": PlanSummary::for_email(&email, Utc::now()) }))
}
