// packages/engine/src/contract/analysis.rs
//! Analysis job endpoints
//!
//! Jobs carry no stored state. Status is projected from the creation time
//! embedded in the job id against a fixed nominal duration.

use crate::contract::request::{str_field, ApiRequest};
use crate::contract::response::ApiResponse;
use crate::routing::{HandlerEntry, RealModePolicy};
use crate::utils::errors::Result;
use crate::utils::ids::{new_id, parse_id};
use chrono::Utc;
use hyper::Method;
use serde::Serialize;
use serde_json::json;

/// Identifier kind for analysis jobs
pub const JOB_KIND: &str = "job";

/// Time for a job to reach 100%
pub const JOB_DURATION_MS: u64 = 15_000;

pub(crate) fn entries() -> Result<Vec<HandlerEntry>> {
    Ok(vec![
        HandlerEntry::new(
            Method::POST,
            "/api/analysis/initiate",
            "initiate_analysis",
            RealModePolicy::NotImplemented,
            initiate,
        )?,
        HandlerEntry::new(
            Method::GET,
            "/api/analysis/status",
            "analysis_status",
            RealModePolicy::NotImplemented,
            status,
        )?,
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Analyzing,
    Mapping,
    Ranking,
    Preparing,
    Completed,
}

impl Stage {
    pub fn for_progress(progress: u64) -> Self {
        match progress {
            0..=24 => Stage::Analyzing,
            25..=49 => Stage::Mapping,
            50..=74 => Stage::Ranking,
            75..=99 => Stage::Preparing,
            _ => Stage::Completed,
        }
    }
}

/// Percentage complete for a job started at `started_ms`, observed at `now_ms`
pub fn progress_at(started_ms: u64, now_ms: u64) -> u64 {
    let elapsed = now_ms.saturating_sub(started_ms);
    (elapsed * 100 / JOB_DURATION_MS).min(100)
}

/// The brand reference may arrive as a query parameter or in the JSON body.
fn initiate(request: &ApiRequest) -> ApiResponse {
    let from_body = request
        .json()
        .ok()
        .and_then(|body| str_field(&body, "brandId").map(str::to_string));

    let brand_id = request.query_param("brandId").map(str::to_string).or(from_body);
    if brand_id.is_none() {
        return ApiResponse::bad_request("brandId is required");
    }

    ApiResponse::ok(json!({
        "jobId": new_id(JOB_KIND),
        "message": "Analysis initiated",
    }))
}

fn status(request: &ApiRequest) -> ApiResponse {
    let Some(job_id) = request.query_param("jobId") else {
        return ApiResponse::bad_request("jobId is required");
    };

    let started_ms = match parse_id(job_id) {
        Some(parsed) if parsed.kind == JOB_KIND => parsed.timestamp_ms,
        _ => return ApiResponse::bad_request("jobId is malformed"),
    };

    let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let progress = progress_at(started_ms, now_ms);
    let stage = Stage::for_progress(progress);

    ApiResponse::ok(json!({
        "jobId": job_id,
        "progress": progress,
        "stage": stage,
        "status": if stage == Stage::Completed { "completed" } else { "in_progress" },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ids::matches_kind;
    use bytes::Bytes;
    use hyper::{HeaderMap, StatusCode};

    fn request(method: Method, uri: &str, body: &'static str) -> ApiRequest {
        ApiRequest::new(
            method,
            &uri.parse().unwrap(),
            HeaderMap::new(),
            Bytes::from_static(body.as_bytes()),
        )
    }

    #[test]
    fn test_initiate_requires_brand() {
        let response = initiate(&request(Method::POST, "/api/analysis/initiate", ""));
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "brandId is required");
    }

    #[test]
    fn test_initiate_from_query_or_body() {
        let by_query = initiate(&request(
            Method::POST,
            "/api/analysis/initiate?brandId=b1",
            "",
        ));
        let by_body = initiate(&request(
            Method::POST,
            "/api/analysis/initiate",
            r#"{"brandId":"b1"}"#,
        ));

        for response in [by_query, by_body] {
            assert_eq!(response.status, StatusCode::OK);
            assert!(matches_kind(response.body["jobId"].as_str().unwrap(), JOB_KIND));
            assert_eq!(response.body["message"], "Analysis initiated");
        }
    }

    #[test]
    fn test_initiate_with_repeated_brand_param() {
        let response = initiate(&request(
            Method::POST,
            "/api/analysis/initiate?brandId=b1&brandId=",
            "",
        ));
        assert_eq!(response.status, StatusCode::OK);
    }

    #[test]
    fn test_progress_and_stages() {
        assert_eq!(progress_at(1_000, 1_000), 0);
        assert_eq!(progress_at(1_000, 8_500), 50);
        assert_eq!(progress_at(1_000, 60_000), 100);
        assert_eq!(progress_at(5_000, 1_000), 0);

        assert_eq!(Stage::for_progress(0), Stage::Analyzing);
        assert_eq!(Stage::for_progress(25), Stage::Mapping);
        assert_eq!(Stage::for_progress(74), Stage::Ranking);
        assert_eq!(Stage::for_progress(99), Stage::Preparing);
        assert_eq!(Stage::for_progress(100), Stage::Completed);
    }

    #[test]
    fn test_status_for_fresh_job() {
        let job_id = new_id(JOB_KIND);
        let response = status(&request(
            Method::GET,
            &format!("/api/analysis/status?jobId={}", job_id),
            "",
        ));

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["jobId"], job_id.as_str());
        assert_eq!(response.body["stage"], "Analyzing");
        assert_eq!(response.body["status"], "in_progress");
    }

    #[test]
    fn test_status_rejects_bad_ids() {
        let missing = status(&request(Method::GET, "/api/analysis/status", ""));
        assert_eq!(missing.body["error"], "jobId is required");

        let foreign = status(&request(
            Method::GET,
            &format!("/api/analysis/status?jobId={}", new_id("brand")),
            "",
        ));
        assert_eq!(foreign.body["error"], "jobId is malformed");
    }
}
