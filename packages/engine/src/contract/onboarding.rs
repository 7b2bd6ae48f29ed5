// packages/engine/src/contract/onboarding.rs
//! Onboarding endpoints

use crate::contract::request::{str_field, ApiRequest};
use crate::contract::response::ApiResponse;
use crate::routing::{HandlerEntry, RealModePolicy};
use crate::utils::errors::Result;
use hyper::Method;
use serde_json::json;

pub(crate) fn entries() -> Result<Vec<HandlerEntry>> {
    // Joining the waitlist has no side effects worth a real backend yet.
    Ok(vec![HandlerEntry::new(
        Method::POST,
        "/api/onboarding/waitlist",
        "join_waitlist",
        RealModePolicy::Bridge,
        join_waitlist,
    )?])
}

fn join_waitlist(request: &ApiRequest) -> ApiResponse {
    let Ok(body) = request.json() else {
        return ApiResponse::malformed_body();
    };

    if str_field(&body, "brandName").is_none() || str_field(&body, "productName").is_none() {
        return ApiResponse::bad_request("brandName and productName are required");
    }

    ApiResponse::ok(json!({
        "ok": true,
        "message": "Successfully joined waitlist",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use hyper::{HeaderMap, StatusCode};

    fn post(body: &'static str) -> ApiRequest {
        ApiRequest::new(
            Method::POST,
            &"/api/onboarding/waitlist".parse().unwrap(),
            HeaderMap::new(),
            Bytes::from_static(body.as_bytes()),
        )
    }

    #[test]
    fn test_waitlist_validation() {
        let missing = join_waitlist(&post(r#"{"brandName":"Acme"}"#));
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);

        let ok = join_waitlist(&post(r#"{"brandName":"Acme","productName":"Rack"}"#));
        assert_eq!(ok.status, StatusCode::OK);
        assert_eq!(ok.body["message"], "Successfully joined waitlist");
    }
}
