// packages/engine/src/contract/team.rs
//! Team roster endpoints
//!
//! The roster is derived per request: the caller (from the bearer token) is
//! the Admin, joined by a fixed set of Viewer teammates. Invites, role
//! changes and removals validate against that roster and echo the result;
//! nothing is stored between calls.

use crate::contract::request::{str_field, ApiRequest};
use crate::contract::response::ApiResponse;
use crate::routing::{HandlerEntry, RealModePolicy};
use crate::utils::errors::Result;
use crate::utils::ids::new_id;
use chrono::{DateTime, Duration as ChronoDuration, SecondsFormat, Utc};
use hyper::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Member id of the calling user
pub const CALLER_MEMBER_ID: &str = "member_self";

/// Teammates every roster includes: (member id, email, days since last update)
const TEAMMATES: [(&str, &str, i64); 3] = [
    ("member_alice", "alice@example.com", 1),
    ("member_bob", "bob@example.com", 3),
    ("member_charlie", "charlie@example.com", 6),
];

pub(crate) fn entries() -> Result<Vec<HandlerEntry>> {
    use RealModePolicy::NotImplemented;

    Ok(vec![
        HandlerEntry::new(Method::GET, "/api/team", "list_members", NotImplemented, list_members)?,
        HandlerEntry::new(
            Method::POST,
            "/api/team/invite",
            "invite_member",
            NotImplemented,
            invite_member,
        )?,
        HandlerEntry::new(
            Method::PATCH,
            "/api/team/:id",
            "update_member",
            NotImplemented,
            update_member,
        )?,
        HandlerEntry::new(
            Method::DELETE,
            "/api/team/:id",
            "remove_member",
            NotImplemented,
            remove_member,
        )?,
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Viewer,
}

impl Role {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Admin" => Some(Role::Admin),
            "Viewer" => Some(Role::Viewer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub updated_at: String,
}

impl Member {
    fn new(id: &str, email: &str, role: Role, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            role,
            updated_at: updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Roster seen by `caller` as of `now`
pub fn roster(caller: &str, now: DateTime<Utc>) -> Vec<Member> {
    let mut members = vec![Member::new(CALLER_MEMBER_ID, caller, Role::Admin, now)];

    for (id, email, days) in TEAMMATES {
        if !email.eq_ignore_ascii_case(caller) {
            let updated = now - ChronoDuration::days(days);
            members.push(Member::new(id, email, Role::Viewer, updated));
        }
    }

    members
}

fn unauthorized() -> ApiResponse {
    ApiResponse::with_status(StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" }))
}

fn list_members(request: &ApiRequest) -> ApiResponse {
    let Some(caller) = request.token_email() else {
        return unauthorized();
    };

    ApiResponse::ok(json!({ "members": roster(&caller, Utc::now()) }))
}

fn invite_member(request: &ApiRequest) -> ApiResponse {
    let Some(caller) = request.token_email() else {
        return unauthorized();
    };
    let Ok(body) = request.json() else {
        return ApiResponse::malformed_body();
    };

    let (Some(email), Some(role)) = (str_field(&body, "email"), str_field(&body, "role")) else {
        return ApiResponse::bad_request("Email and role are required");
    };
    let Some(role) = Role::parse(role) else {
        return ApiResponse::bad_request("role must be Admin or Viewer");
    };

    let now = Utc::now();
    if roster(&caller, now)
        .iter()
        .any(|member| member.email.eq_ignore_ascii_case(email))
    {
        return ApiResponse::bad_request("Member already exists");
    }

    let member = Member::new(&new_id("member"), email, role, now);
    ApiResponse::ok(json!({ "member": member }))
}

fn update_member(request: &ApiRequest) -> ApiResponse {
    let Some(caller) = request.token_email() else {
        return unauthorized();
    };
    let Ok(body) = request.json() else {
        return ApiResponse::malformed_body();
    };

    let Some(role) = str_field(&body, "role").and_then(Role::parse) else {
        return ApiResponse::bad_request("role is required");
    };

    let now = Utc::now();
    let id = request.param("id").unwrap_or_default();
    let Some(mut member) = roster(&caller, now).into_iter().find(|m| m.id == id) else {
        return ApiResponse::with_status(
            StatusCode::NOT_FOUND,
            json!({ "error": "Member not found" }),
        );
    };

    member.role = role;
    member.updated_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    ApiResponse::ok(json!({ "member": member }))
}

fn remove_member(request: &ApiRequest) -> ApiResponse {
    let Some(caller) = request.token_email() else {
        return unauthorized();
    };

    let id = request.param("id").unwrap_or_default();
    let members = roster(&caller, Utc::now());

    // Every roster has teammates, so a removal never empties it.
    if !members.iter().any(|m| m.id == id) {
        return ApiResponse::auth_rejected(StatusCode::NOT_FOUND, "Member not found");
    }

    ApiResponse::ok(json!({ "ok": true }))
}
