// packages/engine/src/contract/brands.rs
//! Brand and persona endpoints
//!
//! Reads are derived from the requested id alone, so repeated GETs for the
//! same key return identical bytes. Creates mint a fresh id and echo the
//! submitted fields with defaults filled in; the returned entity has the
//! same shape the paired GET produces.

use crate::contract::request::{str_field, ApiRequest};
use crate::contract::response::ApiResponse;
use crate::routing::{HandlerEntry, RealModePolicy};
use crate::utils::errors::Result;
use crate::utils::ids::{matches_kind, new_id};
use hyper::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Built-in demo brand
pub const DEMO_BRAND_ID: &str = "brand_inventec";
const DEMO_BRAND_NAME: &str = "Inventec";
const DEMO_BRAND_DESCRIPTION: &str = "Inventec product lines";

/// Identifier kind for created personas
pub const PERSONA_KIND: &str = "persona";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: String,
    pub brand_id: String,
    pub name: String,
    pub description: String,
}

impl Brand {
    /// The brand a GET for `id` returns
    pub fn for_id(id: &str) -> Self {
        if id == DEMO_BRAND_ID {
            Self::demo()
        } else {
            Self {
                id: id.to_string(),
                name: "Brand".to_string(),
                description: String::new(),
            }
        }
    }

    pub fn demo() -> Self {
        Self {
            id: DEMO_BRAND_ID.to_string(),
            name: DEMO_BRAND_NAME.to_string(),
            description: DEMO_BRAND_DESCRIPTION.to_string(),
        }
    }
}

pub(crate) fn entries() -> Result<Vec<HandlerEntry>> {
    use RealModePolicy::Bridge;

    // No brand backend exists yet; every brand route bridges to the mock payload.
    Ok(vec![
        HandlerEntry::new(Method::GET, "/api/brands", "list_brands", Bridge, list_brands)?,
        HandlerEntry::new(Method::POST, "/api/brands", "create_brand", Bridge, create_brand)?,
        HandlerEntry::new(Method::GET, "/api/brands/:id", "get_brand", Bridge, get_brand)?,
        HandlerEntry::new(
            Method::PATCH,
            "/api/brands/:id",
            "update_brand",
            Bridge,
            update_brand,
        )?,
        HandlerEntry::new(
            Method::DELETE,
            "/api/brands/:id",
            "delete_brand",
            Bridge,
            delete_brand,
        )?,
        HandlerEntry::new(
            Method::GET,
            "/api/brands/:brandId/personas",
            "list_personas",
            Bridge,
            list_personas,
        )?,
        HandlerEntry::new(
            Method::POST,
            "/api/brands/:brandId/personas",
            "create_persona",
            Bridge,
            create_persona,
        )?,
        HandlerEntry::new(
            Method::PATCH,
            "/api/personas/:id",
            "update_persona",
            Bridge,
            update_persona,
        )?,
        HandlerEntry::new(
            Method::DELETE,
            "/api/personas/:id",
            "delete_persona",
            Bridge,
            delete_persona,
        )?,
    ])
}

/// Body fields default when absent, so a malformed body reads as empty.
fn body_or_empty(request: &ApiRequest) -> Map<String, Value> {
    request.json().unwrap_or_default()
}

fn brand_response(brand: Brand) -> ApiResponse {
    ApiResponse::ok(json!({ "brand": brand }))
}

fn list_brands(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({ "brands": [Brand::demo()] }))
}

fn create_brand(request: &ApiRequest) -> ApiResponse {
    let body = body_or_empty(request);

    brand_response(Brand {
        id: new_id("brand"),
        name: str_field(&body, "name").unwrap_or("New Brand").to_string(),
        description: str_field(&body, "description").unwrap_or_default().to_string(),
    })
}

fn get_brand(request: &ApiRequest) -> ApiResponse {
    let id = request.param("id").unwrap_or_default();
    brand_response(Brand::for_id(id))
}

fn update_brand(request: &ApiRequest) -> ApiResponse {
    let body = body_or_empty(request);
    let mut brand = Brand::for_id(request.param("id").unwrap_or_default());

    if let Some(name) = str_field(&body, "name") {
        brand.name = name.to_string();
    }
    if let Some(description) = body.get("description").and_then(Value::as_str) {
        brand.description = description.to_string();
    }

    brand_response(brand)
}

fn delete_brand(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({ "ok": true }))
}

fn list_personas(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({ "personas": Vec::<Persona>::new() }))
}

fn create_persona(request: &ApiRequest) -> ApiResponse {
    let body = body_or_empty(request);

    let persona = Persona {
        id: new_id(PERSONA_KIND),
        brand_id: request.param("brandId").unwrap_or_default().to_string(),
        name: str_field(&body, "name").unwrap_or("New Persona").to_string(),
        description: str_field(&body, "description").unwrap_or_default().to_string(),
    };

    ApiResponse::ok(json!({ "persona": persona }))
}

/// Only ids minted by a create are known; the body is merged over the defaults.
fn update_persona(request: &ApiRequest) -> ApiResponse {
    let body = body_or_empty(request);
    let id = request.param("id").unwrap_or_default();

    if !matches_kind(id, PERSONA_KIND) {
        return ApiResponse::with_status(
            StatusCode::NOT_FOUND,
            json!({ "error": "Persona not found" }),
        );
    }

    let persona = Persona {
        id: id.to_string(),
        brand_id: str_field(&body, "brandId").unwrap_or_default().to_string(),
        name: str_field(&body, "name").unwrap_or("New Persona").to_string(),
        description: str_field(&body, "description").unwrap_or_default().to_string(),
    };

    ApiResponse::ok(json!({ "persona": persona }))
}

fn delete_persona(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({ "ok": true }))
}
