// packages/engine/src/contract/competitors.rs
//! Competitor endpoints
//!
//! The demo brand ships with a fixed competitor list (`comp_1` onwards);
//! every other brand starts empty. Updates accept the demo ids and ids
//! minted by a create, anything else is unknown.

use crate::contract::brands::DEMO_BRAND_ID;
use crate::contract::request::{str_field, ApiRequest};
use crate::contract::response::ApiResponse;
use crate::routing::{HandlerEntry, RealModePolicy};
use crate::utils::errors::Result;
use crate::utils::ids::{matches_kind, new_id};
use hyper::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Identifier kind for created competitors
pub const COMPETITOR_KIND: &str = "competitor";

const DEMO_PREFIX: &str = "comp_";

const DEMO_COMPETITORS: [&str; 9] = [
    "HPE", "Supermicro", "ASUS", "Inspur", "Dell", "Lenovo", "Cisco", "Huawei", "H3C",
];

pub(crate) fn entries() -> Result<Vec<HandlerEntry>> {
    use RealModePolicy::Bridge;

    Ok(vec![
        HandlerEntry::new(
            Method::GET,
            "/api/brands/:brandId/competitors",
            "list_competitors",
            Bridge,
            list_competitors,
        )?,
        HandlerEntry::new(
            Method::POST,
            "/api/brands/:brandId/competitors",
            "create_competitor",
            Bridge,
            create_competitor,
        )?,
        HandlerEntry::new(
            Method::PATCH,
            "/api/competitors/:id",
            "update_competitor",
            Bridge,
            update_competitor,
        )?,
        HandlerEntry::new(
            Method::DELETE,
            "/api/competitors/:id",
            "delete_competitor",
            Bridge,
            delete_competitor,
        )?,
    ])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub id: String,
    pub brand_id: String,
    pub name: String,
    pub product: Option<String>,
    pub region: Option<String>,
}

impl Competitor {
    fn demo(index: usize, name: &str) -> Self {
        Self {
            id: format!("{}{}", DEMO_PREFIX, index + 1),
            brand_id: DEMO_BRAND_ID.to_string(),
            name: name.to_string(),
            product: None,
            region: None,
        }
    }

    /// Apply the fields present in a PATCH body
    fn merge(&mut self, body: &Map<String, Value>) {
        if let Some(name) = str_field(body, "name") {
            self.name = name.to_string();
        }
        if let Some(product) = body.get("product") {
            self.product = product.as_str().map(str::to_string);
        }
        if let Some(region) = body.get("region") {
            self.region = region.as_str().map(str::to_string);
        }
    }
}

/// Competitors listed for `brand_id`
pub fn competitors_for(brand_id: &str) -> Vec<Competitor> {
    if brand_id != DEMO_BRAND_ID {
        return Vec::new();
    }

    DEMO_COMPETITORS
        .iter()
        .enumerate()
        .map(|(index, name)| Competitor::demo(index, name))
        .collect()
}

/// Resolve an id to the competitor an update applies to
fn find(id: &str) -> Option<Competitor> {
    if matches_kind(id, COMPETITOR_KIND) {
        return Some(Competitor {
            id: id.to_string(),
            brand_id: String::new(),
            name: "New Competitor".to_string(),
            product: None,
            region: None,
        });
    }

    let index: usize = id.strip_prefix(DEMO_PREFIX)?.parse().ok()?;
    let name = DEMO_COMPETITORS.get(index.checked_sub(1)?)?;
    Some(Competitor::demo(index - 1, name))
}

fn list_competitors(request: &ApiRequest) -> ApiResponse {
    let brand_id = request.param("brandId").unwrap_or_default();
    ApiResponse::ok(json!({ "competitors": competitors_for(brand_id) }))
}

fn create_competitor(request: &ApiRequest) -> ApiResponse {
    let Ok(body) = request.json() else {
        return ApiResponse::malformed_body();
    };

    let brand_id = request.param("brandId").unwrap_or_default();
    let name = str_field(&body, "name").unwrap_or("New Competitor");

    if competitors_for(brand_id).iter().any(|c| c.name == name) {
        return ApiResponse::bad_request("Competitor with this name already exists");
    }

    let competitor = Competitor {
        id: new_id(COMPETITOR_KIND),
        brand_id: brand_id.to_string(),
        name: name.to_string(),
        product: str_field(&body, "product").map(str::to_string),
        region: str_field(&body, "region").map(str::to_string),
    };

    ApiResponse::ok(json!({ "competitor": competitor }))
}

fn update_competitor(request: &ApiRequest) -> ApiResponse {
    let Ok(body) = request.json() else {
        return ApiResponse::malformed_body();
    };

    let Some(mut competitor) = find(request.param("id").unwrap_or_default()) else {
        return ApiResponse::with_status(
            StatusCode::NOT_FOUND,
            json!({ "error": "Competitor not found" }),
        );
    };

    competitor.merge(&body);
    ApiResponse::ok(json!({ "competitor": competitor }))
}

fn delete_competitor(_request: &ApiRequest) -> ApiResponse {
    ApiResponse::ok(json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use hyper::HeaderMap;

    fn request(method: Method, key: &str, value: &str, body: &'static str) -> ApiRequest {
        let params = [(key.to_string(), value.to_string())].into_iter().collect();
        let body = Bytes::from_static(body.as_bytes());

        ApiRequest::new(method, &"/".parse().unwrap(), HeaderMap::new(), body).with_params(params)
    }

    #[test]
    fn test_demo_brand_lists_competitors() {
        let demo = list_competitors(&request(Method::GET, "brandId", DEMO_BRAND_ID, ""));
        let listed: Vec<Competitor> =
            serde_json::from_value(demo.body["competitors"].clone()).unwrap();

        assert_eq!(listed.len(), DEMO_COMPETITORS.len());
        assert_eq!(listed[0].id, "comp_1");
        assert!(listed.iter().all(|c| c.brand_id == DEMO_BRAND_ID));

        let other = list_competitors(&request(Method::GET, "brandId", "brand_x", ""));
        assert_eq!(other.body, json!({ "competitors": [] }));
    }

    #[test]
    fn test_create_rejects_duplicate_name() {
        let duplicate = create_competitor(&request(
            Method::POST,
            "brandId",
            DEMO_BRAND_ID,
            r#"{"name":"HPE"}"#,
        ));
        assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);

        // The same name is free on another brand
        let created = create_competitor(&request(
            Method::POST,
            "brandId",
            "brand_x",
            r#"{"name":"HPE","region":"EU"}"#,
        ));
        let competitor: Competitor =
            serde_json::from_value(created.body["competitor"].clone()).unwrap();
        assert!(matches_kind(&competitor.id, COMPETITOR_KIND));
        assert_eq!(competitor.region.as_deref(), Some("EU"));
        assert_eq!(competitor.product, None);
    }

    #[test]
    fn test_update_known_and_unknown_ids() {
        let demo = update_competitor(&request(
            Method::PATCH,
            "id",
            "comp_2",
            r#"{"product":"Rack servers"}"#,
        ));
        assert_eq!(demo.body["competitor"]["name"], "Supermicro");
        assert_eq!(demo.body["competitor"]["product"], "Rack servers");

        let created_id = new_id(COMPETITOR_KIND);
        let created = update_competitor(&request(
            Method::PATCH,
            "id",
            &created_id,
            r#"{"name":"Quanta"}"#,
        ));
        assert_eq!(created.body["competitor"]["id"], created_id.as_str());
        assert_eq!(created.body["competitor"]["name"], "Quanta");

        for unknown in ["comp_0", "comp_99", "persona_1_abcdef", "x"] {
            let response = update_competitor(&request(Method::PATCH, "id", unknown, "{}"));
            assert_eq!(response.status, StatusCode::NOT_FOUND, "{unknown}");
        }
    }
}
