// packages/engine/src/contract/mod.rs
//! The mock API contract
//!
//! Every endpoint is defined once, as a [`Responder`](crate::routing::Responder)
//! plus a [`RealModePolicy`](crate::routing::RealModePolicy). The interception
//! runtime and the fallback route layer both dispatch through the registry
//! built here; they differ only in how a request arrives and how the
//! response leaves.
//!
//! | Area | Module |
//! |------|--------|
//! | Analysis jobs | [`analysis`] |
//! | Authentication | [`auth`] |
//! | Payment provider | [`billing`] |
//! | Brands & personas | [`brands`] |
//! | Competitors | [`competitors`] |
//! | Onboarding | [`onboarding`] |
//! | Subscription plans | [`plan`] |
//! | Team roster | [`team`] |

pub mod analysis;
pub mod auth;
pub mod billing;
pub mod brands;
pub mod competitors;
pub mod onboarding;
pub mod plan;
pub mod request;
pub mod response;
pub mod team;

pub use request::{ApiRequest, MalformedBody};
pub use response::{ApiResponse, ResponseSource, NOT_IMPLEMENTED_TAG, SOURCE_HEADER};

use crate::routing::HandlerRegistry;
use crate::utils::errors::Result;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response};

/// Outgoing request as seen by the interception layer
pub type MockRequest = Request<Full<Bytes>>;

/// Response produced by either adapter
pub type MockResponse = Response<Full<Bytes>>;

/// Build the registry holding every operation of the contract
pub fn registry() -> Result<HandlerRegistry> {
    let mut entries = Vec::new();
    entries.extend(analysis::entries()?);
    entries.extend(auth::entries()?);
    entries.extend(billing::entries()?);
    entries.extend(brands::entries()?);
    entries.extend(competitors::entries()?);
    entries.extend(onboarding::entries()?);
    entries.extend(plan::entries()?);
    entries.extend(team::entries()?);

    HandlerRegistry::from_entries(entries)
}
