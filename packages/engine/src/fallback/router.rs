// packages/engine/src/fallback/router.rs
//! Server-side dispatch for requests the interceptor did not answer
//!
//! Uses the same registry and responders as the interception runtime. The
//! only extra step is the per-entry
//! [`RealModePolicy`](crate::routing::RealModePolicy) check against the
//! injected mode, which
//! [`HandlerEntry::respond`](crate::routing::HandlerEntry::respond) performs
//! for both adapters.

use crate::contract::{ApiRequest, ApiResponse, MockRequest, MockResponse, ResponseSource};
use crate::mode::Mode;
use crate::routing::HandlerRegistry;
use futures::future::{BoxFuture, FutureExt};
use http_body_util::BodyExt;
use hyper::body::Body;
use hyper::Request;
use std::convert::Infallible;
use std::fmt::Display;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use tracing::{debug, warn};

/// Fallback router
pub struct FallbackRouter {
    registry: Arc<HandlerRegistry>,
    mode: Mode,
}

impl FallbackRouter {
    pub fn new(registry: Arc<HandlerRegistry>, mode: Mode) -> Self {
        Self { registry, mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Answer a request; never fails
    pub async fn handle<B>(&self, request: Request<B>) -> MockResponse
    where
        B: Body,
        B::Error: Display,
    {
        let (parts, body) = request.into_parts();

        let Some(route) = self.registry.lookup(&parts.method, parts.uri.path()) else {
            debug!("No fallback route for {} {}", parts.method, parts.uri.path());
            return ApiResponse::not_found(parts.uri.path()).into_http(ResponseSource::Fallback);
        };

        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!("Failed to read request body: {}", e);
                return ApiResponse::malformed_body().into_http(ResponseSource::Fallback);
            }
        };

        debug!(
            "Fallback {} {} -> {} ({} mode)",
            parts.method, parts.uri, route.entry.operation, self.mode
        );

        let entry = route.entry;
        let api_request = ApiRequest::new(parts.method, &parts.uri, parts.headers, body)
            .with_params(route.params);
        let response = entry.respond(&api_request, self.mode);
        response.settle().await;

        metrics::counter!(
            "mock_requests_total",
            "source" => ResponseSource::Fallback.as_str(),
            "operation" => entry.operation
        )
        .increment(1);

        response.into_http(ResponseSource::Fallback)
    }
}

/// Tower adapter so the router can sit behind the interception layer in-process
#[derive(Clone)]
pub struct FallbackService {
    router: Arc<FallbackRouter>,
}

impl FallbackService {
    pub fn new(router: Arc<FallbackRouter>) -> Self {
        Self { router }
    }
}

impl Service<MockRequest> for FallbackService {
    type Response = MockResponse;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<MockResponse, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: MockRequest) -> Self::Future {
        let router = Arc::clone(&self.router);
        async move { Ok(router.handle(request).await) }.boxed()
    }
}
