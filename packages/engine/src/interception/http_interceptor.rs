// packages/engine/src/interception/http_interceptor.rs
//! Tower middleware that answers registered requests locally
//!
//! Wraps whatever service performs outgoing HTTP calls. While the runtime is
//! installed, a request whose method and path match the registry is answered
//! from the shared contract without reaching the inner service. Everything
//! else, including every request before installation completes, passes
//! through unmodified.

use crate::contract::{ApiRequest, MockRequest, MockResponse, ResponseSource};
use crate::interception::runtime::InterceptionRuntime;
use futures::future::{BoxFuture, FutureExt};
use http_body_util::BodyExt;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::debug;

/// Layer produced by [`InterceptionRuntime::layer`]
#[derive(Clone)]
pub struct InterceptLayer {
    runtime: InterceptionRuntime,
}

impl InterceptLayer {
    pub fn new(runtime: InterceptionRuntime) -> Self {
        Self { runtime }
    }
}

impl<S> Layer<S> for InterceptLayer {
    type Service = InterceptService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InterceptService {
            inner,
            runtime: self.runtime.clone(),
        }
    }
}

/// Intercepting wrapper around an outgoing HTTP service
#[derive(Clone)]
pub struct InterceptService<S> {
    inner: S,
    runtime: InterceptionRuntime,
}

impl<S> Service<MockRequest> for InterceptService<S>
where
    S: Service<MockRequest, Response = MockResponse> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = MockResponse;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<MockResponse, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: MockRequest) -> Self::Future {
        if self.runtime.is_installed() {
            let matched = self
                .runtime
                .registry()
                .lookup(request.method(), request.uri().path())
                .map(|route| (route.entry.clone(), route.params));

            if let Some((entry, params)) = matched {
                let runtime = self.runtime.clone();

                return async move {
                    let (parts, body) = request.into_parts();
                    let body = body
                        .collect()
                        .await
                        .map(|collected| collected.to_bytes())
                        .unwrap_or_default();

                    if runtime.log_requests() {
                        debug!("Intercepted {} {} -> {}", parts.method, parts.uri, entry.operation);
                    }

                    let api_request = ApiRequest::new(parts.method, &parts.uri, parts.headers, body)
                        .with_params(params);
                    let response = entry.respond(&api_request, runtime.mode());
                    response.settle().await;

                    metrics::counter!(
                        "mock_requests_total",
                        "source" => ResponseSource::Interception.as_str(),
                        "operation" => entry.operation
                    )
                    .increment(1);

                    Ok(response.into_http(ResponseSource::Interception))
                }
                .boxed();
            }
        }

        debug!("Passing through {} {}", request.method(), request.uri());
        metrics::counter!("mock_bypassed_total").increment(1);

        // The clone may not be ready; keep the instance that was polled.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        async move { inner.call(request).await }.boxed()
    }
}
