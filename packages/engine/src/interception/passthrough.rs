// packages/engine/src/interception/passthrough.rs
//! Real network round trip for requests the interceptor does not answer

use crate::contract::{MockRequest, MockResponse};
use crate::utils::errors::MockError;
use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use http_body_util::{BodyExt, Full};
use hyper::Response;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::task::{Context, Poll};
use tower::Service;
use tracing::debug;

/// Outgoing HTTP client as a tower service. Request URIs must be absolute.
#[derive(Clone)]
pub struct HttpPassthrough {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpPassthrough {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self { client }
    }
}

impl Default for HttpPassthrough {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<MockRequest> for HttpPassthrough {
    type Response = MockResponse;
    type Error = MockError;
    type Future = BoxFuture<'static, Result<MockResponse, MockError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: MockRequest) -> Self::Future {
        let client = self.client.clone();

        async move {
            debug!("Forwarding {} {} to network", request.method(), request.uri());

            let response = client
                .request(request)
                .await
                .map_err(|e| MockError::Transport(format!("Request failed: {}", e)))?;

            let (parts, body) = response.into_parts();
            let body = body
                .collect()
                .await
                .map_err(|e| MockError::Transport(format!("Response body error: {}", e)))?
                .to_bytes();

            Ok(Response::from_parts(parts, Full::new(body)))
        }
        .boxed()
    }
}
