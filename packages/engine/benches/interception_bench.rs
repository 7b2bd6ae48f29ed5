// packages/engine/benches/interception_bench.rs
use brandview_mock_engine::contract::{self, ApiRequest, MockRequest};
use brandview_mock_engine::{FallbackRouter, InterceptionRuntime, Mode};
use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http_body_util::Full;
use hyper::{HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;
use tower::{service_fn, Layer, ServiceExt};

fn request(method: Method, uri: &str) -> MockRequest {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Full::new(Bytes::new()))
        .unwrap()
}

fn bench_registry_lookup(c: &mut Criterion) {
    let registry = contract::registry().unwrap();

    c.bench_function("registry.lookup.nested", |b| {
        b.iter(|| registry.lookup(&Method::POST, black_box("/api/brands/brand_inventec/personas")))
    });

    c.bench_function("registry.lookup.miss", |b| {
        b.iter(|| registry.lookup(&Method::GET, black_box("/api/unknown/route")))
    });

    let entry = registry.operation("current_plan").unwrap();
    let uri = "/api/plan/current".parse().unwrap();
    let api_request = ApiRequest::new(Method::GET, &uri, HeaderMap::new(), Bytes::new());

    c.bench_function("responder.current_plan", |b| {
        b.iter(|| entry.respond(black_box(&api_request), Mode::Mock))
    });
}

fn bench_adapters(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let registry = Arc::new(contract::registry().unwrap());

    let runtime = InterceptionRuntime::new(Arc::clone(&registry), Mode::Mock);
    rt.block_on(runtime.install_now());
    let network = service_fn(|_request: MockRequest| async {
        Ok::<_, Infallible>(Response::new(Full::new(Bytes::new())))
    });
    let intercepting = runtime.layer().layer(network);

    c.bench_function("interception.get_brand", |b| {
        b.iter(|| {
            let service = intercepting.clone();
            let uri = "http://api.test/api/brands/brand_inventec";
            rt.block_on(service.oneshot(request(Method::GET, uri)))
        })
    });

    let router = FallbackRouter::new(registry, Mode::Mock);

    c.bench_function("fallback.get_brand", |b| {
        b.iter(|| rt.block_on(router.handle(request(Method::GET, "/api/brands/brand_inventec"))))
    });
}

criterion_group!(benches, bench_registry_lookup, bench_adapters);
criterion_main!(benches);
