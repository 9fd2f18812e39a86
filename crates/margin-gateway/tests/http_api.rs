use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use jiff::Timestamp;
use margin_core::error::Result as StorageResult;
use margin_core::{
    Clock, ManualClock, ReadShareStore, ShareCode, ShareRecord, ShareStore, Sharer, StorageError,
    SHARE_TTL,
};
use margin_gateway::{App, AppState, GatewayConfig};
use margin_generator::{RandomGenerator, ScriptedGenerator};
use margin_service::{ShareService, ShareSettings};
use margin_storage::InMemoryShareStore;
use serde_json::Value;
use tower::ServiceExt;

const FRONTEND: &str = "https://margin.example";

fn clock() -> ManualClock {
    ManualClock::new(Timestamp::from_second(1_700_000_000).unwrap())
}

fn settings() -> ShareSettings {
    ShareSettings::builder().frontend_url(FRONTEND).build()
}

fn config() -> GatewayConfig {
    GatewayConfig::builder().frontend_url(FRONTEND).build()
}

fn router_for(sharer: Arc<dyn Sharer>, config: &GatewayConfig) -> Router {
    App::router(AppState::new(sharer), config)
}

fn app() -> Router {
    let clock = clock();
    let service = ShareService::with_clock(
        InMemoryShareStore::with_clock(clock.clone()),
        RandomGenerator::new(),
        settings(),
        clock,
    );
    router_for(Arc::new(service), &config())
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_share(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/share")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A store whose backend is always down.
struct DownStore;

#[async_trait]
impl ReadShareStore for DownStore {
    async fn get(&self, _code: &ShareCode) -> StorageResult<Option<ShareRecord>> {
        Err(StorageError::Unavailable("redis://internal:6379 refused".to_string()))
    }
}

#[async_trait]
impl ShareStore for DownStore {
    async fn put(&self, _code: &ShareCode, _record: &ShareRecord, _ttl: Duration) -> StorageResult<()> {
        Err(StorageError::Unavailable("redis://internal:6379 refused".to_string()))
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let response = send(&app(), get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_then_fetch_share() {
    let app = app();
    let markdown = "# Notes\n\n- ünïcödé 🎉";

    let response = send(&app, post_share(markdown)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;

    let code = created["code"].as_str().unwrap().to_string();
    assert!(margin_core::code::is_valid(&code));
    assert_eq!(created["url"], format!("{FRONTEND}/?code={code}"));
    assert_eq!(created["expiresAt"], "2023-11-21T22:13:20Z");

    let response = send(&app, get(&format!("/api/share/{code}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert_eq!(doc["markdown"], markdown);
    assert_eq!(doc["createdAt"], "2023-11-14T22:13:20Z");
    assert_eq!(doc["expiresAt"], "2023-11-21T22:13:20Z");
}

#[tokio::test]
async fn lookup_is_case_insensitive() {
    let clock = clock();
    let service = ShareService::with_clock(
        InMemoryShareStore::with_clock(clock.clone()),
        ScriptedGenerator::new([ShareCode::new_unchecked("ABC234")]),
        settings(),
        clock,
    );
    let app = router_for(Arc::new(service), &config());

    let response = send(&app, post_share("# Hello")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, get("/api/share/abc234")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["markdown"], "# Hello");
}

#[tokio::test]
async fn empty_document_is_rejected() {
    let app = app();

    for body in ["", "  \n\t "] {
        let response = send(&app, post_share(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(json_body(response).await["error"], "invalid_request");
    }
}

#[tokio::test]
async fn malformed_code_is_bad_request() {
    let app = app();

    for code in ["ABC23", "ABC2345", "ABC230", "ABCI23"] {
        let response = send(&app, get(&format!("/api/share/{code}"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "code {code}");
        assert_eq!(json_body(response).await["error"], "invalid_code");
    }
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let response = send(&app(), get("/api/share/ZZZZZZ")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Share not found or has expired");
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let response = send(&app(), get("/nope")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "not_found", "message": "Route not found" })
    );
}

#[tokio::test]
async fn wrong_method_is_json_not_found() {
    let app = app();
    let requests = [
        (Method::GET, "/api/share"),
        (Method::DELETE, "/api/share/ABC234"),
        (Method::POST, "/health"),
    ];

    for (method, uri) in requests {
        let request = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "error": "not_found", "message": "Route not found" })
        );
    }
}

#[tokio::test]
async fn exhausted_retries_are_service_unavailable() {
    let clock = clock();
    let store = InMemoryShareStore::with_clock(clock.clone());
    store
        .put(
            &ShareCode::new_unchecked("AAAAAA"),
            &ShareRecord::new("taken", clock.now()),
            SHARE_TTL,
        )
        .await
        .unwrap();
    let service = ShareService::with_clock(
        store,
        ScriptedGenerator::new([ShareCode::new_unchecked("AAAAAA")]),
        settings(),
        clock,
    );
    let app = router_for(Arc::new(service), &config());

    let response = send(&app, post_share("# New")).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["error"], "service_unavailable");
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
    let service = ShareService::new(DownStore, RandomGenerator::new(), settings());
    let app = router_for(Arc::new(service), &config());

    let response = send(&app, post_share("# Hello")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "storage_error");
    assert!(!body["message"].as_str().unwrap().contains("internal:6379"));

    let response = send(&app, get("/api/share/ABC234")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let clock = clock();
    let service = ShareService::with_clock(
        InMemoryShareStore::with_clock(clock.clone()),
        RandomGenerator::new(),
        settings(),
        clock,
    );
    let config = GatewayConfig::builder()
        .frontend_url(FRONTEND)
        .max_body_bytes(16)
        .build();
    let app = router_for(Arc::new(service), &config);

    let response = send(&app, post_share("#".repeat(64))).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json_body(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn non_utf8_body_is_rejected() {
    let response = send(&app(), post_share(vec![0xff_u8, 0xfe, 0xfd])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn cors_allows_configured_and_dev_origins() {
    let app = app();

    for origin in [FRONTEND, "http://localhost:5173", "http://localhost:4173"] {
        let request = Request::builder()
            .uri("/api/share/ZZZZZZ")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            origin,
            "origin {origin}"
        );
    }
}

#[tokio::test]
async fn cors_ignores_other_origins() {
    let request = Request::builder()
        .uri("/api/share/ZZZZZZ")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = send(&app(), request).await;

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn cors_covers_unknown_api_routes() {
    let request = Request::builder()
        .uri("/api/nope")
        .header(header::ORIGIN, FRONTEND)
        .body(Body::empty())
        .unwrap();
    let response = send(&app(), request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], FRONTEND);
    assert_eq!(json_body(response).await["message"], "Route not found");
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/share")
        .header(header::ORIGIN, FRONTEND)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(&app(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], FRONTEND);
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("GET"));
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
    assert!(allowed.contains("content-type"));
}

#[tokio::test]
async fn requests_without_origin_pass_through() {
    let response = send(&app(), post_share("# Hello")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
