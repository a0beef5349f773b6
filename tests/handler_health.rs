mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use slug_shortener::api::handlers::health_handler;
use slug_shortener::application::services::{AllocationConfig, AuthService, ReservationConfig};
use slug_shortener::domain::entities::{NewUrlEntry, UrlEntry};
use slug_shortener::domain::repositories::UrlEntryRepository;
use slug_shortener::error::AppError;
use slug_shortener::infrastructure::memory::MemorySlugReservationRepository;
use slug_shortener::state::AppState;
use std::sync::Arc;

/// Store whose every call fails, as if the database were down.
struct UnavailableStore;

#[async_trait]
impl UrlEntryRepository for UnavailableStore {
    async fn insert_if_absent(&self, _new_entry: NewUrlEntry) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn resolve_and_touch(
        &self,
        _namespace: &str,
        _code: &str,
    ) -> Result<Option<String>, AppError> {
        Err(unavailable())
    }

    async fn find(&self, _namespace: &str, _code: &str) -> Result<Option<UrlEntry>, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

fn unavailable() -> AppError {
    AppError::internal("Database unavailable", json!({}))
}

fn health_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_ok() {
    let ctx = common::create_test_state();
    let server = health_server(ctx.state.clone());

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["storage"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_storage_down() {
    let state = AppState::new(
        Arc::new(UnavailableStore),
        Arc::new(MemorySlugReservationRepository::new()),
        AllocationConfig::default(),
        ReservationConfig::default(),
        AuthService::new([common::TEST_TOKEN]),
        common::BASE_URL,
    );
    let server = health_server(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["storage"]["status"], "error");
}

#[tokio::test]
async fn test_storage_failure_surfaces_as_internal_error() {
    let state = AppState::new(
        Arc::new(UnavailableStore),
        Arc::new(MemorySlugReservationRepository::new()),
        AllocationConfig::default(),
        ReservationConfig::default(),
        AuthService::new([common::TEST_TOKEN]),
        common::BASE_URL,
    );
    let server = common::api_server(state);

    let response = server
        .post("/api/shorten")
        .add_header("Authorization", common::bearer())
        .json(&json!({
            "urls": [{ "record_id": "r1", "long_url": "https://example.com" }]
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "internal_error"
    );
}
