#![allow(dead_code)]

use axum::{Router, middleware};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use std::sync::Arc;
use slug_shortener::api;
use slug_shortener::api::middleware::auth;
use slug_shortener::application::services::{AllocationConfig, AuthService, ReservationConfig};
use slug_shortener::domain::entities::NewUrlEntry;
use slug_shortener::domain::repositories::{SlugReservationRepository, UrlEntryRepository};
use slug_shortener::infrastructure::memory::{
    MemorySlugReservationRepository, MemoryUrlEntryRepository,
};
use slug_shortener::state::AppState;

pub const TEST_TOKEN: &str = "test-token";
pub const BASE_URL: &str = "https://s.example.com";

/// State over fresh in-memory stores, with direct handles on the stores.
pub struct TestContext {
    pub state: AppState,
    pub url_entries: Arc<MemoryUrlEntryRepository>,
    pub reservations: Arc<MemorySlugReservationRepository>,
}

pub fn create_test_state() -> TestContext {
    let url_entries = Arc::new(MemoryUrlEntryRepository::new());
    let reservations = Arc::new(MemorySlugReservationRepository::new());

    let state = AppState::new(
        url_entries.clone(),
        reservations.clone(),
        AllocationConfig::default(),
        ReservationConfig::default(),
        AuthService::new([TEST_TOKEN]),
        BASE_URL,
    );

    TestContext {
        state,
        url_entries,
        reservations,
    }
}

/// Server exposing the protected API under `/api`, with Bearer auth applied.
pub fn api_server(state: AppState) -> TestServer {
    let app = Router::new()
        .nest(
            "/api",
            api::routes::protected_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .with_state(state);

    TestServer::new(app).unwrap()
}

pub async fn create_test_entry(ctx: &TestContext, namespace: &str, code: &str, url: &str) {
    let inserted = ctx
        .url_entries
        .insert_if_absent(NewUrlEntry {
            namespace: namespace.to_string(),
            code: code.to_string(),
            record_id: Some("rec-1".to_string()),
            long_url: url.to_string(),
        })
        .await
        .unwrap();

    assert!(inserted);
}

pub async fn create_expired_reservation(ctx: &TestContext, slug: &str, owner: &str) {
    ctx.reservations
        .create(slug, owner, Utc::now() - Duration::seconds(1))
        .await
        .unwrap()
        .unwrap();
}

/// Value of the `Authorization` header for [`TEST_TOKEN`].
pub fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}
