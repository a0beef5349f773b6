//! Handlers for short link hit counters.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::entry::EntryResponse;
use crate::domain::entities::GLOBAL_NAMESPACE;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a global short link with its hit counter.
///
/// # Endpoint
///
/// `GET /api/entries/{code}`
///
/// Reading the counter does not count as an access.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn entry_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<EntryResponse>, AppError> {
    let entry = state
        .allocation_service
        .entry(GLOBAL_NAMESPACE, &code)
        .await?;

    Ok(Json(EntryResponse::new(entry, &state.base_url)))
}

/// Returns a short link published under a company slug.
///
/// # Endpoint
///
/// `GET /api/entries/{slug}/{code}`
pub async fn slug_entry_handler(
    Path((slug, code)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<EntryResponse>, AppError> {
    let entry = state.allocation_service.entry(&slug, &code).await?;

    Ok(Json(EntryResponse::new(entry, &state.base_url)))
}
