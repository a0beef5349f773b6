//! Handlers for short URL redirects.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde_json::json;

use crate::domain::entities::GLOBAL_NAMESPACE;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;

/// Redirects a global short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Each successful redirect increments the link's hit counter.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    resolve(&state, GLOBAL_NAMESPACE, &code).await
}

/// Redirects a short code published under a company slug.
///
/// # Endpoint
///
/// `GET /{slug}/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the pair doesn't exist.
pub async fn slug_redirect_handler(
    Path((slug, code)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    resolve(&state, &slug, &code).await
}

async fn resolve(state: &AppState, namespace: &str, code: &str) -> Result<Redirect, AppError> {
    // malformed codes cannot exist, skip the store
    if !is_valid_code(code) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "namespace": namespace, "code": code }),
        ));
    }

    let long_url = state.allocation_service.resolve(namespace, code).await?;
    tracing::debug!(namespace, code, "Redirecting");

    Ok(Redirect::temporary(&long_url))
}
