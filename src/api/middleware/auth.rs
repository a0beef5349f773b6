//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Admits `/api` requests carrying one of the configured API tokens.
///
/// Tokens identify API clients, not companies: the company a request acts
/// for travels in the request body as `company_id`.
///
/// Expects `Authorization: Bearer <token>`. A missing or malformed header,
/// or a token outside `ALLOWED_API_TOKENS`, yields `401 Unauthorized` with a
/// `WWW-Authenticate: Bearer` header.
///
/// ```rust,ignore
/// let api = api::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            tracing::debug!(path = %parts.uri.path(), "Missing bearer token");
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    if let Err(err) = state.auth_service.authenticate(&token) {
        tracing::warn!(path = %parts.uri.path(), "Rejected unknown API token");
        return Err(err);
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
