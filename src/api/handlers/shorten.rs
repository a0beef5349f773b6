//! Handlers for the shortening endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse, ShortenedItem, SlugShortenRequest};
use crate::application::services::{ShortenRequest as ShortenInput, ShortenedUrl};
use crate::error::AppError;
use crate::state::AppState;

/// Creates shortened URLs in the global namespace.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "urls": [
///     { "record_id": "sms-1", "long_url": "https://example.com" }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "count": 1,
///   "items": [
///     {
///       "record_id": "sms-1",
///       "long_url": "https://example.com",
///       "short_code": "aZ3kQ9",
///       "short_url": "https://s.example.com/aZ3kQ9"
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let urls = payload.urls.into_iter().map(ShortenInput::from).collect();
    let shortened = state.shortening_service.shorten_batch(urls).await?;

    Ok(Json(to_response(&state, shortened)))
}

/// Creates shortened URLs under a company slug.
///
/// # Endpoint
///
/// `POST /api/slugs/{slug}/shorten`
///
/// The first successful call makes the slug permanently the company's, even
/// with an empty `urls` list.
///
/// # Request Body
///
/// ```json
/// {
///   "company_id": "acme",
///   "urls": [
///     { "record_id": "sms-1", "long_url": "https://example.com" }
///   ]
/// }
/// ```
///
/// Items come back as in [`shorten_handler`], with `short_code` of the form
/// `slug/code`.
///
/// # Errors
///
/// - 400 Bad Request on invalid input
/// - 403 Forbidden if another company holds the slug
/// - 409 Conflict if the slug is a reserved word
pub async fn slug_shorten_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<SlugShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let urls = payload.urls.into_iter().map(ShortenInput::from).collect();
    let shortened = state
        .shortening_service
        .shorten_with_slug(&payload.company_id, &slug, urls)
        .await?;

    Ok(Json(to_response(&state, shortened)))
}

fn to_response(state: &AppState, shortened: Vec<ShortenedUrl>) -> ShortenResponse {
    let items: Vec<_> = shortened
        .into_iter()
        .map(|s| ShortenedItem::new(s, &state.base_url))
        .collect();

    ShortenResponse {
        count: items.len(),
        items,
    }
}
