//! Handlers for slug reservations.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::reservation::{CompanySlugsResponse, ReservationResponse, ReserveRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Reserves a slug for a company, or refreshes the company's own hold.
///
/// # Endpoint
///
/// `PUT /api/slugs/{slug}/reservation`
///
/// # Request Body
///
/// ```json
/// { "company_id": "acme" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request on invalid input
/// - 409 Conflict if another company holds the slug or the slug is a reserved word
pub async fn reserve_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ReserveRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    payload.validate()?;

    let reservation = state
        .reservation_service
        .reserve(&payload.company_id, &slug)
        .await?;

    Ok(Json(ReservationResponse::at(reservation, Utc::now())))
}

/// Returns the current reservation of a slug.
///
/// # Endpoint
///
/// `GET /api/slugs/{slug}/reservation`
///
/// # Errors
///
/// Returns 404 Not Found if the slug was never reserved.
pub async fn reservation_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state.reservation_service.reservation(&slug).await?;

    Ok(Json(ReservationResponse::at(reservation, Utc::now())))
}

/// Lists the slugs attributed to a company, expired holds included.
///
/// # Endpoint
///
/// `GET /api/companies/{company_id}/slugs`
pub async fn company_slugs_handler(
    Path(company_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CompanySlugsResponse>, AppError> {
    let slugs = state.reservation_service.list_slugs_for(&company_id).await?;

    Ok(Json(CompanySlugsResponse { company_id, slugs }))
}
