//! DTOs for slug reservation endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{ReservationState, SlugReservation};

/// Request to reserve (or refresh) a slug.
#[derive(Debug, Deserialize, Validate)]
pub struct ReserveRequest {
    #[validate(length(min = 1, max = 255))]
    pub company_id: String,
}

/// Lifecycle state as exposed over the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Temporary,
    Expired,
    Permanent,
}

/// Current reservation of a slug.
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub slug: String,
    pub owner: String,
    pub status: ReservationStatus,
    pub permanent: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ReservationResponse {
    /// Builds the response as seen at `now`.
    pub fn at(reservation: SlugReservation, now: DateTime<Utc>) -> Self {
        let status = match reservation.state_at(now) {
            ReservationState::TemporaryHeld { .. } => ReservationStatus::Temporary,
            ReservationState::Expired { .. } => ReservationStatus::Expired,
            ReservationState::Permanent { .. } => ReservationStatus::Permanent,
        };

        Self {
            slug: reservation.slug,
            owner: reservation.owner,
            status,
            permanent: reservation.permanent,
            created_at: reservation.created_at,
            expires_at: reservation.expires_at,
        }
    }
}

/// Slugs attributed to a company.
#[derive(Debug, Serialize)]
pub struct CompanySlugsResponse {
    pub company_id: String,
    pub slugs: Vec<String>,
}
