//! Slug reservation entity and its derived lifecycle state.

use chrono::{DateTime, Utc};

/// A claim on a slug by a company.
///
/// A reservation is either temporary (with an expiry) or permanent (no
/// expiry). Rows are never deleted: an expired reservation stays in place
/// until another company takes it over.
#[derive(Debug, Clone, PartialEq)]
pub struct SlugReservation {
    pub slug: String,
    pub owner: String,
    pub permanent: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of an existing reservation at a given instant.
///
/// `Unclaimed` is represented by the absence of a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationState {
    TemporaryHeld {
        owner: String,
        expires_at: DateTime<Utc>,
    },
    Expired {
        owner: String,
        expired_at: DateTime<Utc>,
    },
    Permanent {
        owner: String,
    },
}

impl SlugReservation {
    /// Returns true if `company_id` is the current owner.
    pub fn is_owned_by(&self, company_id: &str) -> bool {
        self.owner == company_id
    }

    /// Returns true if the reservation is temporary and `expires_at <= now`.
    ///
    /// A reservation expiring exactly at `now` counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !self.permanent && self.expires_at.is_none_or(|expires_at| expires_at <= now)
    }

    /// Returns true if the reservation is permanent or not yet expired.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now)
    }

    /// Classifies the reservation at `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> ReservationState {
        match (self.permanent, self.expires_at) {
            (true, _) => ReservationState::Permanent {
                owner: self.owner.clone(),
            },
            (false, Some(expires_at)) if expires_at > now => ReservationState::TemporaryHeld {
                owner: self.owner.clone(),
                expires_at,
            },
            (false, expires_at) => ReservationState::Expired {
                owner: self.owner.clone(),
                expired_at: expires_at.unwrap_or(self.created_at),
            },
        }
    }
}
