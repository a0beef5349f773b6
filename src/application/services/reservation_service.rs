//! Slug reservation service.

use std::sync::Arc;

use chrono::{Duration, SubsecRound, Utc};
use serde_json::json;

use crate::domain::entities::SlugReservation;
use crate::domain::repositories::SlugReservationRepository;
use crate::error::AppError;
use crate::utils::slug::validate_slug;

/// How many times a claim re-reads the slug after losing a race before
/// giving up with [`AppError::Conflict`].
const MAX_CLAIM_ROUNDS: usize = 8;

/// Settings for [`ReservationService`].
#[derive(Debug, Clone)]
pub struct ReservationConfig {
    /// Lifetime of a temporary hold, measured from creation or last refresh.
    pub reservation_duration: Duration,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            reservation_duration: Duration::seconds(900),
        }
    }
}

/// Drives the slug reservation state machine.
///
/// ```text
/// Unclaimed ──reserve──▶ TemporaryHeld(owner) ──promote──▶ Permanent(owner)
///                          │   ▲      │
///              owner reserve│   │      │ expires_at <= now, other company reserves
///                 (refresh) └───┘      ▼
///                                TemporaryHeld(new owner)
/// ```
///
/// Reservations are never deleted. Every transition is applied as a
/// compare-and-swap on the store; a lost race re-reads the slug and
/// re-evaluates from the new state.
pub struct ReservationService<R: SlugReservationRepository + ?Sized> {
    repository: Arc<R>,
    config: ReservationConfig,
}

/// Result of evaluating a claim against the current reservation.
enum ClaimStep {
    Done(SlugReservation),
    Retry,
}

impl<R: SlugReservationRepository + ?Sized> ReservationService<R> {
    /// Creates a new reservation service.
    pub fn new(repository: Arc<R>, config: ReservationConfig) -> Self {
        Self { repository, config }
    }

    /// Reserves `slug` for `company_id`.
    ///
    /// | Current state | Result |
    /// |---|---|
    /// | unclaimed | new temporary hold |
    /// | held by `company_id`, temporary | expiry refreshed |
    /// | held by `company_id`, permanent | unchanged |
    /// | held by another company, active | [`AppError::Conflict`] |
    /// | held by another company, expired | transferred, expiry reset |
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either argument is empty or the
    /// slug is malformed, and [`AppError::ReservedWord`] if the slug is
    /// disallowed. Neither case touches the store.
    ///
    /// Returns [`AppError::Conflict`] if another company holds the slug.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn reserve(
        &self,
        company_id: &str,
        slug: &str,
    ) -> Result<SlugReservation, AppError> {
        validate_claim_args(company_id, slug)?;

        for _ in 0..MAX_CLAIM_ROUNDS {
            if let ClaimStep::Done(reservation) = self.claim_step(company_id, slug).await? {
                return Ok(reservation);
            }
            tracing::debug!(slug, company_id, "Reservation changed concurrently, re-reading");
        }

        tracing::warn!(slug, company_id, "Gave up claiming contended slug");
        Err(already_reserved(slug))
    }

    /// One read-evaluate-write round of [`reserve`](Self::reserve).
    async fn claim_step(&self, company_id: &str, slug: &str) -> Result<ClaimStep, AppError> {
        // microsecond precision, matching what storage keeps
        let now = Utc::now().trunc_subsecs(6);
        let new_expires_at = now + self.config.reservation_duration;

        let Some(existing) = self.repository.get(slug).await? else {
            return Ok(
                match self.repository.create(slug, company_id, new_expires_at).await? {
                    Some(created) => {
                        tracing::info!(slug, owner = company_id, "Slug reserved");
                        ClaimStep::Done(created)
                    }
                    None => ClaimStep::Retry,
                },
            );
        };

        if existing.is_owned_by(company_id) {
            if existing.permanent {
                return Ok(ClaimStep::Done(existing));
            }

            if !self.repository.refresh(&existing, new_expires_at).await? {
                return Ok(ClaimStep::Retry);
            }

            tracing::info!(slug, owner = company_id, "Slug reservation refreshed");
            return Ok(ClaimStep::Done(SlugReservation {
                expires_at: Some(new_expires_at),
                ..existing
            }));
        }

        if existing.is_active_at(now) {
            return Err(already_reserved(slug));
        }

        if !self
            .repository
            .transfer(&existing, company_id, new_expires_at)
            .await?
        {
            return Ok(ClaimStep::Retry);
        }

        tracing::info!(
            slug,
            from = %existing.owner,
            to = company_id,
            "Expired slug reservation transferred"
        );
        Ok(ClaimStep::Done(SlugReservation {
            owner: company_id.to_string(),
            expires_at: Some(new_expires_at),
            ..existing
        }))
    }

    /// Makes the reservation of `slug` permanent.
    ///
    /// Promoting an already permanent reservation is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug has no reservation.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn promote_to_permanent(&self, slug: &str) -> Result<SlugReservation, AppError> {
        let reservation = self.reservation(slug).await?;
        self.promote(reservation).await
    }

    /// Promotes a reservation the caller has just confirmed it holds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if ownership changed since `reservation`
    /// was read. Returns [`AppError::Internal`] on storage errors.
    pub(crate) async fn promote(
        &self,
        reservation: SlugReservation,
    ) -> Result<SlugReservation, AppError> {
        if reservation.permanent {
            return Ok(reservation);
        }

        if !self.repository.promote_permanent(&reservation).await? {
            return Err(already_reserved(&reservation.slug));
        }

        tracing::info!(
            slug = %reservation.slug,
            owner = %reservation.owner,
            "Slug reservation made permanent"
        );

        Ok(SlugReservation {
            permanent: true,
            expires_at: None,
            ..reservation
        })
    }

    /// Lists the slugs currently attributed to `company_id`, expired ones
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `company_id` is empty.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_slugs_for(&self, company_id: &str) -> Result<Vec<String>, AppError> {
        if company_id.is_empty() {
            return Err(AppError::bad_request(
                "Company id must not be empty",
                json!({ "field": "company_id" }),
            ));
        }

        self.repository.list_by_owner(company_id).await
    }

    /// Returns the current reservation of `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug is unclaimed.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn reservation(&self, slug: &str) -> Result<SlugReservation, AppError> {
        self.repository
            .get(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Slug is not reserved", json!({ "slug": slug })))
    }
}

/// Checks the arguments shared by every claim on a slug.
pub(crate) fn validate_claim_args(company_id: &str, slug: &str) -> Result<(), AppError> {
    if company_id.is_empty() {
        return Err(AppError::bad_request(
            "Company id must not be empty",
            json!({ "field": "company_id" }),
        ));
    }

    validate_slug(slug)
}

fn already_reserved(slug: &str) -> AppError {
    AppError::conflict(
        "Slug is already reserved by another company",
        json!({ "slug": slug }),
    )
}
