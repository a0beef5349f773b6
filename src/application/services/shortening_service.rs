//! Batch shortening, globally or under a company slug.
//!
//! Composes [`ReservationService`] and [`AllocationService`]:
//!
//! 1. Validate owner and slug
//! 2. Claim the slug for the owner (refresh, create or take over an expired hold)
//! 3. Promote the reservation to permanent
//! 4. Allocate one code per URL in the slug's namespace

use std::sync::Arc;

use serde_json::json;

use crate::application::services::allocation_service::AllocationService;
use crate::application::services::reservation_service::{
    ReservationService, validate_claim_args,
};
use crate::domain::entities::{GLOBAL_NAMESPACE, short_path};
use crate::domain::repositories::{SlugReservationRepository, UrlEntryRepository};
use crate::error::AppError;

/// One URL submitted for shortening.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortenRequest {
    /// Opaque caller-side identifier, echoed back in the result.
    pub record_id: String,
    pub long_url: String,
}

/// A shortened URL, in the order it was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortenedUrl {
    pub record_id: String,
    pub long_url: String,
    /// `code` for the global namespace, `slug/code` under a company slug.
    pub short_code: String,
}

pub struct ShorteningService<U, R>
where
    U: UrlEntryRepository + ?Sized,
    R: SlugReservationRepository + ?Sized,
{
    allocation: Arc<AllocationService<U>>,
    reservations: Arc<ReservationService<R>>,
}

impl<U, R> ShorteningService<U, R>
where
    U: UrlEntryRepository + ?Sized,
    R: SlugReservationRepository + ?Sized,
{
    pub fn new(
        allocation: Arc<AllocationService<U>>,
        reservations: Arc<ReservationService<R>>,
    ) -> Self {
        Self {
            allocation,
            reservations,
        }
    }

    /// Shortens `urls` in the global namespace.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a URL is empty.
    /// Returns [`AppError::Internal`] if allocation fails.
    pub async fn shorten_batch(
        &self,
        urls: Vec<ShortenRequest>,
    ) -> Result<Vec<ShortenedUrl>, AppError> {
        self.allocate_all(GLOBAL_NAMESPACE, urls).await
    }

    /// Shortens `urls` under `slug` on behalf of `owner`.
    ///
    /// The first authorized call makes the slug permanently `owner`'s, even
    /// when `urls` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `owner` or `slug` is empty or
    /// malformed, or a URL is empty, and [`AppError::ReservedWord`] if the
    /// slug is disallowed.
    ///
    /// Returns [`AppError::Forbidden`] if another company actively holds the
    /// slug. Returns [`AppError::Internal`] if storage or allocation fails.
    pub async fn shorten_with_slug(
        &self,
        owner: &str,
        slug: &str,
        urls: Vec<ShortenRequest>,
    ) -> Result<Vec<ShortenedUrl>, AppError> {
        validate_claim_args(owner, slug)?;
        validate_urls(&urls)?;

        let reservation = self
            .reservations
            .reserve(owner, slug)
            .await
            .map_err(|err| match err {
                AppError::Conflict { .. } => forbidden(owner, slug),
                other => other,
            })?;

        self.reservations
            .promote(reservation)
            .await
            .map_err(|err| match err {
                AppError::Conflict { .. } => forbidden(owner, slug),
                other => other,
            })?;

        self.allocate_all(slug, urls).await
    }

    async fn allocate_all(
        &self,
        namespace: &str,
        urls: Vec<ShortenRequest>,
    ) -> Result<Vec<ShortenedUrl>, AppError> {
        validate_urls(&urls)?;

        let mut results = Vec::with_capacity(urls.len());

        for ShortenRequest {
            record_id,
            long_url,
        } in urls
        {
            let code = self
                .allocation
                .allocate(namespace, &long_url, Some(&record_id))
                .await?;

            results.push(ShortenedUrl {
                record_id,
                long_url,
                short_code: short_path(namespace, &code),
            });
        }

        tracing::info!(namespace, count = results.len(), "URLs shortened");

        Ok(results)
    }
}

fn validate_urls(urls: &[ShortenRequest]) -> Result<(), AppError> {
    if let Some(index) = urls.iter().position(|u| u.long_url.trim().is_empty()) {
        return Err(AppError::bad_request(
            "Long URL must not be empty",
            json!({ "index": index }),
        ));
    }

    Ok(())
}

fn forbidden(owner: &str, slug: &str) -> AppError {
    tracing::warn!(slug, owner, "Shortening refused, slug held by another company");

    AppError::forbidden(
        "Slug is reserved by another company",
        json!({ "slug": slug }),
    )
}
