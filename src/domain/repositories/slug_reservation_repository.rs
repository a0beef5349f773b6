//! Repository trait for slug reservations.

use crate::domain::entities::SlugReservation;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage contract for slug reservations.
///
/// Every mutating method is a compare-and-swap: it only applies if the stored
/// row still matches the `expected` reservation the caller read, and reports
/// via `Ok(false)` (or `Ok(None)` for [`create`](Self::create)) when another
/// writer got there first. Two companies racing for the same expired slug
/// therefore cannot both win.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSlugReservationRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemorySlugReservationRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlugReservationRepository: Send + Sync {
    /// Returns the reservation for `slug`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get(&self, slug: &str) -> Result<Option<SlugReservation>, AppError>;

    /// Creates a temporary reservation if the slug has none.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` if created
    /// - `Ok(None)` if a reservation for the slug already exists
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(
        &self,
        slug: &str,
        owner: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<SlugReservation>, AppError>;

    /// Extends a temporary reservation still held by `expected.owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn refresh(
        &self,
        expected: &SlugReservation,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// Hands a temporary reservation over to `new_owner`.
    ///
    /// Applies only if owner and expiry are still those of `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn transfer(
        &self,
        expected: &SlugReservation,
        new_owner: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// Makes the reservation permanent and clears its expiry.
    ///
    /// Applies only if the slug is still owned by `expected.owner`;
    /// promoting an already permanent reservation succeeds without change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn promote_permanent(&self, expected: &SlugReservation) -> Result<bool, AppError>;

    /// Lists the distinct slugs currently attributed to `owner`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<String>, AppError>;
}
