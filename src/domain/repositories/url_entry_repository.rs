//! Repository trait for URL entry storage.

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for URL entries.
///
/// Implementations must make [`insert_if_absent`](Self::insert_if_absent) a
/// single atomic conditional write and
/// [`resolve_and_touch`](Self::resolve_and_touch) an atomic
/// read-modify-write on the same row. Concurrent callers rely on both.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlEntryRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryUrlEntryRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlEntryRepository: Send + Sync {
    /// Inserts the entry unless `(namespace, code)` already exists.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the entry was created with `times_accessed = 0`
    /// - `Ok(false)` if the key was already taken (collision)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert_if_absent(&self, new_entry: NewUrlEntry) -> Result<bool, AppError>;

    /// Looks up the long URL and records the access in one step.
    ///
    /// On a hit, `times_accessed` is incremented by exactly one and
    /// `last_accessed` is set to now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn resolve_and_touch(
        &self,
        namespace: &str,
        code: &str,
    ) -> Result<Option<String>, AppError>;

    /// Reads an entry without touching its counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, namespace: &str, code: &str) -> Result<Option<UrlEntry>, AppError>;

    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
