//! Repository trait definitions for the domain layer.
//!
//! These traits are the capability interface the services depend on. Any
//! store that honours their atomicity contracts is substitutable.
//!
//! # Available Repositories
//!
//! - [`UrlEntryRepository`] - Short code storage and resolution
//! - [`SlugReservationRepository`] - Slug reservation state
//!
//! Implementations live in `crate::infrastructure::persistence` (PostgreSQL)
//! and `crate::infrastructure::memory` (in-process). Mock implementations are
//! generated via `mockall` for unit tests.

pub mod slug_reservation_repository;
pub mod url_entry_repository;

pub use slug_reservation_repository::SlugReservationRepository;
pub use url_entry_repository::UrlEntryRepository;

#[cfg(test)]
pub use slug_reservation_repository::MockSlugReservationRepository;
#[cfg(test)]
pub use url_entry_repository::MockUrlEntryRepository;
