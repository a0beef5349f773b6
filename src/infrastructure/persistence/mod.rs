//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries. Schema lives in `migrations/` and is applied at startup.
//!
//! # Repositories
//!
//! - [`PgUrlEntryRepository`] - Short code storage and resolution
//! - [`PgSlugReservationRepository`] - Slug reservation state

pub mod pg_slug_reservation_repository;
pub mod pg_url_entry_repository;

pub use pg_slug_reservation_repository::PgSlugReservationRepository;
pub use pg_url_entry_repository::PgUrlEntryRepository;
