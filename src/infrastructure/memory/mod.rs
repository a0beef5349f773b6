//! In-process repository implementations backed by `DashMap`.
//!
//! Used by the test suites and by `STORAGE_BACKEND=memory`. Every
//! conditional write happens under the shard lock of a single map entry, so
//! these stores give the same atomicity as the PostgreSQL ones within one
//! process.
//!
//! # Repositories
//!
//! - [`MemoryUrlEntryRepository`] - Short code storage and resolution
//! - [`MemorySlugReservationRepository`] - Slug reservation state

pub mod memory_slug_reservation_repository;
pub mod memory_url_entry_repository;

pub use memory_slug_reservation_repository::MemorySlugReservationRepository;
pub use memory_url_entry_repository::MemoryUrlEntryRepository;
