//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`UrlEntry`] - A short code mapped to a long URL within a namespace
//! - [`SlugReservation`] - A company's claim on a slug namespace
//!
//! Creation inputs use separate structs (`NewUrlEntry`), following the
//! "New Type" pattern used across the crate.

pub mod slug_reservation;
pub mod url_entry;

pub use slug_reservation::{ReservationState, SlugReservation};
pub use url_entry::{GLOBAL_NAMESPACE, NewUrlEntry, UrlEntry, short_path};
